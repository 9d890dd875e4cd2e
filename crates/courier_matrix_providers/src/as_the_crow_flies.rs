use geo::{Distance, Haversine};
use jiff::SignedDuration;

use crate::{
    coordinate::Coordinate,
    travel_profile::TravelProfile,
    travel_time_oracle::{RouteUnavailable, TravelTimeOracle},
};

/// Offline oracle: great-circle distance at a constant speed per profile.
#[derive(Debug, Clone)]
pub struct AsTheCrowFliesOracle {
    speeds_kmh: [f64; 5],
    detour_factor: f64,
}

impl Default for AsTheCrowFliesOracle {
    fn default() -> Self {
        AsTheCrowFliesOracle {
            speeds_kmh: TravelProfile::ALL.map(default_speed_kmh),
            detour_factor: 1.0,
        }
    }
}

fn default_speed_kmh(profile: TravelProfile) -> f64 {
    match profile {
        TravelProfile::Car => 50.0,
        TravelProfile::Bike => 15.0,
        TravelProfile::Foot => 5.0,
        TravelProfile::SmallTruck => 45.0,
        TravelProfile::Truck => 40.0,
    }
}

fn profile_slot(profile: TravelProfile) -> usize {
    profile as usize
}

impl AsTheCrowFliesOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Street distance is never shorter than the great circle, so values
    /// below 1.0 are clamped.
    pub fn with_detour_factor(mut self, detour_factor: f64) -> Self {
        self.detour_factor = detour_factor.max(1.0);
        self
    }

    pub fn with_speed(mut self, profile: TravelProfile, speed_kmh: f64) -> Self {
        self.speeds_kmh[profile_slot(profile)] = speed_kmh;
        self
    }

    pub fn speed_kmh(&self, profile: TravelProfile) -> f64 {
        self.speeds_kmh[profile_slot(profile)]
    }

    pub fn travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Result<SignedDuration, RouteUnavailable> {
        let haversine = Haversine;
        let meters = haversine.distance(geo::Point::from(origin), geo::Point::from(destination));
        let meters_per_second = self.speed_kmh(profile) / 3.6;
        let seconds = meters * self.detour_factor / meters_per_second;

        SignedDuration::try_from_secs_f64(seconds).map_err(|_| RouteUnavailable::InvalidDuration {
            origin,
            destination,
            seconds,
        })
    }
}

impl TravelTimeOracle for AsTheCrowFliesOracle {
    fn query_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send {
        let result = self.travel_time(origin, destination, profile);
        async move { result }
    }
}
