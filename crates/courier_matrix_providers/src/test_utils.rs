use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use jiff::SignedDuration;

use crate::{
    coordinate::Coordinate,
    travel_profile::TravelProfile,
    travel_time_oracle::{RouteUnavailable, TravelTimeOracle},
};

/// Coordinates climbing north-east from the first one.
pub fn create_coordinates(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| Coordinate::new(56.10 + 0.01 * i as f64, 10.10 + 0.005 * i as f64))
        .collect()
}

/// Manhattan-distance oracle where heading north costs 50% more.
#[derive(Default)]
pub struct MockOracle {
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub failing: Vec<(Coordinate, Coordinate)>,
    pub delay: Option<Duration>,
    pub negative: bool,
}

impl MockOracle {
    pub fn secs(&self, origin: Coordinate, destination: Coordinate) -> f64 {
        let manhattan =
            ((destination.lat - origin.lat).abs() + (destination.lon - origin.lon).abs()) * 100_000.0;
        let climb = if destination.lat > origin.lat { 1.5 } else { 1.0 };
        (manhattan * climb).round()
    }
}

impl TravelTimeOracle for MockOracle {
    fn query_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        _profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(&(origin, destination)) {
                return Err(RouteUnavailable::NoRoute {
                    origin,
                    destination,
                });
            }

            let secs = self.secs(origin, destination);
            if self.negative {
                Ok(SignedDuration::from_secs_f64(-secs))
            } else {
                Ok(SignedDuration::from_secs_f64(secs))
            }
        }
    }
}
