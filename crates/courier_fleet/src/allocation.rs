use courier_matrix_providers::travel_profile::TravelProfile;
use courier_optimizer::solver::solution::tour::TourSolution;
use fxhash::FxHashSet;
use jiff::SignedDuration;
use serde::Serialize;

use crate::{fleet_plan::VehicleClass, stop_id::StopId};

/// A vehicle's tour in plan terms. The depot is implied at both ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleTour {
    pub vehicle: String,
    pub stops: Vec<StopId>,
    pub travel_time: SignedDuration,
    pub duration: SignedDuration,
}

impl VehicleTour {
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassAllocation {
    pub class: String,
    pub profile: TravelProfile,
    pub tours: Vec<VehicleTour>,
    /// Stops left for the next class.
    pub residual: Vec<StopId>,
    /// Set when the class matrix could not be built and the class was passed over.
    pub skipped: bool,
}

impl ClassAllocation {
    /// Translates matrix locations back to plan stops. Location `i > 0` of the
    /// class matrix is `pool[i - 1]`.
    pub fn from_solution(class: &VehicleClass, pool: &[StopId], solution: TourSolution) -> Self {
        let tours: Vec<VehicleTour> = class
            .vehicle_names()
            .into_iter()
            .zip(solution.into_tours())
            .map(|(vehicle, tour)| VehicleTour {
                vehicle,
                stops: tour
                    .stops()
                    .iter()
                    .map(|stop| pool[stop.location_id() - 1])
                    .collect(),
                travel_time: tour.travel_time(),
                duration: tour.duration(),
            })
            .collect();

        let served: FxHashSet<StopId> =
            tours.iter().flat_map(|tour| tour.stops.iter().copied()).collect();
        let residual = pool
            .iter()
            .copied()
            .filter(|stop| !served.contains(stop))
            .collect();

        ClassAllocation {
            class: class.name.clone(),
            profile: class.profile,
            tours,
            residual,
            skipped: false,
        }
    }

    /// Every vehicle stays at the depot and the whole pool is passed on.
    pub fn idle(class: &VehicleClass, pool: &[StopId], skipped: bool) -> Self {
        ClassAllocation {
            class: class.name.clone(),
            profile: class.profile,
            tours: class
                .vehicle_names()
                .into_iter()
                .map(|vehicle| VehicleTour {
                    vehicle,
                    stops: Vec::new(),
                    travel_time: SignedDuration::ZERO,
                    duration: SignedDuration::ZERO,
                })
                .collect(),
            residual: pool.to_vec(),
            skipped,
        }
    }

    pub fn served(&self) -> Vec<StopId> {
        let mut served: Vec<StopId> = self
            .tours
            .iter()
            .flat_map(|tour| tour.stops.iter().copied())
            .collect();
        served.sort_unstable();
        served
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetAllocation {
    /// Completed classes in priority order.
    pub classes: Vec<ClassAllocation>,
    /// Stops no class has served yet.
    pub unvisited: Vec<StopId>,
}

impl FleetAllocation {
    pub fn new(unvisited: Vec<StopId>) -> Self {
        FleetAllocation {
            classes: Vec::new(),
            unvisited,
        }
    }

    pub fn class(&self, name: &str) -> Option<&ClassAllocation> {
        self.classes.iter().find(|class| class.class == name)
    }

    pub fn served(&self) -> Vec<StopId> {
        let mut served: Vec<StopId> = self
            .classes
            .iter()
            .flat_map(|class| class.served())
            .collect();
        served.sort_unstable();
        served
    }

    pub fn served_count(&self) -> usize {
        self.classes
            .iter()
            .flat_map(|class| &class.tours)
            .map(|tour| tour.stops.len())
            .sum()
    }

    pub(crate) fn push(&mut self, class: ClassAllocation) {
        self.unvisited = class.residual.clone();
        self.classes.push(class);
    }
}
