use std::{collections::VecDeque, sync::Mutex, time::Duration};

use courier_matrix_providers::{
    as_the_crow_flies::AsTheCrowFliesOracle,
    coordinate::Coordinate,
    travel_profile::TravelProfile,
    travel_time_oracle::{RouteUnavailable, TravelTimeOracle},
};
use courier_optimizer::{
    problem::{stop::StopIdx, tour_problem::TourProblem},
    solver::{
        insertion::Insertion,
        score::Score,
        solution::{route_id::RouteIdx, tour::TourSolution, working_solution::WorkingSolution},
        tour_optimizer::TourOptimizer,
    },
};
use jiff::SignedDuration;

use crate::{
    fleet_plan::{FleetPlan, VehicleClass},
    stop_id::StopId,
    stop_pool::{REFERENCE_DEPOT, StopBounds, StopPool},
};

pub fn create_plan(num_stops: usize, classes: Vec<VehicleClass>) -> FleetPlan {
    FleetPlan {
        depot: REFERENCE_DEPOT,
        stops: StopPool::random(num_stops, StopBounds::default(), 42).into_stops(),
        classes,
    }
}

pub fn create_class(
    name: &str,
    profile: TravelProfile,
    vehicle_count: usize,
    budget_secs: i64,
) -> VehicleClass {
    VehicleClass {
        name: name.to_owned(),
        profile,
        vehicles: Vec::new(),
        vehicle_count: Some(vehicle_count),
        time_budget: SignedDuration::from_secs(budget_secs),
        service_time: SignedDuration::ZERO,
    }
}

pub fn ids(indices: &[usize]) -> Vec<StopId> {
    indices.iter().copied().map(StopId::new).collect()
}

/// Crow-flies oracle that records every query. Profiles can be made to fail
/// or to answer slowly.
#[derive(Default)]
pub struct RecordingOracle {
    inner: AsTheCrowFliesOracle,
    queries: Mutex<Vec<(Coordinate, Coordinate, TravelProfile)>>,
    failing: Option<TravelProfile>,
    slow: Option<(TravelProfile, Duration)>,
}

impl RecordingOracle {
    pub fn failing_for(profile: TravelProfile) -> Self {
        RecordingOracle {
            failing: Some(profile),
            ..RecordingOracle::default()
        }
    }

    pub fn slow_for(profile: TravelProfile, delay: Duration) -> Self {
        RecordingOracle {
            slow: Some((profile, delay)),
            ..RecordingOracle::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Plan stops that appeared in a query for `profile`, in index order.
    pub fn queried_locations(&self, plan: &FleetPlan, profile: TravelProfile) -> Vec<usize> {
        let queries = self.queries.lock().unwrap();
        let mut locations: Vec<usize> = queries
            .iter()
            .filter(|(_, _, queried)| *queried == profile)
            .flat_map(|(origin, destination, _)| [*origin, *destination])
            .filter_map(|coordinate| plan.stops.iter().position(|stop| *stop == coordinate))
            .collect();
        locations.sort_unstable();
        locations.dedup();
        locations
    }
}

impl TravelTimeOracle for RecordingOracle {
    fn query_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send {
        async move {
            self.queries
                .lock()
                .unwrap()
                .push((origin, destination, profile));

            if let Some((slow_profile, delay)) = self.slow
                && slow_profile == profile
            {
                tokio::time::sleep(delay).await;
            }

            if self.failing == Some(profile) {
                return Err(RouteUnavailable::NoRoute {
                    origin,
                    destination,
                });
            }

            self.inner.travel_time(origin, destination, profile)
        }
    }
}

/// Returns pre-recorded routes of matrix locations, one script per call,
/// and remembers how many stops each problem had.
pub struct ScriptedOptimizer {
    scripts: Mutex<VecDeque<Vec<Vec<usize>>>>,
    seen_stop_counts: Mutex<Vec<usize>>,
}

impl ScriptedOptimizer {
    pub fn new(scripts: Vec<Vec<Vec<usize>>>) -> Self {
        ScriptedOptimizer {
            scripts: Mutex::new(scripts.into()),
            seen_stop_counts: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_stop_counts(&self) -> Vec<usize> {
        self.seen_stop_counts.lock().unwrap().clone()
    }
}

impl TourOptimizer for ScriptedOptimizer {
    fn solve(&self, problem: &TourProblem) -> TourSolution {
        self.seen_stop_counts
            .lock()
            .unwrap()
            .push(problem.num_stops());

        let routes = self.scripts.lock().unwrap().pop_front().unwrap_or_default();

        let mut solution = WorkingSolution::new(problem);
        for (route_id, route) in routes.into_iter().enumerate() {
            for (position, stop) in route.into_iter().enumerate() {
                solution.insert(&Insertion {
                    route_id: RouteIdx::new(route_id),
                    position,
                    stop: StopIdx::new(stop),
                });
            }
        }

        let score = Score::new(
            solution.unassigned_stops().len() as f64,
            solution.total_travel_secs(),
        );
        TourSolution::from_working_solution(&solution, score)
    }
}
