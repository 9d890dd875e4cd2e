use std::sync::Arc;

use courier_matrix_providers::travel_matrices::TravelTimeMatrix;
use jiff::SignedDuration;

use super::stop::StopIdx;

/// Matrix index of the depot, the start and end of every tour.
pub const DEPOT: usize = 0;

/// A depot-anchored routing problem: one matrix, identical vehicles, one
/// working-time budget per vehicle.
#[derive(Debug, Clone)]
pub struct TourProblem {
    matrix: Arc<TravelTimeMatrix>,
    vehicle_count: usize,
    time_budget: SignedDuration,
    service_time: SignedDuration,
    time_budget_secs: f64,
    service_secs: f64,
    is_symmetric: bool,
    nearest_stops: Vec<Vec<StopIdx>>,
}

impl TourProblem {
    pub fn new(
        matrix: Arc<TravelTimeMatrix>,
        vehicle_count: usize,
        time_budget: SignedDuration,
        service_time: SignedDuration,
    ) -> Self {
        let service_time = service_time.max(SignedDuration::ZERO);
        let is_symmetric = matrix.is_symmetric();
        let nearest_stops = compute_nearest_stops(&matrix);

        TourProblem {
            matrix,
            vehicle_count,
            time_budget,
            service_time,
            time_budget_secs: time_budget.as_secs_f64(),
            service_secs: service_time.as_secs_f64(),
            is_symmetric,
            nearest_stops,
        }
    }

    pub fn matrix(&self) -> &TravelTimeMatrix {
        &self.matrix
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    pub fn time_budget(&self) -> SignedDuration {
        self.time_budget
    }

    pub fn service_time(&self) -> SignedDuration {
        self.service_time
    }

    pub fn time_budget_secs(&self) -> f64 {
        self.time_budget_secs
    }

    pub fn service_secs(&self) -> f64 {
        self.service_secs
    }

    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric
    }

    pub fn num_stops(&self) -> usize {
        self.matrix.num_locations().saturating_sub(1)
    }

    pub fn stops(&self) -> impl Iterator<Item = StopIdx> {
        (1..=self.num_stops()).map(StopIdx::new)
    }

    #[inline(always)]
    pub fn travel_secs(&self, from: usize, to: usize) -> f64 {
        self.matrix.travel_secs(from, to)
    }

    /// Working duration of a tour with the given travel time and stop count.
    #[inline(always)]
    pub fn working_secs(&self, travel_secs: f64, num_stops: usize) -> f64 {
        travel_secs + num_stops as f64 * self.service_secs
    }

    /// Depot, `stop`, depot, including the service at `stop`.
    pub fn round_trip_secs(&self, stop: StopIdx) -> f64 {
        let travel = self.travel_secs(DEPOT, stop.location_id())
            + self.travel_secs(stop.location_id(), DEPOT);
        self.working_secs(travel, 1)
    }

    /// Whether any vehicle could serve `stop` on its own.
    pub fn can_serve_alone(&self, stop: StopIdx) -> bool {
        self.vehicle_count > 0 && self.round_trip_secs(stop) <= self.time_budget_secs
    }

    /// Average of the outbound and return leg between the depot and `stop`.
    pub fn average_cost_from_depot(&self, stop: StopIdx) -> f64 {
        (self.travel_secs(DEPOT, stop.location_id()) + self.travel_secs(stop.location_id(), DEPOT))
            / 2.0
    }

    /// Other stops ordered by the combined travel time to and from `stop`.
    pub fn nearest_stops(&self, stop: StopIdx) -> &[StopIdx] {
        &self.nearest_stops[stop.get() - 1]
    }
}

fn compute_nearest_stops(matrix: &TravelTimeMatrix) -> Vec<Vec<StopIdx>> {
    let num_stops = matrix.num_locations().saturating_sub(1);
    (1..=num_stops)
        .map(|from| {
            let mut neighbours: Vec<StopIdx> = (1..=num_stops)
                .filter(|&to| to != from)
                .map(StopIdx::new)
                .collect();

            neighbours.sort_by(|&a, &b| {
                let cost_a = matrix.travel_secs(from, a.get()) + matrix.travel_secs(a.get(), from);
                let cost_b = matrix.travel_secs(from, b.get()) + matrix.travel_secs(b.get(), from);
                cost_a.total_cmp(&cost_b).then(a.cmp(&b))
            });

            neighbours
        })
        .collect()
}
