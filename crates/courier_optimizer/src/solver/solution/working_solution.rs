use fxhash::FxHashSet;

use crate::{
    problem::{stop::StopIdx, tour_problem::TourProblem},
    solver::{
        constraints::maximum_working_duration_constraint::MaximumWorkingDurationConstraint,
        insertion::Insertion,
    },
    utils::enumerate_idx::EnumerateIdx,
};

use super::{route::WorkingSolutionRoute, route_id::RouteIdx};

/// Mutable solution state used by the search. Every stop is either in
/// exactly one route or in the unassigned set.
#[derive(Clone, Debug)]
pub struct WorkingSolution<'a> {
    problem: &'a TourProblem,
    routes: Vec<WorkingSolutionRoute>,
    unassigned_stops: FxHashSet<StopIdx>,
}

impl<'a> WorkingSolution<'a> {
    pub fn new(problem: &'a TourProblem) -> Self {
        WorkingSolution {
            problem,
            routes: vec![WorkingSolutionRoute::empty(); problem.vehicle_count()],
            unassigned_stops: problem.stops().collect(),
        }
    }

    pub fn problem(&self) -> &'a TourProblem {
        self.problem
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub(crate) fn route_mut(&mut self, route_id: RouteIdx) -> &mut WorkingSolutionRoute {
        &mut self.routes[route_id]
    }

    pub fn non_empty_routes_iter(&self) -> impl Iterator<Item = &WorkingSolutionRoute> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    pub fn non_empty_route_ids(&self) -> Vec<RouteIdx> {
        self.routes
            .iter()
            .enumerate_idx()
            .filter(|(_, route)| !route.is_empty())
            .map(|(route_id, _)| route_id)
            .collect()
    }

    pub fn unassigned_stops(&self) -> &FxHashSet<StopIdx> {
        &self.unassigned_stops
    }

    /// Unassigned stops in index order, independent of hashing.
    pub fn sorted_unassigned_stops(&self) -> Vec<StopIdx> {
        let mut stops: Vec<StopIdx> = self.unassigned_stops.iter().copied().collect();
        stops.sort_unstable();
        stops
    }

    pub fn num_assigned_stops(&self) -> usize {
        self.routes.iter().map(|route| route.len()).sum()
    }

    pub fn total_travel_secs(&self) -> f64 {
        self.routes.iter().map(|route| route.travel_secs()).sum()
    }

    pub fn find_stop(&self, stop: StopIdx) -> Option<(RouteIdx, usize)> {
        self.routes
            .iter()
            .enumerate_idx()
            .find_map(|(route_id, route)| route.position_of(stop).map(|position| (route_id, position)))
    }

    pub fn is_feasible(&self) -> bool {
        self.routes.iter().all(|route| {
            MaximumWorkingDurationConstraint::is_satisfied(
                self.problem,
                route.travel_secs(),
                route.len(),
            )
        })
    }

    pub fn insert(&mut self, insertion: &Insertion) {
        if self.unassigned_stops.remove(&insertion.stop) {
            let problem = self.problem;
            self.routes[insertion.route_id].insert(problem, insertion.stop, insertion.position);
        }
    }

    /// Unassigns `stop` unless doing so leaves its route over budget, which
    /// can happen when travel times break the triangle inequality.
    pub fn remove_stop(&mut self, stop: StopIdx) -> bool {
        let Some((route_id, position)) = self.find_stop(stop) else {
            return false;
        };

        let route = &self.routes[route_id];
        let remaining_travel = route.travel_secs_without(self.problem, position);
        if !MaximumWorkingDurationConstraint::is_satisfied(
            self.problem,
            remaining_travel,
            route.len() - 1,
        ) {
            return false;
        }

        let problem = self.problem;
        self.routes[route_id].remove(problem, position);
        self.unassigned_stops.insert(stop);
        true
    }

    pub fn remove_route(&mut self, route_id: RouteIdx) -> Vec<StopIdx> {
        let stops = self.routes[route_id].clear();
        self.unassigned_stops.extend(stops.iter().copied());
        stops
    }
}
