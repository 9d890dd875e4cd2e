use crate::{
    problem::stop::StopIdx,
    solver::{
        constraints::maximum_working_duration_constraint::MaximumWorkingDurationConstraint,
        ls::r#move::LocalSearchOperator,
        solution::{route::compute_travel_secs, route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route Relocate**
///
/// Moves the stop at `from` so it ends up at position `to` of the same route.
///
/// ```text
/// BEFORE:
///    (A) -> [from] -> (B) ... (X) -> (Y)
///
/// AFTER:
///    (A) -> (B) ... (X) -> [from] -> (Y)
/// ```
#[derive(Debug)]
pub struct RelocateOperator {
    params: RelocateParams,
}

#[derive(Debug)]
pub struct RelocateParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateParams) -> Self {
        debug_assert_ne!(params.from, params.to, "Relocate: from and to must differ");
        RelocateOperator { params }
    }

    fn relocated_stops(&self, stops: &[StopIdx]) -> Vec<StopIdx> {
        let mut relocated = stops.to_vec();
        let stop = relocated.remove(self.params.from);
        relocated.insert(self.params.to, stop);
        relocated
    }
}

impl LocalSearchOperator for RelocateOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let route = solution.route(r1);
        if route.len() < 2 {
            return;
        }

        for from in 0..route.len() {
            for to in 0..route.len() {
                if from != to {
                    consumer(RelocateOperator::new(RelocateParams {
                        route_id: r1,
                        from,
                        to,
                    }));
                }
            }
        }
    }

    fn travel_delta(&self, solution: &WorkingSolution) -> f64 {
        let route = solution.route(self.params.route_id);
        compute_travel_secs(solution.problem(), self.relocated_stops(route.stops()))
            - route.travel_secs()
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let route = solution.route(self.params.route_id);
        MaximumWorkingDurationConstraint::is_satisfied(
            solution.problem(),
            route.travel_secs() + self.travel_delta(solution),
            route.len(),
        )
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let problem = solution.problem();
        let stops = self.relocated_stops(solution.route(self.params.route_id).stops());
        solution
            .route_mut(self.params.route_id)
            .replace_stops(problem, stops);
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}
