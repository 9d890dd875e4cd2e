use crate::solver::{
    constraints::maximum_working_duration_constraint::MaximumWorkingDurationConstraint,
    ls::r#move::LocalSearchOperator,
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Inter-Route Relocate**
///
/// Moves the stop at `from` in `from_route_id` to position `to` in `to_route_id`.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [from] -> (B) ...
///    R2: ... (X) -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> (B) ...
///    R2: ... (X) -> [from] -> (Y) ...
/// ```
#[derive(Debug)]
pub struct InterRelocateOperator {
    params: InterRelocateParams,
}

#[derive(Debug)]
pub struct InterRelocateParams {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl InterRelocateOperator {
    pub fn new(params: InterRelocateParams) -> Self {
        debug_assert_ne!(
            params.from_route_id, params.to_route_id,
            "InterRelocate cannot be used for intra-route relocation"
        );
        Self { params }
    }

    fn from_route_travel_after(&self, solution: &WorkingSolution) -> f64 {
        solution
            .route(self.params.from_route_id)
            .travel_secs_without(solution.problem(), self.params.from)
    }

    fn to_route_travel_delta(&self, solution: &WorkingSolution) -> f64 {
        let r1 = solution.route(self.params.from_route_id);
        let stop = r1.stops()[self.params.from];
        solution
            .route(self.params.to_route_id)
            .insertion_travel_delta(solution.problem(), stop, self.params.to)
    }
}

impl LocalSearchOperator for InterRelocateOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 == r2 {
            return;
        }

        let from_route = solution.route(r1);
        let to_route = solution.route(r2);

        for from in 0..from_route.len() {
            for to in 0..=to_route.len() {
                consumer(InterRelocateOperator::new(InterRelocateParams {
                    from_route_id: r1,
                    to_route_id: r2,
                    from,
                    to,
                }));
            }
        }
    }

    fn travel_delta(&self, solution: &WorkingSolution) -> f64 {
        let r1 = solution.route(self.params.from_route_id);
        (self.from_route_travel_after(solution) - r1.travel_secs())
            + self.to_route_travel_delta(solution)
    }

    fn is_valid(&self, solution: &WorkingSolution) -> bool {
        let problem = solution.problem();
        let r1 = solution.route(self.params.from_route_id);
        let r2 = solution.route(self.params.to_route_id);

        MaximumWorkingDurationConstraint::is_satisfied(
            problem,
            self.from_route_travel_after(solution),
            r1.len() - 1,
        ) && MaximumWorkingDurationConstraint::is_satisfied(
            problem,
            r2.travel_secs() + self.to_route_travel_delta(solution),
            r2.len() + 1,
        )
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        let problem = solution.problem();
        let stop = solution
            .route_mut(self.params.from_route_id)
            .remove(problem, self.params.from);
        solution
            .route_mut(self.params.to_route_id)
            .insert(problem, stop, self.params.to);
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.from_route_id, self.params.to_route_id]
    }
}
