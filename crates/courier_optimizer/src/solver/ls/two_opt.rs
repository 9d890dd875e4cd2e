use crate::{
    problem::stop::StopIdx,
    solver::{
        constraints::maximum_working_duration_constraint::MaximumWorkingDurationConstraint,
        ls::r#move::LocalSearchOperator,
        solution::{route::compute_travel_secs, route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route 2-Opt**
///
/// Reverses the sequence of stops between `from` and `to` (inclusive).
///
/// ```text
/// BEFORE:
///    ... (prev) --x--> [from] -> ... -> [to] --x--> (next) ...
///
/// AFTER (Sequence Reversed):
///    ... (prev) -----> [to] -> ... -> [from] -----> (next) ...
///
/// Edges Removed: (prev->from), (to->next)
/// Edges Added:   (prev->to),   (from->next)
/// ```
///
/// On asymmetric matrices every edge inside the segment flips direction, so
/// the delta is computed over the whole reversed route.
#[derive(Debug)]
pub struct TwoOptOperator {
    params: TwoOptParams,
}

#[derive(Debug)]
pub struct TwoOptParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl TwoOptOperator {
    pub fn new(params: TwoOptParams) -> Self {
        debug_assert!(params.from < params.to, "TwoOpt: cannot have from >= to");
        TwoOptOperator { params }
    }

    fn reversed_stops<'a>(&self, stops: &'a [StopIdx]) -> impl Iterator<Item = StopIdx> + 'a {
        let from = self.params.from;
        let to = self.params.to;
        stops[..from]
            .iter()
            .chain(stops[from..=to].iter().rev())
            .chain(stops[to + 1..].iter())
            .copied()
    }

    fn symmetric_delta(&self, solution: &WorkingSolution) -> f64 {
        let problem = solution.problem();
        let route = solution.route(self.params.route_id);

        let prev = route.previous_location_id(self.params.from);
        let from = route.location_id(self.params.from);
        let to = route.location_id(self.params.to);
        let next = route.next_location_id(self.params.to);

        let current_cost = problem.travel_secs(prev, from) + problem.travel_secs(to, next);
        let new_cost = problem.travel_secs(prev, to) + problem.travel_secs(from, next);

        new_cost - current_cost
    }

    fn asymmetric_delta(&self, solution: &WorkingSolution) -> f64 {
        let problem = solution.problem();
        let route = solution.route(self.params.route_id);

        compute_travel_secs(problem, self.reversed_stops(route.stops())) - route.travel_secs()
    }
}

impl LocalSearchOperator for TwoOptOperator {
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

        for from in 0..route.len() - 1 {
            for to in (from + 1)..route.len() {
                consumer(TwoOptOperator::new(TwoOptParams {
                    route_id: r1,
                    from,
                    to,
                }));
            }
        }
    }

    fn travel_delta(&self, solution: &WorkingSolution) -> f64 {
        if solution.problem().is_symmetric() {
            self.symmetric_delta(solution)
        } else {
            self.asymmetric_delta(solution)
        }
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
        let route = solution.route(self.params.route_id);
        let stops: Vec<StopIdx> = self.reversed_stops(route.stops()).collect();
        solution
            .route_mut(self.params.route_id)
            .replace_stops(problem, stops);
    }

    fn updated_routes(&self) -> Vec<RouteIdx> {
        vec![self.params.route_id]
    }
}
