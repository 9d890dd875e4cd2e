use rand::{Rng, seq::IndexedRandom};
use tracing::warn;

use crate::solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution};

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution};

/// Empties whole routes, preferring the ones using most of their budget.
pub struct RuinRoute;

impl RuinSolution for RuinRoute {
    fn ruin_solution<R>(
        &self,
        solution: &mut WorkingSolution,
        RuinContext {
            rng,
            num_stops_to_remove,
            problem,
            ..
        }: RuinContext<R>,
    ) where
        R: Rng,
    {
        let mut remaining = num_stops_to_remove;

        while remaining > 0 {
            let routes: Vec<(RouteIdx, f64)> = solution
                .non_empty_route_ids()
                .into_iter()
                .map(|route_id| {
                    let working_secs = solution.route(route_id).working_secs(problem);
                    (route_id, working_secs.max(1.0))
                })
                .collect();

            if routes.is_empty() {
                break;
            }

            match routes.choose_weighted(&mut *rng, |&(_, weight)| weight) {
                Ok(&(route_id, _)) => {
                    let removed = solution.remove_route(route_id);
                    remaining = remaining.saturating_sub(removed.len());
                }
                Err(error) => {
                    warn!("RuinRoute: could not select a route to remove: {}", error);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use crate::{
        solver::ruin::ruin_params::RuinParams,
        test_utils::{create_line_problem, create_working_solution},
    };

    use super::*;

    #[test]
    fn test_ruin_route_removes_whole_routes() {
        let problem = create_line_problem(6, 3, 10_000.0, 0.0);
        let mut solution =
            create_working_solution(&problem, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        let mut rng = SmallRng::seed_from_u64(3);

        RuinRoute.ruin_solution(
            &mut solution,
            RuinContext {
                params: &RuinParams::default(),
                problem: &problem,
                rng: &mut rng,
                num_stops_to_remove: 3,
            },
        );

        assert_eq!(solution.non_empty_route_ids().len(), 1);
        assert_eq!(solution.unassigned_stops().len(), 4);
        for route in solution.routes() {
            assert!(route.is_empty() || route.len() == 2);
        }
    }
}
