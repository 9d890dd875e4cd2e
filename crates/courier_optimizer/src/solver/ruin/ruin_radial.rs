use rand::{Rng, seq::IndexedRandom};

use crate::{problem::stop::StopIdx, solver::solution::working_solution::WorkingSolution};

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution};

/// Removes a random assigned stop and the stops closest to it in travel time.
pub struct RuinRadial;

impl RuinSolution for RuinRadial {
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
        let assigned: Vec<StopIdx> = solution
            .routes()
            .iter()
            .flat_map(|route| route.stops().iter().copied())
            .collect();

        let Some(&center) = assigned.choose(rng) else {
            return;
        };

        let mut remaining = num_stops_to_remove;
        for &stop in std::iter::once(&center).chain(problem.nearest_stops(center)) {
            if remaining == 0 {
                break;
            }
            if solution.remove_stop(stop) {
                remaining -= 1;
            }
        }
    }
}
