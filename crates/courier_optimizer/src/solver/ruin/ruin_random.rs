use rand::{Rng, seq::SliceRandom};

use crate::{problem::stop::StopIdx, solver::solution::working_solution::WorkingSolution};

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution};

pub struct RuinRandom;

impl RuinSolution for RuinRandom {
    fn ruin_solution<R>(
        &self,
        solution: &mut WorkingSolution,
        RuinContext {
            rng,
            num_stops_to_remove,
            ..
        }: RuinContext<R>,
    ) where
        R: Rng,
    {
        let mut assigned: Vec<StopIdx> = solution
            .routes()
            .iter()
            .flat_map(|route| route.stops().iter().copied())
            .collect();
        assigned.shuffle(rng);

        let mut remaining = num_stops_to_remove;
        for stop in assigned {
            if remaining == 0 {
                break;
            }
            if solution.remove_stop(stop) {
                remaining -= 1;
            }
        }
    }
}
