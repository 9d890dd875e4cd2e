use rand::Rng;

use crate::{problem::tour_problem::TourProblem, solver::ruin::ruin_params::RuinParams};

pub struct RuinContext<'a, R>
where
    R: Rng,
{
    pub params: &'a RuinParams,
    pub problem: &'a TourProblem,
    pub rng: &'a mut R,
    pub num_stops_to_remove: usize,
}
