use std::fmt::Display;

use rand::Rng;
use serde::Serialize;

use crate::solver::solution::working_solution::WorkingSolution;

use super::{
    ruin_context::RuinContext, ruin_radial::RuinRadial, ruin_random::RuinRandom,
    ruin_route::RuinRoute, ruin_solution::RuinSolution,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RuinStrategy {
    Random,
    Radial,
    Route,
}

impl Display for RuinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuinStrategy::Random => write!(f, "Random"),
            RuinStrategy::Radial => write!(f, "Radial"),
            RuinStrategy::Route => write!(f, "Route"),
        }
    }
}

impl RuinSolution for RuinStrategy {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>)
    where
        R: Rng,
    {
        match self {
            RuinStrategy::Random => RuinRandom.ruin_solution(solution, context),
            RuinStrategy::Radial => RuinRadial.ruin_solution(solution, context),
            RuinStrategy::Route => RuinRoute.ruin_solution(solution, context),
        }
    }
}
