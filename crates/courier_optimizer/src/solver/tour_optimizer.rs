use std::sync::Arc;

use tracing::instrument;

use crate::{
    problem::tour_problem::TourProblem,
    solver::{ruin_recreate::RuinRecreateSearch, solution::tour::TourSolution, solver_params::SolverParams},
};

/// Solves a depot-anchored tour problem. Every returned tour stays within the
/// time budget, and the solution has exactly one tour per vehicle.
pub trait TourOptimizer: Send + Sync {
    fn solve(&self, problem: &TourProblem) -> TourSolution;
}

impl<T: TourOptimizer + ?Sized> TourOptimizer for &T {
    fn solve(&self, problem: &TourProblem) -> TourSolution {
        (**self).solve(problem)
    }
}

impl<T: TourOptimizer + ?Sized> TourOptimizer for Arc<T> {
    fn solve(&self, problem: &TourProblem) -> TourSolution {
        (**self).solve(problem)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RuinRecreateOptimizer {
    params: SolverParams,
}

impl RuinRecreateOptimizer {
    pub fn new(params: SolverParams) -> Self {
        RuinRecreateOptimizer { params }
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }
}

impl TourOptimizer for RuinRecreateOptimizer {
    #[instrument(skip_all, level = "debug", fields(stops = problem.num_stops(), vehicles = problem.vehicle_count()))]
    fn solve(&self, problem: &TourProblem) -> TourSolution {
        let (solution, score) = RuinRecreateSearch::new(problem, &self.params).run();
        TourSolution::from_working_solution(&solution, score)
    }
}
