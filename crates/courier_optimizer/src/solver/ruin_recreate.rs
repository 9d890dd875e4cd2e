use jiff::Timestamp;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::IndexedRandom};
use tracing::{debug, info, instrument};

use crate::{
    acceptor::{
        accept_solution::{AcceptSolution, AcceptSolutionContext},
        greedy_solution_acceptor::GreedySolutionAcceptor,
        schrimpf_acceptor::SchrimpfAcceptor,
        solution_acceptor::SolutionAcceptor,
    },
    problem::tour_problem::TourProblem,
    solver::{
        constraints::constraint::{Constraint, compute_solution_score},
        ls::local_search::LocalSearch,
        recreate::{
            construction_best_insertion::ConstructionBestInsertion,
            recreate_context::RecreateContext, recreate_solution::RecreateSolution,
        },
        ruin::{ruin_context::RuinContext, ruin_solution::RuinSolution},
        score::Score,
        solution::working_solution::WorkingSolution,
        solver_params::{SolverAcceptorStrategy, SolverParams, Termination},
    },
};

/// Ruin and recreate search around a single current solution.
pub struct RuinRecreateSearch<'a> {
    problem: &'a TourProblem,
    params: &'a SolverParams,
    constraints: Vec<Constraint>,
    acceptor: SolutionAcceptor,
    local_search: LocalSearch,
}

struct SearchState<'a> {
    iteration: usize,
    iterations_without_improvement: usize,
    start: Timestamp,
    current: WorkingSolution<'a>,
    current_score: Score,
    best: WorkingSolution<'a>,
    best_score: Score,
}

impl<'a> RuinRecreateSearch<'a> {
    pub fn new(problem: &'a TourProblem, params: &'a SolverParams) -> Self {
        let acceptor = match params.solver_acceptor {
            SolverAcceptorStrategy::Greedy => SolutionAcceptor::Greedy(GreedySolutionAcceptor),
            SolverAcceptorStrategy::Schrimpf => SolutionAcceptor::Schrimpf(
                SchrimpfAcceptor::new(params.acceptor_initial_threshold_secs, params.schrimpf_alpha)
                    .with_hard_loss_window(params.acceptor_hard_loss_window),
            ),
        };

        RuinRecreateSearch {
            problem,
            params,
            constraints: Constraint::defaults(),
            acceptor,
            local_search: LocalSearch::new(params.local_search_max_rounds),
        }
    }

    /// Builds an initial solution and improves it until a termination
    /// condition is met. Returns the best solution found and its score.
    #[instrument(skip_all, level = "debug")]
    pub fn run(&self) -> (WorkingSolution<'a>, Score) {
        let mut rng = SmallRng::seed_from_u64(self.params.seed);

        let mut initial = WorkingSolution::new(self.problem);
        ConstructionBestInsertion::insert_stops(&mut initial, &self.constraints);
        self.local_search.intensify(&mut initial);
        let initial_score = compute_solution_score(&self.constraints, &initial);

        debug!(
            score = ?initial_score,
            assigned = initial.num_assigned_stops(),
            "Initial solution"
        );

        // Nothing left to search
        if self.problem.vehicle_count() == 0 || self.problem.num_stops() == 0 {
            return (initial, initial_score);
        }

        let mut state = SearchState {
            iteration: 0,
            iterations_without_improvement: 0,
            start: Timestamp::now(),
            current: initial.clone(),
            current_score: initial_score,
            best: initial,
            best_score: initial_score,
        };

        while !self.should_terminate(&state) {
            state.iteration += 1;
            self.run_iteration(&mut state, &mut rng);
        }

        info!(
            iterations = state.iteration,
            elapsed = ?Timestamp::now().duration_since(state.start),
            unserved = state.best.unassigned_stops().len(),
            travel_secs = state.best.total_travel_secs(),
            "Search finished"
        );

        (state.best, state.best_score)
    }

    fn run_iteration(&self, state: &mut SearchState<'a>, rng: &mut SmallRng) {
        let mut candidate = state.current.clone();

        let (minimum, maximum) = self.params.ruin.size_range(candidate.num_assigned_stops());
        let num_stops_to_remove = rng.random_range(minimum..=maximum);

        if let Some(ruin_strategy) = self.params.ruin.ruin_strategies.choose(rng) {
            ruin_strategy.ruin_solution(
                &mut candidate,
                RuinContext {
                    params: &self.params.ruin,
                    problem: self.problem,
                    rng: &mut *rng,
                    num_stops_to_remove,
                },
            );
        }

        let recreate_strategy = self
            .params
            .recreate
            .recreate_strategies
            .choose(rng)
            .copied();
        match recreate_strategy {
            Some(recreate_strategy) => recreate_strategy.recreate_solution(
                &mut candidate,
                RecreateContext {
                    rng: &mut *rng,
                    constraints: &self.constraints,
                    blink_rate: self.params.recreate.blink_rate,
                },
            ),
            None => ConstructionBestInsertion::insert_stops(&mut candidate, &self.constraints),
        }

        let mut score = compute_solution_score(&self.constraints, &candidate);
        if self.params.local_search_on_improvement && score < state.best_score {
            self.local_search.intensify(&mut candidate);
            score = compute_solution_score(&self.constraints, &candidate);
        }

        let improved = score < state.best_score;
        let accepted = self.acceptor.accept(
            &state.current_score,
            &score,
            AcceptSolutionContext {
                iteration: state.iteration,
                max_iterations: self.params.max_iterations(),
            },
        );

        if improved {
            debug!(
                iteration = state.iteration,
                unserved = candidate.unassigned_stops().len(),
                travel_secs = candidate.total_travel_secs(),
                "New best solution"
            );
            state.iterations_without_improvement = 0;
        } else {
            state.iterations_without_improvement += 1;
        }

        match (improved, accepted) {
            (true, true) => {
                state.best = candidate.clone();
                state.best_score = score;
                state.current = candidate;
                state.current_score = score;
            }
            (true, false) => {
                state.best = candidate;
                state.best_score = score;
            }
            (false, true) => {
                state.current = candidate;
                state.current_score = score;
            }
            (false, false) => {}
        }
    }

    fn check_termination(&self, state: &SearchState, termination: &Termination) -> bool {
        match *termination {
            Termination::Iterations(max_iterations) => state.iteration >= max_iterations,
            Termination::Duration(max_duration) => {
                Timestamp::now().duration_since(state.start) > max_duration
            }
            Termination::IterationsWithoutImprovement(max_iterations_without_improvement) => {
                state.iterations_without_improvement >= max_iterations_without_improvement
            }
        }
    }

    fn should_terminate(&self, state: &SearchState) -> bool {
        self.params.terminations.iter().any(|termination| {
            if self.check_termination(state, termination) {
                debug!(
                    "Termination condition met: {:?} at iteration {}",
                    termination, state.iteration
                );
                true
            } else {
                false
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{solver::solver_params::Termination, test_utils::create_line_problem};

    use super::*;

    #[test]
    fn test_run_stops_after_iterations() {
        let problem = create_line_problem(6, 2, 10_000.0, 0.0);
        let params = SolverParams {
            terminations: vec![Termination::Iterations(25)],
            ..SolverParams::default()
        };

        let (solution, score) = RuinRecreateSearch::new(&problem, &params).run();

        assert!(solution.is_feasible());
        assert_eq!(solution.unassigned_stops().len(), 0);
        assert_eq!(score.hard_score, 0.0);
        assert_eq!(score.soft_score, solution.total_travel_secs());
    }

    #[test]
    fn test_run_without_terminations_is_bounded_by_improvement() {
        let problem = create_line_problem(4, 1, 10_000.0, 0.0);
        let params = SolverParams {
            terminations: vec![Termination::IterationsWithoutImprovement(10)],
            solver_acceptor: SolverAcceptorStrategy::Greedy,
            ..SolverParams::default()
        };

        let (solution, _) = RuinRecreateSearch::new(&problem, &params).run();

        assert_eq!(solution.total_travel_secs(), 480.0);
    }

    #[test]
    fn test_stop_loss_while_searching_keeps_best() {
        let problem = create_line_problem(6, 2, 10_000.0, 0.0);
        let params = SolverParams {
            terminations: vec![Termination::Iterations(200)],
            acceptor_hard_loss_window: 1.0,
            acceptor_initial_threshold_secs: 100_000.0,
            ..SolverParams::default()
        };

        let (solution, score) = RuinRecreateSearch::new(&problem, &params).run();

        assert!(solution.is_feasible());
        assert_eq!(score.hard_score, 0.0);
        assert_eq!(solution.unassigned_stops().len(), 0);
    }
}
