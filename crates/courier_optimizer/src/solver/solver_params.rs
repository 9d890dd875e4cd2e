use jiff::SignedDuration;

use super::{recreate::recreate_params::RecreateParams, ruin::ruin_params::RuinParams};

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub seed: u64,
    pub terminations: Vec<Termination>,
    pub solver_acceptor: SolverAcceptorStrategy,

    /// Starting threshold of the Schrimpf acceptor, in travel seconds.
    pub acceptor_initial_threshold_secs: f64,
    pub schrimpf_alpha: f64,
    /// Share of the iteration budget during which the acceptor may give up
    /// one served stop.
    pub acceptor_hard_loss_window: f64,

    pub ruin: RuinParams,
    pub recreate: RecreateParams,

    pub local_search_on_improvement: bool,
    pub local_search_max_rounds: usize,
}

#[derive(Clone, Debug)]
pub enum Termination {
    Duration(SignedDuration),
    Iterations(usize),
    IterationsWithoutImprovement(usize),
}

#[derive(Clone, Debug)]
pub enum SolverAcceptorStrategy {
    Greedy,
    Schrimpf,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            seed: 2427121,
            terminations: vec![
                Termination::Iterations(1000),
                Termination::IterationsWithoutImprovement(300),
            ],
            solver_acceptor: SolverAcceptorStrategy::Schrimpf,
            acceptor_initial_threshold_secs: 300.0,
            schrimpf_alpha: 0.15,
            acceptor_hard_loss_window: 0.1,
            ruin: RuinParams::default(),
            recreate: RecreateParams::default(),
            local_search_on_improvement: true,
            local_search_max_rounds: 1000,
        }
    }
}

impl SolverParams {
    pub fn max_iterations(&self) -> Option<usize> {
        self.terminations
            .iter()
            .filter_map(|termination| match termination {
                Termination::Iterations(max_iterations) => Some(*max_iterations),
                _ => None,
            })
            .min()
    }
}
