use crate::solver::score::Score;

use super::accept_solution::{AcceptSolution, AcceptSolutionContext};

/// Threshold acceptance with an exponentially decaying threshold, as in
/// Schrimpf et al. "Record breaking optimization results using the ruin and
/// recreate principle". Worse solutions are accepted while their travel time
/// stays within the threshold of the current one.
///
/// During the first `hard_loss_window` share of the iteration budget a
/// candidate may serve one stop less than the current solution, which lets
/// the search leave a local optimum that blocks a better packing.
pub struct SchrimpfAcceptor {
    initial_threshold: f64,
    alpha: f64,
    hard_loss_window: f64,
}

impl SchrimpfAcceptor {
    pub fn new(initial_threshold: f64, alpha: f64) -> Self {
        SchrimpfAcceptor {
            initial_threshold: initial_threshold.max(0.0),
            alpha: alpha.max(f64::EPSILON),
            hard_loss_window: 0.0,
        }
    }

    pub fn with_hard_loss_window(mut self, hard_loss_window: f64) -> Self {
        self.hard_loss_window = hard_loss_window.clamp(0.0, 1.0);
        self
    }

    fn progress(context: &AcceptSolutionContext) -> Option<f64> {
        match context.max_iterations {
            Some(max_iterations) if max_iterations > 0 => {
                Some((context.iteration as f64 / max_iterations as f64).min(1.0))
            }
            _ => None,
        }
    }

    pub fn threshold(&self, context: &AcceptSolutionContext) -> f64 {
        let progress = Self::progress(context).unwrap_or(0.0);
        self.initial_threshold * (-std::f64::consts::LN_2 * progress / self.alpha).exp()
    }

    /// Without an iteration budget there is no early phase.
    fn allows_hard_loss(&self, context: &AcceptSolutionContext) -> bool {
        Self::progress(context).is_some_and(|progress| progress < self.hard_loss_window)
    }
}

impl AcceptSolution for SchrimpfAcceptor {
    fn accept(&self, current: &Score, score: &Score, context: AcceptSolutionContext) -> bool {
        if score.hard_score < current.hard_score {
            return true;
        }

        if score.hard_score > current.hard_score {
            let single_loss = score.hard_score - current.hard_score <= 1.0;
            if !(single_loss && self.allows_hard_loss(&context)) {
                return false;
            }
        }

        score.soft_score < current.soft_score + self.threshold(&context)
    }
}
