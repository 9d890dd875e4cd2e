use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, instrument};

use crate::solver::{
    ls::{
        inter_relocate::InterRelocateOperator,
        r#move::{LocalSearchMove, LocalSearchOperator},
        relocate::RelocateOperator,
        two_opt::TwoOptOperator,
    },
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

type RoutePair = (RouteIdx, RouteIdx);

const MIN_IMPROVEMENT: f64 = 1e-6;

/// Best-improvement descent over intra and inter-route moves. Only moves
/// keeping every touched route within budget are applied.
pub struct LocalSearch {
    max_rounds: usize,
}

impl LocalSearch {
    pub fn new(max_rounds: usize) -> Self {
        LocalSearch { max_rounds }
    }

    /// Applies improving moves until none is left or `max_rounds` moves have
    /// been applied. Returns the number of applied moves.
    #[instrument(skip_all, level = "debug")]
    pub fn intensify(&self, solution: &mut WorkingSolution) -> usize {
        for round in 0..self.max_rounds {
            if !self.run_round(solution) {
                return round;
            }
        }

        self.max_rounds
    }

    fn route_pairs(solution: &WorkingSolution) -> Vec<RoutePair> {
        let non_empty = solution.non_empty_route_ids();

        // Empty routes are interchangeable, moving into one of them is enough
        let first_empty = solution
            .routes()
            .iter()
            .position(|route| route.is_empty())
            .map(RouteIdx::new);

        let mut pairs = Vec::with_capacity(non_empty.len() * (non_empty.len() + 1));
        for &r1 in &non_empty {
            for &r2 in non_empty.iter().chain(first_empty.iter()) {
                pairs.push((r1, r2));
            }
        }
        pairs
    }

    fn run_round(&self, solution: &mut WorkingSolution) -> bool {
        let pairs = Self::route_pairs(solution);

        let results = pairs
            .par_iter()
            .map(|&pair| best_move_for_pair(solution, pair))
            .collect::<Vec<_>>();

        let mut best: Option<(f64, LocalSearchMove)> = None;
        for (delta, candidate) in results.into_iter().flatten() {
            if best.as_ref().is_none_or(|(best_delta, _)| delta < *best_delta) {
                best = Some((delta, candidate));
            }
        }

        match best {
            Some((delta, op)) if delta <= -MIN_IMPROVEMENT => {
                debug!(
                    "Apply {} on {:?} (d={})",
                    op.operator_name(),
                    op.updated_routes(),
                    delta
                );
                op.apply(solution);
                true
            }
            _ => false,
        }
    }
}

fn best_move_for_pair(solution: &WorkingSolution, pair: RoutePair) -> Option<(f64, LocalSearchMove)> {
    let mut best_delta = 0.0;
    let mut best_move: Option<LocalSearchMove> = None;

    TwoOptOperator::generate_moves(solution, pair, |op| {
        let delta = op.travel_delta(solution);
        if delta < best_delta && op.is_valid(solution) {
            best_delta = delta;
            best_move = Some(LocalSearchMove::TwoOpt(op));
        }
    });

    RelocateOperator::generate_moves(solution, pair, |op| {
        let delta = op.travel_delta(solution);
        if delta < best_delta && op.is_valid(solution) {
            best_delta = delta;
            best_move = Some(LocalSearchMove::Relocate(op));
        }
    });

    InterRelocateOperator::generate_moves(solution, pair, |op| {
        let delta = op.travel_delta(solution);
        if delta < best_delta && op.is_valid(solution) {
            best_delta = delta;
            best_move = Some(LocalSearchMove::InterRelocate(op));
        }
    });

    best_move.map(|op| (best_delta, op))
}
