use crate::solver::{
    insertion_context::InsertionContext,
    score::{Score, ScoreLevel},
    solution::working_solution::WorkingSolution,
};

use super::global_constraint::GlobalConstraint;

#[derive(Clone, Debug)]
pub struct UnassignedStopConstraint;

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Hard;

impl GlobalConstraint for UnassignedStopConstraint {
    fn constraint_name(&self) -> &'static str {
        "unassigned_stop"
    }

    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, solution: &WorkingSolution) -> Score {
        Score::of(
            self.score_level(),
            solution.unassigned_stops().len() as f64,
        )
    }

    fn compute_insertion_score(&self, _context: &InsertionContext) -> Score {
        Score::zero()
    }
}
