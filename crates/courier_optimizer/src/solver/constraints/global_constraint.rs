use crate::solver::{
    insertion_context::InsertionContext,
    score::{Score, ScoreLevel},
    solution::working_solution::WorkingSolution,
};

use super::unassigned_stop_constraint::UnassignedStopConstraint;

pub trait GlobalConstraint {
    fn constraint_name(&self) -> &'static str;
    fn score_level(&self) -> ScoreLevel;
    fn compute_score(&self, solution: &WorkingSolution) -> Score;
    fn compute_insertion_score(&self, context: &InsertionContext) -> Score;
}

#[derive(Clone, Debug)]
pub enum GlobalConstraintType {
    UnassignedStop(UnassignedStopConstraint),
}

impl GlobalConstraint for GlobalConstraintType {
    fn constraint_name(&self) -> &'static str {
        match self {
            GlobalConstraintType::UnassignedStop(constraint) => constraint.constraint_name(),
        }
    }

    fn score_level(&self) -> ScoreLevel {
        match self {
            GlobalConstraintType::UnassignedStop(constraint) => constraint.score_level(),
        }
    }

    fn compute_score(&self, solution: &WorkingSolution) -> Score {
        match self {
            GlobalConstraintType::UnassignedStop(constraint) => constraint.compute_score(solution),
        }
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        match self {
            GlobalConstraintType::UnassignedStop(constraint) => {
                constraint.compute_insertion_score(context)
            }
        }
    }
}
