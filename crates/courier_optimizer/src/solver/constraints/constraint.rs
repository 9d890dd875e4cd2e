use crate::solver::{
    insertion_context::InsertionContext,
    score::{Score, ScoreLevel},
    solution::working_solution::WorkingSolution,
};

use super::{
    global_constraint::{GlobalConstraint, GlobalConstraintType},
    maximum_working_duration_constraint::MaximumWorkingDurationConstraint,
    route_constraint::{RouteConstraint, RouteConstraintType},
    travel_time_constraint::TravelTimeConstraint,
    unassigned_stop_constraint::UnassignedStopConstraint,
};

#[derive(Clone, Debug)]
pub enum Constraint {
    Global(GlobalConstraintType),
    Route(RouteConstraintType),
}

impl Constraint {
    /// Serve as many stops as possible within the working-time budget, then
    /// travel as little as possible.
    pub fn defaults() -> Vec<Constraint> {
        vec![
            Constraint::Global(GlobalConstraintType::UnassignedStop(
                UnassignedStopConstraint,
            )),
            Constraint::Route(RouteConstraintType::MaximumWorkingDuration(
                MaximumWorkingDurationConstraint,
            )),
            Constraint::Route(RouteConstraintType::TravelTime(TravelTimeConstraint)),
        ]
    }

    pub fn score_level(&self) -> ScoreLevel {
        match self {
            Constraint::Global(constraint) => constraint.score_level(),
            Constraint::Route(constraint) => constraint.score_level(),
        }
    }

    pub fn constraint_name(&self) -> &'static str {
        match self {
            Constraint::Global(constraint) => constraint.constraint_name(),
            Constraint::Route(constraint) => constraint.constraint_name(),
        }
    }

    pub fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        match self {
            Constraint::Global(constraint) => constraint.compute_insertion_score(context),
            Constraint::Route(constraint) => constraint.compute_insertion_score(context),
        }
    }

    pub fn compute_score(&self, solution: &WorkingSolution) -> Score {
        match self {
            Constraint::Global(constraint) => constraint.compute_score(solution),
            Constraint::Route(constraint) => solution
                .non_empty_routes_iter()
                .fold(Score::zero(), |acc, route| {
                    acc + constraint.compute_score(solution.problem(), route)
                }),
        }
    }
}

pub fn compute_insertion_score(constraints: &[Constraint], context: &InsertionContext) -> Score {
    constraints
        .iter()
        .map(|constraint| constraint.compute_insertion_score(context))
        .sum()
}

pub fn compute_solution_score(constraints: &[Constraint], solution: &WorkingSolution) -> Score {
    constraints
        .iter()
        .map(|constraint| constraint.compute_score(solution))
        .sum()
}
