use crate::{
    problem::tour_problem::TourProblem,
    solver::{
        insertion_context::InsertionContext,
        score::{Score, ScoreLevel},
        solution::route::WorkingSolutionRoute,
    },
};

use super::{
    maximum_working_duration_constraint::MaximumWorkingDurationConstraint,
    travel_time_constraint::TravelTimeConstraint,
};

pub trait RouteConstraint {
    fn constraint_name(&self) -> &'static str;
    fn score_level(&self) -> ScoreLevel;
    fn compute_score(&self, problem: &TourProblem, route: &WorkingSolutionRoute) -> Score;
    fn compute_insertion_score(&self, context: &InsertionContext) -> Score;
}

#[derive(Clone, Debug)]
pub enum RouteConstraintType {
    MaximumWorkingDuration(MaximumWorkingDurationConstraint),
    TravelTime(TravelTimeConstraint),
}

impl RouteConstraint for RouteConstraintType {
    fn constraint_name(&self) -> &'static str {
        match self {
            RouteConstraintType::MaximumWorkingDuration(c) => c.constraint_name(),
            RouteConstraintType::TravelTime(c) => c.constraint_name(),
        }
    }

    fn score_level(&self) -> ScoreLevel {
        match self {
            RouteConstraintType::MaximumWorkingDuration(c) => c.score_level(),
            RouteConstraintType::TravelTime(c) => c.score_level(),
        }
    }

    fn compute_score(&self, problem: &TourProblem, route: &WorkingSolutionRoute) -> Score {
        match self {
            RouteConstraintType::MaximumWorkingDuration(c) => c.compute_score(problem, route),
            RouteConstraintType::TravelTime(c) => c.compute_score(problem, route),
        }
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        match self {
            RouteConstraintType::MaximumWorkingDuration(c) => c.compute_insertion_score(context),
            RouteConstraintType::TravelTime(c) => c.compute_insertion_score(context),
        }
    }
}
