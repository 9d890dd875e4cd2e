use crate::{
    problem::tour_problem::TourProblem,
    solver::{
        insertion_context::InsertionContext,
        score::{Score, ScoreLevel},
        solution::route::WorkingSolutionRoute,
    },
};

use super::route_constraint::RouteConstraint;

#[derive(Clone, Debug)]
pub struct TravelTimeConstraint;

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Soft;

impl RouteConstraint for TravelTimeConstraint {
    fn constraint_name(&self) -> &'static str {
        "travel_time"
    }

    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, _problem: &TourProblem, route: &WorkingSolutionRoute) -> Score {
        Score::of(self.score_level(), route.travel_secs())
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        Score::of(self.score_level(), context.travel_delta())
    }
}
