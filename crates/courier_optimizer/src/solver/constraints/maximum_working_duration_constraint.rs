use crate::{
    problem::tour_problem::TourProblem,
    solver::{
        insertion_context::InsertionContext,
        score::{Score, ScoreLevel},
        solution::route::WorkingSolutionRoute,
    },
};

use super::route_constraint::RouteConstraint;

/// Travel plus service time of a route must fit the vehicle's time budget.
#[derive(Clone, Debug)]
pub struct MaximumWorkingDurationConstraint;

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Hard;

impl MaximumWorkingDurationConstraint {
    pub fn is_satisfied(problem: &TourProblem, travel_secs: f64, num_stops: usize) -> bool {
        problem.working_secs(travel_secs, num_stops) <= problem.time_budget_secs()
    }

    fn excess(problem: &TourProblem, working_secs: f64) -> f64 {
        (working_secs - problem.time_budget_secs()).max(0.0)
    }
}

impl RouteConstraint for MaximumWorkingDurationConstraint {
    fn constraint_name(&self) -> &'static str {
        "maximum_working_duration"
    }

    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, problem: &TourProblem, route: &WorkingSolutionRoute) -> Score {
        Score::of(
            self.score_level(),
            Self::excess(problem, route.working_secs(problem)),
        )
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        let problem = context.problem();
        let current_excess = Self::excess(problem, context.route().working_secs(problem));
        let new_excess = Self::excess(problem, context.new_working_secs());

        // Only the violation added by this insertion counts
        Score::of(self.score_level(), (new_excess - current_excess).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{create_line_problem, create_working_solution};

    use super::*;

    #[test]
    fn test_route_within_budget() {
        let problem = create_line_problem(3, 1, 300.0, 30.0);
        let solution = create_working_solution(&problem, vec![vec![1, 2]]);
        let route = &solution.routes()[0];

        assert!(MaximumWorkingDurationConstraint::is_satisfied(
            &problem,
            route.travel_secs(),
            route.len()
        ));
        assert_eq!(
            MaximumWorkingDurationConstraint.compute_score(&problem, route),
            Score::zero()
        );
    }

    #[test]
    fn test_route_over_budget() {
        let problem = create_line_problem(3, 1, 250.0, 30.0);
        let solution = create_working_solution(&problem, vec![vec![1, 2]]);
        let route = &solution.routes()[0];

        assert!(!MaximumWorkingDurationConstraint::is_satisfied(
            &problem,
            route.travel_secs(),
            route.len()
        ));
        assert_eq!(
            MaximumWorkingDurationConstraint.compute_score(&problem, route),
            Score::hard(50.0)
        );
    }
}
