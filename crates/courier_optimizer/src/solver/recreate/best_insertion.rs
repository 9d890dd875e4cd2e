use std::fmt::Display;

use rand::{Rng, rngs::SmallRng, seq::SliceRandom};
use serde::Serialize;

use crate::{
    problem::{stop::StopIdx, tour_problem::TourProblem},
    solver::{
        insertion::{Insertion, for_each_insertion},
        score::Score,
        solution::working_solution::WorkingSolution,
    },
};

use super::{
    recreate_context::{RecreateContext, score_insertion},
    recreate_solution::RecreateSolution,
};

#[derive(Default)]
pub struct BestInsertion {
    sort_method: BestInsertionSortStrategy,
    blink_rate: f64,
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BestInsertionSortStrategy {
    #[default]
    Random,
    Far,
    Close,
}

impl Display for BestInsertionSortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "Random"),
            Self::Far => write!(f, "Far"),
            Self::Close => write!(f, "Close"),
        }
    }
}

pub struct BestInsertionParams {
    pub sort_strategy: BestInsertionSortStrategy,
    pub blink_rate: f64,
}

impl BestInsertion {
    pub fn new(
        BestInsertionParams {
            sort_strategy: sort_method,
            blink_rate,
        }: BestInsertionParams,
    ) -> Self {
        BestInsertion {
            sort_method,
            blink_rate: blink_rate.clamp(0.0, 1.0),
        }
    }

    pub fn sort_unassigned_stops(
        &self,
        problem: &TourProblem,
        unassigned_stops: &mut [StopIdx],
        rng: &mut SmallRng,
    ) {
        match self.sort_method {
            BestInsertionSortStrategy::Random => unassigned_stops.shuffle(rng),
            BestInsertionSortStrategy::Far => unassigned_stops.sort_by(|&a, &b| {
                problem
                    .average_cost_from_depot(b)
                    .total_cmp(&problem.average_cost_from_depot(a))
            }),
            BestInsertionSortStrategy::Close => unassigned_stops.sort_by(|&a, &b| {
                problem
                    .average_cost_from_depot(a)
                    .total_cmp(&problem.average_cost_from_depot(b))
            }),
        }
    }

    /// Inserts stops one at a time, each at its cheapest feasible position.
    pub fn insert_stops(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        let problem = solution.problem();
        let mut unassigned_stops = solution.sorted_unassigned_stops();

        self.sort_unassigned_stops(problem, &mut unassigned_stops, context.rng);

        for stop in unassigned_stops {
            let mut best: Option<(Insertion, Score)> = None;

            for_each_insertion(solution, stop, |insertion| {
                if self.blink_rate > 0.0 && context.rng.random_bool(self.blink_rate) {
                    return;
                }

                let score = score_insertion(context.constraints, solution, &insertion);
                if score.is_failure() {
                    return;
                }

                if best.is_none_or(|(_, best_score)| score < best_score) {
                    best = Some((insertion, score));
                }
            });

            if let Some((insertion, _)) = best {
                solution.insert(&insertion);
            }
        }
    }
}

impl RecreateSolution for BestInsertion {
    fn recreate_solution(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        self.insert_stops(solution, context);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use crate::{
        solver::constraints::constraint::Constraint,
        test_utils::{create_line_problem, create_working_solution, stops},
    };

    use super::*;

    #[test]
    fn test_sort_far_and_close() {
        let problem = create_line_problem(4, 1, 10_000.0, 0.0);
        let mut rng = SmallRng::seed_from_u64(0);

        let mut unassigned = stops(&[2, 4, 1, 3]);
        BestInsertion::new(BestInsertionParams {
            sort_strategy: BestInsertionSortStrategy::Far,
            blink_rate: 0.0,
        })
        .sort_unassigned_stops(&problem, &mut unassigned, &mut rng);
        assert_eq!(unassigned, stops(&[4, 3, 2, 1]));

        BestInsertion::new(BestInsertionParams {
            sort_strategy: BestInsertionSortStrategy::Close,
            blink_rate: 0.0,
        })
        .sort_unassigned_stops(&problem, &mut unassigned, &mut rng);
        assert_eq!(unassigned, stops(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_inserts_at_cheapest_position() {
        let problem = create_line_problem(3, 1, 10_000.0, 0.0);
        let mut solution = create_working_solution(&problem, vec![vec![1, 3]]);
        let mut rng = SmallRng::seed_from_u64(0);
        let constraints = Constraint::defaults();

        BestInsertion::default().insert_stops(
            &mut solution,
            RecreateContext {
                rng: &mut rng,
                constraints: &constraints,
                blink_rate: 0.0,
            },
        );

        assert!(solution.unassigned_stops().is_empty());
        assert_eq!(solution.routes()[0].stops(), stops(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_respects_working_duration() {
        // One vehicle with room for two of the three stops
        let problem = create_line_problem(3, 1, 240.0, 60.0);
        let mut solution = create_working_solution(&problem, vec![vec![]]);
        let mut rng = SmallRng::seed_from_u64(1);
        let constraints = Constraint::defaults();

        BestInsertion::new(BestInsertionParams {
            sort_strategy: BestInsertionSortStrategy::Close,
            blink_rate: 0.0,
        })
        .insert_stops(
            &mut solution,
            RecreateContext {
                rng: &mut rng,
                constraints: &constraints,
                blink_rate: 0.0,
            },
        );

        assert!(solution.is_feasible());
        // 0 -> 1 -> 0 takes 120s plus 60s service, stop 2 would need 360s
        assert_eq!(solution.routes()[0].stops(), stops(&[1]).as_slice());
        assert_eq!(solution.sorted_unassigned_stops(), stops(&[2, 3]));
    }
}
