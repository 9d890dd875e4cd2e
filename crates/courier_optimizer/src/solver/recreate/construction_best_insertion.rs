use rayon::prelude::*;

use crate::{
    problem::stop::StopIdx,
    solver::{
        constraints::constraint::Constraint,
        insertion::{Insertion, for_each_insertion},
        score::Score,
        solution::working_solution::WorkingSolution,
    },
};

use super::{
    recreate_context::{RecreateContext, score_insertion},
    recreate_solution::RecreateSolution,
};

/// Global cheapest insertion: every round scores all unassigned stops and
/// commits the single cheapest feasible insertion.
#[derive(Default)]
pub struct ConstructionBestInsertion;

impl ConstructionBestInsertion {
    pub fn insert_stops(solution: &mut WorkingSolution, constraints: &[Constraint]) {
        // Travel times need not obey the triangle inequality, so a stop that
        // fits nowhere in one round may fit once a neighbour is routed.
        let mut candidates: Vec<StopIdx> = solution.sorted_unassigned_stops();

        while !candidates.is_empty() {
            let best = candidates
                .par_iter()
                .filter_map(|&stop| best_insertion_for_stop(solution, constraints, stop))
                .min_by(|(a, a_score), (b, b_score)| {
                    a_score.cmp(b_score).then(a.stop.cmp(&b.stop))
                });

            match best {
                Some((insertion, _)) => {
                    solution.insert(&insertion);
                    candidates.retain(|&stop| stop != insertion.stop);
                }
                None => break,
            }
        }
    }
}

fn best_insertion_for_stop(
    solution: &WorkingSolution,
    constraints: &[Constraint],
    stop: StopIdx,
) -> Option<(Insertion, Score)> {
    let mut best: Option<(Insertion, Score)> = None;
    for_each_insertion(solution, stop, |insertion| {
        let score = score_insertion(constraints, solution, &insertion);
        if !score.is_failure() && best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((insertion, score));
        }
    });

    best
}

impl RecreateSolution for ConstructionBestInsertion {
    fn recreate_solution(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        ConstructionBestInsertion::insert_stops(solution, context.constraints);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        solver::solution::route_id::RouteIdx,
        test_utils::{create_line_problem, create_problem, stops},
    };

    use super::*;

    #[test]
    fn test_construction_serves_everything_when_budget_allows() {
        let problem = create_line_problem(5, 2, 10_000.0, 30.0);
        let mut solution = WorkingSolution::new(&problem);

        ConstructionBestInsertion::insert_stops(&mut solution, &Constraint::defaults());

        assert!(solution.unassigned_stops().is_empty());
        assert!(solution.is_feasible());
        assert_eq!(solution.num_assigned_stops(), 5);
    }

    #[test]
    fn test_construction_uses_second_vehicle_when_first_is_full() {
        // Stops 1 and 2 are in opposite directions, each fits a vehicle alone
        let problem = create_problem(
            vec![
                vec![0.0, 100.0, 100.0],
                vec![100.0, 0.0, 300.0],
                vec![100.0, 300.0, 0.0],
            ],
            2,
            250.0,
            10.0,
        );
        let mut solution = WorkingSolution::new(&problem);

        ConstructionBestInsertion::insert_stops(&mut solution, &Constraint::defaults());

        assert!(solution.unassigned_stops().is_empty());
        assert_eq!(solution.route(RouteIdx::new(0)).stops(), stops(&[1]).as_slice());
        assert_eq!(solution.route(RouteIdx::new(1)).stops(), stops(&[2]).as_slice());
    }

    #[test]
    fn test_construction_skips_stops_out_of_reach() {
        let problem = create_problem(
            vec![
                vec![0.0, 10.0, f64::INFINITY],
                vec![10.0, 0.0, 10.0],
                vec![10.0, 10.0, 0.0],
            ],
            1,
            1000.0,
            0.0,
        );
        let mut solution = WorkingSolution::new(&problem);

        ConstructionBestInsertion::insert_stops(&mut solution, &Constraint::defaults());

        // 2 is only reachable through 1
        assert_eq!(solution.route(RouteIdx::new(0)).stops(), stops(&[1, 2]).as_slice());
        assert!(solution.is_feasible());
    }
}
