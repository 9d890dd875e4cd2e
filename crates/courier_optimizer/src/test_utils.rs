use std::sync::Arc;

use courier_matrix_providers::travel_matrices::TravelTimeMatrix;
use jiff::SignedDuration;

use crate::{
    problem::{stop::StopIdx, tour_problem::TourProblem},
    solver::{
        insertion::Insertion,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

pub fn create_problem(
    rows: Vec<Vec<f64>>,
    vehicle_count: usize,
    budget_secs: f64,
    service_secs: f64,
) -> TourProblem {
    let matrix = TravelTimeMatrix::from_rows(rows).unwrap();
    TourProblem::new(
        Arc::new(matrix),
        vehicle_count,
        SignedDuration::from_secs_f64(budget_secs),
        SignedDuration::from_secs_f64(service_secs),
    )
}

/// Depot and stops on a line, one minute apart.
pub fn create_line_problem(
    num_stops: usize,
    vehicle_count: usize,
    budget_secs: f64,
    service_secs: f64,
) -> TourProblem {
    let rows: Vec<Vec<f64>> = (0..=num_stops)
        .map(|from| {
            (0..=num_stops)
                .map(|to| 60.0 * from.abs_diff(to) as f64)
                .collect()
        })
        .collect();

    create_problem(rows, vehicle_count, budget_secs, service_secs)
}

pub fn create_working_solution(problem: &TourProblem, routes: Vec<Vec<usize>>) -> WorkingSolution<'_> {
    let mut solution = WorkingSolution::new(problem);
    for (route_id, route) in routes.into_iter().enumerate() {
        for (position, stop) in route.into_iter().enumerate() {
            solution.insert(&Insertion {
                route_id: RouteIdx::new(route_id),
                position,
                stop: StopIdx::new(stop),
            });
        }
    }
    solution
}

pub fn stops(ids: &[usize]) -> Vec<StopIdx> {
    ids.iter().copied().map(StopIdx::new).collect()
}
