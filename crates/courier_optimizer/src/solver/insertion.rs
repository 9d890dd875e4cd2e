use crate::{
    problem::stop::StopIdx,
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    utils::enumerate_idx::EnumerateIdx,
};

/// Insert `stop` before the stop currently at `position` in `route_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub route_id: RouteIdx,
    pub position: usize,
    pub stop: StopIdx,
}

/// Calls `consumer` with every position `stop` could take. Empty routes are
/// interchangeable, so only the first one is offered.
pub fn for_each_insertion<C>(solution: &WorkingSolution, stop: StopIdx, mut consumer: C)
where
    C: FnMut(Insertion),
{
    let mut offered_empty_route = false;
    for (route_id, route) in solution.routes().iter().enumerate_idx() {
        if route.is_empty() {
            if offered_empty_route {
                continue;
            }
            offered_empty_route = true;
        }

        for position in 0..=route.len() {
            consumer(Insertion {
                route_id,
                position,
                stop,
            });
        }
    }
}
