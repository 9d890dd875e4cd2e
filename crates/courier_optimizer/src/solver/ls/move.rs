use crate::solver::{
    ls::{inter_relocate::InterRelocateOperator, relocate::RelocateOperator, two_opt::TwoOptOperator},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

pub trait LocalSearchOperator: Sized {
    fn generate_moves<C>(solution: &WorkingSolution, routes: (RouteIdx, RouteIdx), consumer: C)
    where
        C: FnMut(Self);

    /// Change in total travel seconds if the move is applied.
    fn travel_delta(&self, solution: &WorkingSolution) -> f64;

    /// Whether every touched route stays within the working-time budget.
    fn is_valid(&self, solution: &WorkingSolution) -> bool;

    fn apply(&self, solution: &mut WorkingSolution);

    fn updated_routes(&self) -> Vec<RouteIdx>;
}

#[derive(Debug)]
pub enum LocalSearchMove {
    /// 2-Opt operator that reverses the segment between two positions in a route.
    TwoOpt(TwoOptOperator),
    /// Relocate operator that moves a stop to another position within the same route.
    Relocate(RelocateOperator),
    /// Inter-route Relocate operator that moves a stop from one route to another.
    InterRelocate(InterRelocateOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::TwoOpt(_) => "TwoOpt",
            LocalSearchMove::Relocate(_) => "Relocate",
            LocalSearchMove::InterRelocate(_) => "InterRelocate",
        }
    }

    pub fn travel_delta(&self, solution: &WorkingSolution) -> f64 {
        match self {
            LocalSearchMove::TwoOpt(op) => op.travel_delta(solution),
            LocalSearchMove::Relocate(op) => op.travel_delta(solution),
            LocalSearchMove::InterRelocate(op) => op.travel_delta(solution),
        }
    }

    pub fn is_valid(&self, solution: &WorkingSolution) -> bool {
        match self {
            LocalSearchMove::TwoOpt(op) => op.is_valid(solution),
            LocalSearchMove::Relocate(op) => op.is_valid(solution),
            LocalSearchMove::InterRelocate(op) => op.is_valid(solution),
        }
    }

    pub fn apply(&self, solution: &mut WorkingSolution) {
        match self {
            LocalSearchMove::TwoOpt(op) => op.apply(solution),
            LocalSearchMove::Relocate(op) => op.apply(solution),
            LocalSearchMove::InterRelocate(op) => op.apply(solution),
        }
    }

    pub fn updated_routes(&self) -> Vec<RouteIdx> {
        match self {
            LocalSearchMove::TwoOpt(op) => op.updated_routes(),
            LocalSearchMove::Relocate(op) => op.updated_routes(),
            LocalSearchMove::InterRelocate(op) => op.updated_routes(),
        }
    }
}
