use crate::{
    problem::tour_problem::TourProblem,
    solver::{
        insertion::Insertion,
        solution::{route::WorkingSolutionRoute, working_solution::WorkingSolution},
    },
};

pub struct InsertionContext<'a> {
    solution: &'a WorkingSolution<'a>,
    pub insertion: &'a Insertion,
}

impl<'a> InsertionContext<'a> {
    pub fn new(solution: &'a WorkingSolution<'a>, insertion: &'a Insertion) -> Self {
        InsertionContext {
            solution,
            insertion,
        }
    }

    pub fn problem(&self) -> &TourProblem {
        self.solution.problem()
    }

    pub fn solution(&self) -> &WorkingSolution<'a> {
        self.solution
    }

    pub fn route(&self) -> &WorkingSolutionRoute {
        self.solution.route(self.insertion.route_id)
    }

    pub fn travel_delta(&self) -> f64 {
        self.route()
            .insertion_travel_delta(self.problem(), self.insertion.stop, self.insertion.position)
    }

    pub fn new_travel_secs(&self) -> f64 {
        self.route().travel_secs() + self.travel_delta()
    }

    pub fn new_working_secs(&self) -> f64 {
        self.problem()
            .working_secs(self.new_travel_secs(), self.route().len() + 1)
    }
}
