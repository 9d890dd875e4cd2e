use rand::rngs::SmallRng;

use crate::solver::{
    constraints::constraint::{Constraint, compute_insertion_score},
    insertion::Insertion,
    insertion_context::InsertionContext,
    score::Score,
    solution::working_solution::WorkingSolution,
};

pub struct RecreateContext<'a> {
    pub rng: &'a mut SmallRng,
    pub constraints: &'a [Constraint],
    pub blink_rate: f64,
}

impl<'a> RecreateContext<'a> {
    pub fn compute_insertion_score(&self, solution: &WorkingSolution, insertion: &Insertion) -> Score {
        score_insertion(self.constraints, solution, insertion)
    }
}

pub fn score_insertion(
    constraints: &[Constraint],
    solution: &WorkingSolution,
    insertion: &Insertion,
) -> Score {
    let context = InsertionContext::new(solution, insertion);
    compute_insertion_score(constraints, &context)
}
