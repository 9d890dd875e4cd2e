use crate::solver::score::Score;

pub struct AcceptSolutionContext {
    pub iteration: usize,
    pub max_iterations: Option<usize>,
}

pub trait AcceptSolution {
    /// Whether `score` should replace `current` as the solution the search
    /// continues from.
    fn accept(&self, current: &Score, score: &Score, context: AcceptSolutionContext) -> bool;
}
