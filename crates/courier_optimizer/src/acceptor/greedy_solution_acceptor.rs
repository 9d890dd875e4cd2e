use crate::solver::score::Score;

use super::accept_solution::{AcceptSolution, AcceptSolutionContext};

pub struct GreedySolutionAcceptor;

impl AcceptSolution for GreedySolutionAcceptor {
    fn accept(&self, current: &Score, score: &Score, _context: AcceptSolutionContext) -> bool {
        score < current
    }
}
