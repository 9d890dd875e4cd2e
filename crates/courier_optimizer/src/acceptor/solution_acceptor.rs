use crate::solver::score::Score;

use super::{
    accept_solution::{AcceptSolution, AcceptSolutionContext},
    greedy_solution_acceptor::GreedySolutionAcceptor,
    schrimpf_acceptor::SchrimpfAcceptor,
};

pub enum SolutionAcceptor {
    Greedy(GreedySolutionAcceptor),
    Schrimpf(SchrimpfAcceptor),
}

impl AcceptSolution for SolutionAcceptor {
    fn accept(&self, current: &Score, score: &Score, context: AcceptSolutionContext) -> bool {
        match self {
            SolutionAcceptor::Greedy(acceptor) => acceptor.accept(current, score, context),
            SolutionAcceptor::Schrimpf(acceptor) => acceptor.accept(current, score, context),
        }
    }
}
