use std::fmt::Display;

use serde::Serialize;

use crate::solver::solution::working_solution::WorkingSolution;

use super::{
    best_insertion::{BestInsertion, BestInsertionParams, BestInsertionSortStrategy},
    construction_best_insertion::ConstructionBestInsertion,
    recreate_context::RecreateContext,
    recreate_solution::RecreateSolution,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecreateStrategy {
    CompleteBestInsertion,
    BestInsertion(BestInsertionSortStrategy),
}

impl Serialize for RecreateStrategy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Display for RecreateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompleteBestInsertion => write!(f, "CompleteBestInsertion"),
            Self::BestInsertion(sort_method) => write!(f, "BestInsertion({sort_method})"),
        }
    }
}

impl RecreateSolution for RecreateStrategy {
    fn recreate_solution(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        match self {
            RecreateStrategy::CompleteBestInsertion => {
                ConstructionBestInsertion.recreate_solution(solution, context);
            }
            RecreateStrategy::BestInsertion(sort_method) => {
                let strategy = BestInsertion::new(BestInsertionParams {
                    sort_strategy: *sort_method,
                    blink_rate: context.blink_rate,
                });
                strategy.recreate_solution(solution, context);
            }
        }
    }
}
