use super::{best_insertion::BestInsertionSortStrategy, recreate_strategy::RecreateStrategy};

#[derive(Clone, Debug)]
pub struct RecreateParams {
    pub recreate_strategies: Vec<RecreateStrategy>,
    /// Chance of skipping an insertion position, for diversification.
    pub blink_rate: f64,
}

impl Default for RecreateParams {
    fn default() -> Self {
        RecreateParams {
            blink_rate: 0.01,
            recreate_strategies: vec![
                RecreateStrategy::BestInsertion(BestInsertionSortStrategy::Random),
                RecreateStrategy::BestInsertion(BestInsertionSortStrategy::Far),
                RecreateStrategy::BestInsertion(BestInsertionSortStrategy::Close),
                RecreateStrategy::CompleteBestInsertion,
            ],
        }
    }
}
