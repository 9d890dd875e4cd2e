use super::ruin_strategy::RuinStrategy;

#[derive(Clone, Debug)]
pub struct RuinParams {
    pub ruin_strategies: Vec<RuinStrategy>,
    pub ruin_minimum_size: usize,
    pub ruin_maximum_size: usize,
    /// Upper bound as a share of the assigned stops.
    pub ruin_maximum_ratio: f64,
}

impl RuinParams {
    /// Number of stops to remove from a solution with `num_assigned` stops,
    /// before randomization.
    pub fn size_range(&self, num_assigned: usize) -> (usize, usize) {
        let by_ratio = (num_assigned as f64 * self.ruin_maximum_ratio).ceil() as usize;
        let maximum = self.ruin_maximum_size.min(by_ratio).min(num_assigned);
        let minimum = self.ruin_minimum_size.min(maximum);
        (minimum, maximum)
    }
}

impl Default for RuinParams {
    fn default() -> Self {
        RuinParams {
            ruin_strategies: vec![RuinStrategy::Random, RuinStrategy::Radial, RuinStrategy::Route],
            ruin_minimum_size: 1,
            ruin_maximum_size: 12,
            ruin_maximum_ratio: 0.4,
        }
    }
}
