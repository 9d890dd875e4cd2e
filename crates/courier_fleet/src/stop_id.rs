use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Position of a stop in [`FleetPlan::stops`](crate::fleet_plan::FleetPlan).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct StopId(usize);

impl StopId {
    pub const fn new(index: usize) -> Self {
        StopId(index)
    }

    pub const fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for StopId {
    fn from(value: usize) -> Self {
        StopId(value)
    }
}

impl Display for StopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
