use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, JsonSchema, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TravelProfile {
    Car,
    Bike,
    Foot,
    SmallTruck,
    Truck,
}

impl TravelProfile {
    pub const ALL: [TravelProfile; 5] = [
        TravelProfile::Car,
        TravelProfile::Bike,
        TravelProfile::Foot,
        TravelProfile::SmallTruck,
        TravelProfile::Truck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelProfile::Car => "car",
            TravelProfile::Bike => "bike",
            TravelProfile::Foot => "foot",
            TravelProfile::SmallTruck => "small_truck",
            TravelProfile::Truck => "truck",
        }
    }
}

impl Display for TravelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelProfile::ALL
            .into_iter()
            .find(|profile| profile.as_str() == s)
            .ok_or_else(|| format!("unknown travel profile '{s}'"))
    }
}
