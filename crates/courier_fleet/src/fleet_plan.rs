use courier_matrix_providers::{coordinate::Coordinate, travel_profile::TravelProfile};
use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stop_id::StopId;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid fleet plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("depot coordinate {0} is out of range")]
    InvalidDepot(Coordinate),

    #[error("stop {stop} has an out of range coordinate {coordinate}")]
    InvalidStop { stop: StopId, coordinate: Coordinate },

    #[error("class {class} has a negative {field}")]
    NegativeDuration { class: String, field: &'static str },

    #[error("class {class} declares {vehicle_count} vehicles but names {names}")]
    TooManyVehicleNames {
        class: String,
        vehicle_count: usize,
        names: usize,
    },
}

/// Everything the allocator needs: where tours start, what to visit, and
/// which vehicle classes to use, in priority order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FleetPlan {
    pub depot: Coordinate,
    pub stops: Vec<Coordinate>,
    /// Earlier classes claim stops first.
    pub classes: Vec<VehicleClass>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct VehicleClass {
    pub name: String,
    pub profile: TravelProfile,

    #[serde(default)]
    pub vehicles: Vec<String>,

    /// Defaults to the number of `vehicles` names. Unnamed vehicles are
    /// called `"{name} {n}"`.
    pub vehicle_count: Option<usize>,

    /// Maximum travel plus service time of a single tour.
    pub time_budget: SignedDuration,

    /// Time spent at every visited stop.
    #[serde(default)]
    pub service_time: SignedDuration,
}

impl VehicleClass {
    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count.unwrap_or(self.vehicles.len())
    }

    pub fn vehicle_names(&self) -> Vec<String> {
        (0..self.vehicle_count())
            .map(|index| {
                self.vehicles
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| format!("{} {}", self.name, index + 1))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.time_budget.is_negative() {
            return Err(PlanError::NegativeDuration {
                class: self.name.clone(),
                field: "time_budget",
            });
        }

        if self.service_time.is_negative() {
            return Err(PlanError::NegativeDuration {
                class: self.name.clone(),
                field: "service_time",
            });
        }

        if self.vehicles.len() > self.vehicle_count() {
            return Err(PlanError::TooManyVehicleNames {
                class: self.name.clone(),
                vehicle_count: self.vehicle_count(),
                names: self.vehicles.len(),
            });
        }

        Ok(())
    }
}

impl FleetPlan {
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let plan: FleetPlan = serde_json::from_str(json)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Two bikes followed by one car, each working a 7 hour day with 30
    /// minutes at every stop.
    pub fn reference(depot: Coordinate, stops: Vec<Coordinate>) -> Self {
        let time_budget = SignedDuration::from_hours(7);
        let service_time = SignedDuration::from_mins(30);

        FleetPlan {
            depot,
            stops,
            classes: vec![
                VehicleClass {
                    name: String::from("Bike"),
                    profile: TravelProfile::Bike,
                    vehicles: vec![String::from("Bike 1"), String::from("Bike 2")],
                    vehicle_count: None,
                    time_budget,
                    service_time,
                },
                VehicleClass {
                    name: String::from("Car"),
                    profile: TravelProfile::Car,
                    vehicles: vec![String::from("Car 1")],
                    vehicle_count: None,
                    time_budget,
                    service_time,
                },
            ],
        }
    }

    pub fn stop_ids(&self) -> impl Iterator<Item = StopId> + use<> {
        (0..self.stops.len()).map(StopId::new)
    }

    pub fn stop(&self, stop: StopId) -> Coordinate {
        self.stops[stop.get()]
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.depot.is_valid() {
            return Err(PlanError::InvalidDepot(self.depot));
        }

        if let Some((index, coordinate)) = self
            .stops
            .iter()
            .enumerate()
            .find(|(_, coordinate)| !coordinate.is_valid())
        {
            return Err(PlanError::InvalidStop {
                stop: StopId::new(index),
                coordinate: *coordinate,
            });
        }

        self.classes.iter().try_for_each(VehicleClass::validate)
    }
}
