use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{coordinate::Coordinate, travel_profile::TravelProfile};

#[derive(Debug, Error)]
pub enum RouteUnavailable {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("no route found from {origin} to {destination}")]
    NoRoute {
        origin: Coordinate,
        destination: Coordinate,
    },

    #[error("invalid travel time from {origin} to {destination}: {seconds}s")]
    InvalidDuration {
        origin: Coordinate,
        destination: Coordinate,
        seconds: f64,
    },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl RouteUnavailable {
    /// Whether repeating the same query may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RouteUnavailable::Request(error) => {
                error.is_timeout()
                    || error.is_connect()
                    || error
                        .status()
                        .is_some_and(|status| status.is_server_error() || status.as_u16() == 429)
            }
            RouteUnavailable::Api { status, .. } => *status == 429 || *status >= 500,
            RouteUnavailable::NoRoute { .. }
            | RouteUnavailable::InvalidDuration { .. }
            | RouteUnavailable::Deserialize(_) => false,
        }
    }
}

/// Point-to-point travel time lookup for a given profile.
///
/// Implementors provide [`TravelTimeOracle::query_travel_time`]; callers should
/// go through [`TravelTimeOracle::time_between`], which short-circuits
/// coincident coordinates and rejects negative durations.
pub trait TravelTimeOracle: Send + Sync {
    fn query_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send;

    fn time_between(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send {
        async move {
            if origin == destination {
                return Ok(SignedDuration::ZERO);
            }

            let duration = self
                .query_travel_time(origin, destination, profile)
                .await?;

            if duration.is_negative() {
                return Err(RouteUnavailable::InvalidDuration {
                    origin,
                    destination,
                    seconds: duration.as_secs_f64(),
                });
            }

            Ok(duration)
        }
    }
}

impl<O: TravelTimeOracle> TravelTimeOracle for &O {
    fn query_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send {
        (**self).query_travel_time(origin, destination, profile)
    }
}

impl<O: TravelTimeOracle> TravelTimeOracle for Arc<O> {
    fn query_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send {
        (**self).query_travel_time(origin, destination, profile)
    }
}
