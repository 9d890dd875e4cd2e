use futures::{StreamExt, TryStreamExt, stream};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, info, instrument, warn};

use crate::{
    coordinate::Coordinate,
    travel_matrices::TravelTimeMatrix,
    travel_profile::TravelProfile,
    travel_time_oracle::{RouteUnavailable, TravelTimeOracle},
};

/// What to do with a pair the oracle cannot route.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnreachablePolicy {
    /// Abort the whole build with [`MatrixBuildFailed`].
    #[default]
    Fail,
    /// Store an infinite cost; the destination can never follow the origin in a tour.
    TreatAsUnreachable,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatrixBuilderParams {
    /// Maximum number of oracle queries in flight.
    pub concurrency: usize,
    pub unreachable_policy: UnreachablePolicy,
}

impl Default for MatrixBuilderParams {
    fn default() -> Self {
        MatrixBuilderParams {
            concurrency: 8,
            unreachable_policy: UnreachablePolicy::Fail,
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to build {profile} matrix, no travel time from location {from} to {to}: {source}")]
pub struct MatrixBuildFailed {
    pub profile: TravelProfile,
    pub from: usize,
    pub to: usize,
    #[source]
    pub source: RouteUnavailable,
}

pub struct MatrixBuilder<O> {
    oracle: O,
    params: MatrixBuilderParams,
}

impl<O> MatrixBuilder<O>
where
    O: TravelTimeOracle,
{
    pub fn new(oracle: O, params: MatrixBuilderParams) -> Self {
        MatrixBuilder { oracle, params }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn params(&self) -> &MatrixBuilderParams {
        &self.params
    }

    /// Queries every ordered pair of `locations` and returns the complete matrix.
    ///
    /// Queries run concurrently but results are consumed in row-major order,
    /// so with [`UnreachablePolicy::Fail`] the reported pair is always the
    /// first failing one.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub async fn build_matrix(
        &self,
        locations: &[Coordinate],
        profile: TravelProfile,
    ) -> Result<TravelTimeMatrix, MatrixBuildFailed> {
        let num_locations = locations.len();
        info!(
            "Building {} matrix for {} locations ({} queries)",
            profile,
            num_locations,
            num_locations * num_locations.saturating_sub(1)
        );

        let pairs = (0..num_locations).flat_map(|from| {
            (0..num_locations)
                .filter(move |&to| to != from)
                .map(move |to| (from, to))
        });

        let entries: Vec<(usize, usize, f64)> = stream::iter(pairs)
            .map(|(from, to)| self.query_pair(locations, profile, from, to))
            .buffered(self.params.concurrency.max(1))
            .try_collect()
            .await?;

        let mut times = vec![0.0; num_locations * num_locations];
        for (from, to, secs) in entries {
            times[from * num_locations + to] = secs;
        }

        Ok(TravelTimeMatrix::from_flat(num_locations, times))
    }

    async fn query_pair(
        &self,
        locations: &[Coordinate],
        profile: TravelProfile,
        from: usize,
        to: usize,
    ) -> Result<(usize, usize, f64), MatrixBuildFailed> {
        match self
            .oracle
            .time_between(locations[from], locations[to], profile)
            .await
        {
            Ok(duration) => Ok((from, to, duration.as_secs_f64())),
            Err(source) => match self.params.unreachable_policy {
                UnreachablePolicy::Fail => Err(MatrixBuildFailed {
                    profile,
                    from,
                    to,
                    source,
                }),
                UnreachablePolicy::TreatAsUnreachable => {
                    warn!(
                        "No {} route from location {} to {}, treating as unreachable: {}",
                        profile, from, to, source
                    );
                    Ok((from, to, f64::INFINITY))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::atomic::Ordering, time::Duration};

    use crate::test_utils::{MockOracle, create_coordinates};

    use super::*;

    #[tokio::test]
    async fn test_build_matrix_queries_every_ordered_pair() {
        let oracle = MockOracle::default();
        let locations = create_coordinates(4);
        let builder = MatrixBuilder::new(&oracle, MatrixBuilderParams::default());

        let matrix = builder
            .build_matrix(&locations, TravelProfile::Bike)
            .await
            .unwrap();

        assert_eq!(matrix.num_locations(), 4);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 12);

        for from in 0..4 {
            for to in 0..4 {
                let expected = if from == to {
                    0.0
                } else {
                    oracle.secs(locations[from], locations[to])
                };
                assert_eq!(matrix.travel_secs(from, to), expected);
            }
        }
    }

    #[tokio::test]
    async fn test_build_matrix_keeps_direction() {
        let oracle = MockOracle::default();
        let locations = create_coordinates(3);
        let builder = MatrixBuilder::new(&oracle, MatrixBuilderParams::default());

        let matrix = builder
            .build_matrix(&locations, TravelProfile::Bike)
            .await
            .unwrap();

        assert!(!matrix.is_symmetric());
        assert!(matrix.travel_secs(0, 1) > matrix.travel_secs(1, 0));
    }

    #[tokio::test]
    async fn test_coincident_locations_cost_nothing() {
        let oracle = MockOracle::default();
        let mut locations = create_coordinates(2);
        locations.push(locations[1]);
        let builder = MatrixBuilder::new(&oracle, MatrixBuilderParams::default());

        let matrix = builder
            .build_matrix(&locations, TravelProfile::Car)
            .await
            .unwrap();

        assert_eq!(matrix.travel_secs(1, 2), 0.0);
        assert_eq!(matrix.travel_secs(2, 1), 0.0);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_failure_names_first_failing_pair() {
        let locations = create_coordinates(4);
        let oracle = MockOracle {
            failing: vec![(locations[2], locations[1]), (locations[1], locations[3])],
            ..MockOracle::default()
        };
        let builder = MatrixBuilder::new(&oracle, MatrixBuilderParams::default());

        let error = builder
            .build_matrix(&locations, TravelProfile::Bike)
            .await
            .unwrap_err();

        assert_eq!(error.profile, TravelProfile::Bike);
        assert_eq!((error.from, error.to), (1, 3));
        assert!(matches!(error.source, RouteUnavailable::NoRoute { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_pairs_become_infinite() {
        let locations = create_coordinates(3);
        let oracle = MockOracle {
            failing: vec![(locations[0], locations[2])],
            ..MockOracle::default()
        };
        let builder = MatrixBuilder::new(
            &oracle,
            MatrixBuilderParams {
                unreachable_policy: UnreachablePolicy::TreatAsUnreachable,
                ..MatrixBuilderParams::default()
            },
        );

        let matrix = builder
            .build_matrix(&locations, TravelProfile::Bike)
            .await
            .unwrap();

        assert!(!matrix.is_reachable(0, 2));
        assert!(matrix.is_reachable(2, 0));
        assert!(matrix.is_reachable(0, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let oracle = MockOracle {
            delay: Some(Duration::from_millis(50)),
            ..MockOracle::default()
        };
        let locations = create_coordinates(5);
        let builder = MatrixBuilder::new(
            &oracle,
            MatrixBuilderParams {
                concurrency: 3,
                ..MatrixBuilderParams::default()
            },
        );

        builder
            .build_matrix(&locations, TravelProfile::Bike)
            .await
            .unwrap();

        assert_eq!(oracle.calls.load(Ordering::SeqCst), 20);
        assert_eq!(oracle.max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_and_single_location() {
        let oracle = MockOracle::default();
        let builder = MatrixBuilder::new(&oracle, MatrixBuilderParams::default());

        let empty = builder.build_matrix(&[], TravelProfile::Bike).await.unwrap();
        assert_eq!(empty.num_locations(), 0);

        let depot_only = builder
            .build_matrix(&create_coordinates(1), TravelProfile::Bike)
            .await
            .unwrap();
        assert_eq!(depot_only.num_locations(), 1);
        assert_eq!(depot_only.travel_secs(0, 0), 0.0);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }
}
