use std::{iter, sync::Arc};

use courier_matrix_providers::{
    coordinate::Coordinate,
    matrix_builder::{MatrixBuildFailed, MatrixBuilder, MatrixBuilderParams},
    travel_time_oracle::TravelTimeOracle,
};
use courier_optimizer::{problem::tour_problem::TourProblem, solver::tour_optimizer::TourOptimizer};
use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, debug, info, instrument, warn};

use crate::{
    allocation::{ClassAllocation, FleetAllocation},
    fleet_plan::{FleetPlan, PlanError, VehicleClass},
    stop_id::StopId,
};

/// What to do when a class matrix cannot be built.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassFailurePolicy {
    /// Stop the run and report the failing class.
    #[default]
    Abort,
    /// Leave the class idle and hand its whole pool to the next class.
    SkipClass,
}

#[derive(Debug, Clone, Default)]
pub struct AllocatorParams {
    pub matrix: MatrixBuilderParams,
    pub failure_policy: ClassFailurePolicy,
}

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error(transparent)]
    InvalidPlan(#[from] PlanError),

    #[error("class {class}: {source}")]
    MatrixBuildFailed {
        class: String,
        #[source]
        source: MatrixBuildFailed,
    },

    /// The run exceeded its budget. Carries the classes that completed.
    #[error("allocation timed out after {} completed classes", .0.classes.len())]
    TimedOut(FleetAllocation),
}

/// Allocates stops to vehicle classes one class at a time. Each class only
/// sees the stops earlier classes left unserved.
pub struct FleetAllocator<O, T> {
    matrix_builder: MatrixBuilder<O>,
    optimizer: T,
    failure_policy: ClassFailurePolicy,
}

impl<O, T> FleetAllocator<O, T>
where
    O: TravelTimeOracle,
    T: TourOptimizer,
{
    pub fn new(oracle: O, optimizer: T, params: AllocatorParams) -> Self {
        FleetAllocator {
            matrix_builder: MatrixBuilder::new(oracle, params.matrix),
            optimizer,
            failure_policy: params.failure_policy,
        }
    }

    pub fn oracle(&self) -> &O {
        self.matrix_builder.oracle()
    }

    pub fn optimizer(&self) -> &T {
        &self.optimizer
    }

    pub async fn allocate(&self, plan: &FleetPlan) -> Result<FleetAllocation, AllocationError> {
        plan.validate()?;

        let mut allocation = FleetAllocation::new(plan.stop_ids().collect());
        self.run(plan, &mut allocation).await?;
        Ok(allocation)
    }

    /// Same as [`FleetAllocator::allocate`] but gives up once `budget` has
    /// elapsed. The budget is checked while waiting on the oracle, an
    /// optimizer call always runs to completion.
    pub async fn allocate_within(
        &self,
        plan: &FleetPlan,
        budget: SignedDuration,
    ) -> Result<FleetAllocation, AllocationError> {
        plan.validate()?;

        let mut allocation = FleetAllocation::new(plan.stop_ids().collect());
        // A negative budget is already spent
        let budget = budget.max(SignedDuration::ZERO);
        let result = tokio::time::timeout(budget.unsigned_abs(), self.run(plan, &mut allocation)).await;

        match result {
            Ok(Ok(())) => Ok(allocation),
            Ok(Err(err)) => Err(err),
            Err(_) => {
                warn!(
                    ?budget,
                    completed = allocation.classes.len(),
                    "Allocation timed out"
                );
                Err(AllocationError::TimedOut(allocation))
            }
        }
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    async fn run(&self, plan: &FleetPlan, allocation: &mut FleetAllocation) -> Result<(), AllocationError> {
        for class in &plan.classes {
            let pool = allocation.unvisited.clone();
            let class_allocation = self.allocate_class(plan, class, &pool).await?;

            info!(
                class = %class.name,
                profile = %class.profile,
                served = class_allocation.served().len(),
                residual = class_allocation.residual.len(),
                "Class allocated"
            );

            allocation.push(class_allocation);
        }

        Ok(())
    }

    async fn allocate_class(
        &self,
        plan: &FleetPlan,
        class: &VehicleClass,
        pool: &[StopId],
    ) -> Result<ClassAllocation, AllocationError> {
        if class.vehicle_count() == 0 {
            debug!(class = %class.name, "No vehicles, passing the pool on");
            return Ok(ClassAllocation::idle(class, pool, false));
        }

        let locations: Vec<Coordinate> = iter::once(plan.depot)
            .chain(pool.iter().map(|&stop| plan.stop(stop)))
            .collect();

        let matrix = match self.matrix_builder.build_matrix(&locations, class.profile).await {
            Ok(matrix) => matrix,
            Err(source) => match self.failure_policy {
                ClassFailurePolicy::Abort => {
                    return Err(AllocationError::MatrixBuildFailed {
                        class: class.name.clone(),
                        source,
                    });
                }
                ClassFailurePolicy::SkipClass => {
                    warn!(class = %class.name, error = %source, "Skipping class");
                    return Ok(ClassAllocation::idle(class, pool, true));
                }
            },
        };

        let problem = TourProblem::new(
            Arc::new(matrix),
            class.vehicle_count(),
            class.time_budget,
            class.service_time,
        );
        let solution = self.optimizer.solve(&problem);

        Ok(ClassAllocation::from_solution(class, pool, solution))
    }
}

#[cfg(test)]
mod tests {
    use courier_matrix_providers::{
        as_the_crow_flies::AsTheCrowFliesOracle, travel_profile::TravelProfile,
    };
    use courier_optimizer::solver::{
        solver_params::{SolverParams, Termination},
        tour_optimizer::RuinRecreateOptimizer,
    };
    use fxhash::FxHashSet;

    use crate::{
        stop_pool::REFERENCE_DEPOT,
        test_utils::{RecordingOracle, ScriptedOptimizer, create_class, create_plan, ids},
    };

    use super::*;

    fn optimizer() -> RuinRecreateOptimizer {
        RuinRecreateOptimizer::new(SolverParams {
            terminations: vec![Termination::Iterations(100)],
            ..SolverParams::default()
        })
    }

    #[tokio::test]
    async fn test_later_class_only_sees_residual_pool() {
        let plan = create_plan(
            10,
            vec![
                create_class("A", TravelProfile::Bike, 1, 600),
                create_class("B", TravelProfile::Car, 1, 600),
            ],
        );

        // Matrix locations 1, 3, 5, 7, 9 are the first, third, ... stop
        let optimizer = ScriptedOptimizer::new(vec![vec![vec![1, 3, 5, 7, 9]], vec![vec![]]]);
        let oracle = RecordingOracle::default();
        let allocator = FleetAllocator::new(&oracle, &optimizer, AllocatorParams::default());

        let allocation = allocator.allocate(&plan).await.unwrap();

        assert_eq!(allocation.classes[0].served(), ids(&[0, 2, 4, 6, 8]));
        assert_eq!(allocation.classes[0].residual, ids(&[1, 3, 5, 7, 9]));
        assert_eq!(optimizer.seen_stop_counts(), vec![10, 5]);

        let car_locations: FxHashSet<usize> = oracle
            .queried_locations(&plan, TravelProfile::Car)
            .into_iter()
            .collect();
        let expected: FxHashSet<usize> = [1, 3, 5, 7, 9].into_iter().collect();
        assert_eq!(car_locations, expected);

        assert_eq!(allocation.unvisited, ids(&[1, 3, 5, 7, 9]));
    }

    #[tokio::test]
    async fn test_classes_never_share_stops() {
        let plan = create_plan(
            12,
            vec![
                create_class("Bike", TravelProfile::Bike, 2, 5400),
                create_class("Car", TravelProfile::Car, 1, 5400),
            ],
        );
        let allocator = FleetAllocator::new(
            AsTheCrowFliesOracle::default(),
            optimizer(),
            AllocatorParams::default(),
        );

        let allocation = allocator.allocate(&plan).await.unwrap();

        let mut seen = FxHashSet::default();
        for class in &allocation.classes {
            for tour in &class.tours {
                assert!(tour.duration <= SignedDuration::from_secs(5400));
                for &stop in &tour.stops {
                    assert!(seen.insert(stop), "stop {stop} served twice");
                }
            }
        }

        assert_eq!(seen.len() + allocation.unvisited.len(), plan.stops.len());
        assert_eq!(allocation.served_count(), seen.len());
    }

    #[tokio::test]
    async fn test_reference_scenario() {
        let stops = vec![
            Coordinate::new(56.1572, 10.2107),
            Coordinate::new(56.1496, 10.1812),
            Coordinate::new(56.1700, 10.1600),
            Coordinate::new(56.1650, 10.1200),
        ];
        let mut plan = create_plan(0, vec![create_class("Bike", TravelProfile::Bike, 1, 480 * 60)]);
        plan.depot = REFERENCE_DEPOT;
        plan.stops = stops;
        plan.classes[0].service_time = SignedDuration::from_mins(30);

        let allocator = FleetAllocator::new(
            AsTheCrowFliesOracle::default(),
            optimizer(),
            AllocatorParams::default(),
        );

        let allocation = allocator.allocate(&plan).await.unwrap();
        let tour = &allocation.classes[0].tours[0];
        assert_eq!(tour.stops.len(), 4);
        assert!(tour.duration <= SignedDuration::from_mins(480));
        assert!(allocation.unvisited.is_empty());

        // Shorter than any round trip to a single stop
        plan.classes[0].time_budget = SignedDuration::from_mins(30);
        let allocation = allocator.allocate(&plan).await.unwrap();
        assert!(allocation.classes[0].tours[0].is_empty());
        assert_eq!(allocation.unvisited, ids(&[0, 1, 2, 3]));
    }

    #[tokio::test]
    async fn test_zero_vehicles_pass_the_pool_on() {
        let plan = create_plan(
            4,
            vec![
                create_class("Nobody", TravelProfile::Foot, 0, 3600),
                create_class("Car", TravelProfile::Car, 1, 36_000),
            ],
        );
        let oracle = RecordingOracle::default();
        let allocator = FleetAllocator::new(&oracle, optimizer(), AllocatorParams::default());

        let allocation = allocator.allocate(&plan).await.unwrap();

        assert!(allocation.classes[0].tours.is_empty());
        assert_eq!(allocation.classes[0].residual, ids(&[0, 1, 2, 3]));
        assert!(oracle.queried_locations(&plan, TravelProfile::Foot).is_empty());
        assert!(allocation.unvisited.is_empty());
    }

    #[tokio::test]
    async fn test_empty_pool_gives_depot_only_tours() {
        let plan = create_plan(0, vec![create_class("Bike", TravelProfile::Bike, 3, 3600)]);
        let allocator = FleetAllocator::new(
            RecordingOracle::default(),
            optimizer(),
            AllocatorParams::default(),
        );

        let allocation = allocator.allocate(&plan).await.unwrap();

        let tours = &allocation.classes[0].tours;
        assert_eq!(tours.len(), 3);
        assert!(tours.iter().all(|tour| tour.is_empty() && tour.duration.is_zero()));
        assert_eq!(allocator.oracle().calls(), 0);
    }

    #[tokio::test]
    async fn test_matrix_failure_aborts_by_default() {
        let plan = create_plan(
            3,
            vec![
                create_class("Bike", TravelProfile::Bike, 1, 3600),
                create_class("Car", TravelProfile::Car, 1, 3600),
            ],
        );
        let oracle = RecordingOracle::failing_for(TravelProfile::Bike);
        let allocator = FleetAllocator::new(oracle, optimizer(), AllocatorParams::default());

        let result = allocator.allocate(&plan).await;

        match result {
            Err(AllocationError::MatrixBuildFailed { class, source }) => {
                assert_eq!(class, "Bike");
                assert_eq!((source.from, source.to), (0, 1));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_matrix_failure_can_skip_class() {
        let plan = create_plan(
            3,
            vec![
                create_class("Bike", TravelProfile::Bike, 1, 3600),
                create_class("Car", TravelProfile::Car, 1, 36_000),
            ],
        );
        let oracle = RecordingOracle::failing_for(TravelProfile::Bike);
        let allocator = FleetAllocator::new(
            oracle,
            optimizer(),
            AllocatorParams {
                failure_policy: ClassFailurePolicy::SkipClass,
                ..AllocatorParams::default()
            },
        );

        let allocation = allocator.allocate(&plan).await.unwrap();

        assert!(allocation.classes[0].skipped);
        assert_eq!(allocation.classes[0].residual, ids(&[0, 1, 2]));
        assert!(!allocation.classes[1].skipped);
        assert_eq!(allocation.classes[1].served(), ids(&[0, 1, 2]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_returns_completed_classes() {
        let plan = create_plan(
            3,
            vec![
                create_class("Bike", TravelProfile::Bike, 1, 1),
                create_class("Car", TravelProfile::Car, 1, 36_000),
            ],
        );
        // The bike serves nothing, so the car gets the whole pool. Car queries
        // take a minute each, bike queries are instant
        let oracle = RecordingOracle::slow_for(TravelProfile::Car, std::time::Duration::from_secs(60));
        let allocator = FleetAllocator::new(oracle, optimizer(), AllocatorParams::default());

        let result = allocator
            .allocate_within(&plan, SignedDuration::from_secs(30))
            .await;

        match result {
            Err(AllocationError::TimedOut(partial)) => {
                assert_eq!(partial.classes.len(), 1);
                assert_eq!(partial.classes[0].class, "Bike");
                assert!(partial.classes[0].served().is_empty());
                assert_eq!(partial.unvisited, ids(&[0, 1, 2]));
                assert_eq!(partial.unvisited, partial.classes[0].residual);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_budget_times_out_immediately() {
        let plan = create_plan(3, vec![create_class("Car", TravelProfile::Car, 1, 36_000)]);
        let oracle = RecordingOracle::slow_for(TravelProfile::Car, std::time::Duration::from_secs(60));
        let allocator = FleetAllocator::new(oracle, optimizer(), AllocatorParams::default());

        let result = allocator
            .allocate_within(&plan, SignedDuration::from_secs(-120))
            .await;

        match result {
            Err(AllocationError::TimedOut(partial)) => {
                assert!(partial.classes.is_empty());
                assert_eq!(partial.unvisited, ids(&[0, 1, 2]));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_plan_is_rejected() {
        let mut plan = create_plan(1, vec![create_class("Bike", TravelProfile::Bike, 1, 3600)]);
        plan.depot = Coordinate::new(f64::NAN, 0.0);
        let allocator = FleetAllocator::new(
            RecordingOracle::default(),
            optimizer(),
            AllocatorParams::default(),
        );

        assert!(matches!(
            allocator.allocate(&plan).await,
            Err(AllocationError::InvalidPlan(PlanError::InvalidDepot(_)))
        ));
    }
}
