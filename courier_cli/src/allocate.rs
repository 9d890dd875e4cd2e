use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use courier_fleet::{
    allocation::FleetAllocation,
    fleet_allocator::{AllocationError, AllocatorParams, ClassFailurePolicy, FleetAllocator},
    fleet_plan::FleetPlan,
    stop_pool::{REFERENCE_DEPOT, StopBounds, StopPool},
};
use courier_matrix_providers::{
    as_the_crow_flies::AsTheCrowFliesOracle, travel_time_oracle::TravelTimeOracle,
};
use courier_optimizer::solver::{
    solver_params::{SolverParams, Termination},
    tour_optimizer::RuinRecreateOptimizer,
};
use jiff::SignedDuration;
use tracing::{info, warn};

use crate::{
    file_utils,
    oracle::{self, OracleArgs},
    parsers,
    report::AllocationReport,
};

#[derive(Args)]
pub struct AllocateArgs {
    /// Fleet plan JSON, see `generate json-schema`
    #[arg(short, long, conflicts_with = "random_stops")]
    plan: Option<PathBuf>,

    /// Number of random stops around Aarhus for the reference fleet
    #[arg(long, default_value_t = 50)]
    random_stops: usize,

    /// Seed for the random stops
    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[command(flatten)]
    oracle: OracleArgs,

    /// Overall budget for the run (e.g., "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<SignedDuration>,

    /// Solver iterations per class
    #[arg(long, short = 'n')]
    iterations: Option<usize>,

    /// Pass a class over when its matrix cannot be built
    #[arg(long)]
    skip_failed_classes: bool,

    /// Write the allocation as JSON
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

fn solver_params(iterations: Option<usize>) -> SolverParams {
    match iterations {
        Some(iterations) => SolverParams {
            terminations: vec![
                Termination::Iterations(iterations),
                Termination::IterationsWithoutImprovement(iterations),
            ],
            ..SolverParams::default()
        },
        None => SolverParams::default(),
    }
}

async fn allocate<O: TravelTimeOracle>(
    oracle: O,
    plan: &FleetPlan,
    params: AllocatorParams,
    solver_params: SolverParams,
    timeout: Option<SignedDuration>,
) -> Result<FleetAllocation, AllocationError> {
    let allocator = FleetAllocator::new(oracle, RuinRecreateOptimizer::new(solver_params), params);

    match timeout {
        Some(budget) => allocator.allocate_within(plan, budget).await,
        None => allocator.allocate(plan).await,
    }
}

pub async fn run(args: AllocateArgs) -> anyhow::Result<()> {
    let plan = match &args.plan {
        Some(path) => file_utils::read_plan(path)?,
        None => FleetPlan::reference(
            REFERENCE_DEPOT,
            StopPool::random(args.random_stops, StopBounds::default(), args.seed).into_stops(),
        ),
    };

    info!(
        "Allocating {} stops to {} vehicle classes",
        plan.stops.len(),
        plan.classes.len()
    );

    let params = AllocatorParams {
        matrix: args.oracle.matrix_params(),
        failure_policy: if args.skip_failed_classes {
            ClassFailurePolicy::SkipClass
        } else {
            ClassFailurePolicy::Abort
        },
    };
    let solver_params = solver_params(args.iterations);

    let result = if args.oracle.offline {
        allocate(AsTheCrowFliesOracle::default(), &plan, params, solver_params, args.timeout).await
    } else {
        allocate(oracle::graphhopper_client()?, &plan, params, solver_params, args.timeout).await
    };

    let (allocation, timed_out) = match result {
        Ok(allocation) => (allocation, false),
        Err(AllocationError::TimedOut(partial)) => {
            warn!(
                "Timed out, reporting the {} completed classes",
                partial.classes.len()
            );
            (partial, true)
        }
        Err(err) => return Err(err.into()),
    };

    let report = AllocationReport::new(&plan, &allocation, timed_out);
    report.print();

    if let Some(out) = &args.out {
        file_utils::write_json(out, &report)?;
        info!("Allocation written to {}", out.display());
    }

    if timed_out {
        bail!("allocation did not finish within the timeout");
    }

    Ok(())
}
