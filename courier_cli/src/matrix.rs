use std::{iter, path::PathBuf};

use clap::Args;
use courier_matrix_providers::{
    as_the_crow_flies::AsTheCrowFliesOracle,
    coordinate::Coordinate,
    matrix_builder::{MatrixBuilder, MatrixBuilderParams},
    travel_matrices::TravelTimeMatrix,
    travel_profile::TravelProfile,
    travel_time_oracle::TravelTimeOracle,
};

use crate::{
    file_utils,
    oracle::{self, OracleArgs},
};

#[derive(Args)]
pub struct MatrixArgs {
    /// Fleet plan JSON; the matrix covers the depot and every stop
    #[arg(short, long)]
    plan: PathBuf,

    #[arg(long, default_value_t = TravelProfile::Bike)]
    profile: TravelProfile,

    #[command(flatten)]
    oracle: OracleArgs,

    /// Write the matrix to a file instead of stdout
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

async fn build_matrix<O: TravelTimeOracle>(
    oracle: O,
    params: MatrixBuilderParams,
    locations: &[Coordinate],
    profile: TravelProfile,
) -> anyhow::Result<TravelTimeMatrix> {
    let builder = MatrixBuilder::new(oracle, params);
    Ok(builder.build_matrix(locations, profile).await?)
}

pub async fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let plan = file_utils::read_plan(&args.plan)?;
    let locations: Vec<Coordinate> = iter::once(plan.depot).chain(plan.stops).collect();
    let params = args.oracle.matrix_params();

    let matrix = if args.oracle.offline {
        build_matrix(AsTheCrowFliesOracle::default(), params, &locations, args.profile).await?
    } else {
        build_matrix(oracle::graphhopper_client()?, params, &locations, args.profile).await?
    };

    match &args.out {
        Some(out) => file_utils::write_json(out, &matrix)?,
        None => println!("{}", serde_json::to_string_pretty(&matrix)?),
    }

    Ok(())
}
