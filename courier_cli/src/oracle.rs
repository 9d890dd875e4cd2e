use clap::{Args, ValueEnum};
use courier_matrix_providers::{
    graphhopper_api::{GraphHopperRouteClient, GraphHopperRouteClientParams},
    matrix_builder::{MatrixBuilderParams, UnreachablePolicy},
};

pub const GRAPHHOPPER_URL_ENV_VAR: &str = "GRAPHHOPPER_URL";
pub const GRAPHHOPPER_API_KEY_ENV_VAR: &str = "GRAPHHOPPER_API_KEY";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum UnreachableArg {
    /// Abort when a pair has no route
    Fail,
    /// Keep going, the destination just can never be visited from the origin
    Infinite,
}

impl From<UnreachableArg> for UnreachablePolicy {
    fn from(value: UnreachableArg) -> Self {
        match value {
            UnreachableArg::Fail => UnreachablePolicy::Fail,
            UnreachableArg::Infinite => UnreachablePolicy::TreatAsUnreachable,
        }
    }
}

#[derive(Args)]
pub struct OracleArgs {
    /// Use straight-line travel times instead of GraphHopper
    #[arg(long)]
    pub offline: bool,

    /// Maximum number of routing requests in flight
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    #[arg(long, value_enum, default_value_t = UnreachableArg::Fail)]
    pub unreachable: UnreachableArg,
}

impl OracleArgs {
    pub fn matrix_params(&self) -> MatrixBuilderParams {
        MatrixBuilderParams {
            concurrency: self.concurrency,
            unreachable_policy: self.unreachable.into(),
        }
    }
}

fn graphhopper_params(url: Option<String>, api_key: Option<String>) -> GraphHopperRouteClientParams {
    let mut params = GraphHopperRouteClientParams::default();
    if let Some(url) = url.filter(|url| !url.is_empty()) {
        params.base_url = url;
    }
    params.api_key = api_key.filter(|key| !key.is_empty());
    params
}

/// GraphHopper client configured from `GRAPHHOPPER_URL` and
/// `GRAPHHOPPER_API_KEY`, defaulting to a local instance.
pub fn graphhopper_client() -> anyhow::Result<GraphHopperRouteClient> {
    let params = graphhopper_params(
        std::env::var(GRAPHHOPPER_URL_ENV_VAR).ok(),
        std::env::var(GRAPHHOPPER_API_KEY_ENV_VAR).ok(),
    );
    Ok(GraphHopperRouteClient::new(params)?)
}
