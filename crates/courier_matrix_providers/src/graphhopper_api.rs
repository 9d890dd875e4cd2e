use std::time::Duration;

use jiff::SignedDuration;
use serde::Deserialize;
use tracing::debug;

use crate::{
    coordinate::Coordinate,
    retry::RetryPolicy,
    travel_profile::TravelProfile,
    travel_time_oracle::{RouteUnavailable, TravelTimeOracle},
};

pub const GRAPHHOPPER_LOCAL_ROUTE_URL: &str = "http://localhost:8989/route";

#[derive(Deserialize)]
struct RouteResponse {
    #[serde(default)]
    paths: Vec<RoutePath>,
}

#[derive(Deserialize)]
struct RoutePath {
    /// Travel time in milliseconds
    time: f64,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GraphHopperRouteClientParams {
    pub base_url: String,
    pub api_key: Option<String>,
    pub locale: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GraphHopperRouteClientParams {
    fn default() -> Self {
        GraphHopperRouteClientParams {
            base_url: GRAPHHOPPER_LOCAL_ROUTE_URL.to_string(),
            api_key: None,
            locale: String::from("da"),
            request_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

/// Queries the GraphHopper `/route` endpoint one pair at a time, either a
/// self-hosted instance or the hosted API when an API key is set.
pub struct GraphHopperRouteClient {
    params: GraphHopperRouteClientParams,
    client: reqwest::Client,
}

impl GraphHopperRouteClient {
    pub fn new(params: GraphHopperRouteClientParams) -> Result<Self, RouteUnavailable> {
        let client = reqwest::Client::builder()
            .timeout(params.request_timeout)
            .build()?;

        Ok(Self { params, client })
    }

    pub fn params(&self) -> &GraphHopperRouteClientParams {
        &self.params
    }

    fn query_params(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("point", origin.to_string()),
            ("point", destination.to_string()),
            ("profile", profile.to_string()),
            ("locale", self.params.locale.clone()),
            ("calc_points", String::from("false")),
        ];

        if let Some(api_key) = &self.params.api_key {
            query.push(("key", api_key.clone()));
        }

        query
    }

    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> Result<SignedDuration, RouteUnavailable> {
        debug!(
            "GraphHopperApi: route {} -> {} ({})",
            origin, destination, profile
        );

        let response = self
            .client
            .get(&self.params.base_url)
            .query(&self.query_params(origin, destination, profile))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_route_response(status, &body, origin, destination)
    }
}

impl TravelTimeOracle for GraphHopperRouteClient {
    fn query_travel_time(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TravelProfile,
    ) -> impl Future<Output = Result<SignedDuration, RouteUnavailable>> + Send {
        self.params
            .retry
            .run(move || self.fetch_route(origin, destination, profile))
    }
}

fn parse_route_response(
    status: u16,
    body: &str,
    origin: Coordinate,
    destination: Coordinate,
) -> Result<SignedDuration, RouteUnavailable> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|error| error.message)
            .unwrap_or_else(|_| body.to_string());
        return Err(RouteUnavailable::Api { status, message });
    }

    let route: RouteResponse = serde_json::from_str(body)?;
    let path = route.paths.first().ok_or(RouteUnavailable::NoRoute {
        origin,
        destination,
    })?;

    if !path.time.is_finite() || path.time < 0.0 {
        return Err(RouteUnavailable::InvalidDuration {
            origin,
            destination,
            seconds: path.time / 1000.0,
        });
    }

    Ok(SignedDuration::from_millis(path.time.round() as i64))
}
