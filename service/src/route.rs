use aegis_core::{Graph, Risk};
use serde::Serialize;

use crate::error::ServiceError;
use crate::state;

/// A route as returned to callers. An empty route means "no path".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub total_calculated_cost: Risk,
    pub route: Vec<RouteStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    pub name: String,
    pub id: String,
}

impl RouteResponse {
    pub fn to_json(&self) -> Result<String, ServiceError> {
        crate::util::to_json(self)
    }
}

/// Safest route between two locations of the loaded graph.
pub fn safest_route(origin: &str, dest: &str) -> Result<RouteResponse, ServiceError> {
    state::with_graph(|gs| route_response(&gs.graph, origin, dest))
        .ok_or(ServiceError::NotLoaded)?
}

/// Safest route over an explicit graph.
pub fn route_response(
    graph: &Graph,
    origin: &str,
    dest: &str,
) -> Result<RouteResponse, ServiceError> {
    let route = graph.find_safest_route(origin, dest)?;
    let total_calculated_cost = route.total_risk();
    let steps = route
        .into_iter()
        .map(|v| RouteStep {
            name: v.name().to_string(),
            id: v.id().to_string(),
        })
        .collect();

    Ok(RouteResponse {
        total_calculated_cost,
        route: steps,
    })
}
