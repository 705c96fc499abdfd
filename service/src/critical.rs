use aegis_core::Graph;
use serde::Serialize;

use crate::error::ServiceError;
use crate::state;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPointsResponse {
    pub critical_points_found: usize,
    pub points: Vec<PointEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointEntry {
    pub name: String,
    pub id: String,
}

impl CriticalPointsResponse {
    pub fn to_json(&self) -> Result<String, ServiceError> {
        crate::util::to_json(self)
    }
}

/// Critical locations of the loaded graph.
pub fn critical_points() -> Result<CriticalPointsResponse, ServiceError> {
    state::with_graph(|gs| critical_points_response(&gs.graph)).ok_or(ServiceError::NotLoaded)
}

pub fn critical_points_response(graph: &Graph) -> CriticalPointsResponse {
    let points: Vec<PointEntry> = graph
        .find_critical_points()
        .iter()
        .map(|v| PointEntry {
            name: v.name().to_string(),
            id: v.id().to_string(),
        })
        .collect();

    CriticalPointsResponse {
        critical_points_found: points.len(),
        points,
    }
}
