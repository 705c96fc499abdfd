use serde::Serialize;

use crate::error::ServiceError;
use crate::state;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub source: Option<String>,
    /// "loaded" or "not_loaded".
    pub status: String,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub skipped_rows: usize,
    pub load_time_ms: f64,
    pub loaded_secs_ago: f64,
}

impl StatusReport {
    pub fn to_json(&self) -> Result<String, ServiceError> {
        crate::util::to_json(self)
    }
}

pub fn status() -> StatusReport {
    state::with_graph(|gs| StatusReport {
        source: Some(gs.source.clone()),
        status: "loaded".to_string(),
        vertex_count: gs.graph.vertex_count(),
        edge_count: gs.graph.edge_count(),
        skipped_rows: gs.stats.skipped_rows,
        load_time_ms: gs.stats.load_time_ms,
        loaded_secs_ago: gs.loaded_at.elapsed().as_secs_f64(),
    })
    .unwrap_or_else(|| StatusReport {
        source: None,
        status: "not_loaded".to_string(),
        vertex_count: 0,
        edge_count: 0,
        skipped_rows: 0,
        load_time_ms: 0.0,
        loaded_secs_ago: 0.0,
    })
}
