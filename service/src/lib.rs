//! aegis-service: loading and query facade for the aegis risk graph.
//!
//! Wraps aegis-core with the pieces a deployment needs around the engine:
//! TOML configuration, CSV bulk loading with a pluggable cost strategy,
//! process-wide loaded-graph state, and serializable responses for the
//! safest-route and critical-point queries.

mod config;
mod cost;
mod critical;
mod error;
mod load;
mod route;
mod state;
mod status;
mod util;

pub use config::{EdgeMode, ServiceConfig, DEFAULT_MAX_VERTICES};
pub use cost::{
    CostCalculator, CostSettings, RawRisk, WeightedCost, DEFAULT_DISTANCE_DIVISOR,
    DEFAULT_RISK_WEIGHT,
};
pub use critical::{critical_points, critical_points_response, CriticalPointsResponse, PointEntry};
pub use error::{ErrorResponse, ServiceError};
pub use load::{load, load_from_readers, load_graph, LoadStats};
pub use route::{route_response, safest_route, RouteResponse, RouteStep};
pub use state::{clear, current, is_loaded, set_graph, with_graph, GraphState};
pub use status::{status, StatusReport};
pub use util::to_json;
