use std::path::PathBuf;

use aegis_core::GraphError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("{file}:{line}: {message}")]
    Parse {
        file: String,
        line: u64,
        message: String,
    },

    #[error("{file}:{line}: {error}")]
    Graph {
        file: String,
        line: u64,
        #[source]
        error: GraphError,
    },

    #[error("graph exceeds max_vertices={limit}")]
    TooManyVertices { limit: usize },

    #[error("no graph loaded, call load() first")]
    NotLoaded,

    #[error(transparent)]
    Query(#[from] GraphError),

    #[error("failed to serialize response: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing rendering of a [`ServiceError`], with an HTTP-style status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
    /// When the error was rendered.
    pub timestamp: DateTime<Utc>,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        let status = match err {
            ServiceError::Query(GraphError::VertexNotFound(_)) => 404,
            ServiceError::Query(_) => 400,
            ServiceError::NotLoaded => 503,
            _ => 500,
        };
        let message = if status == 500 {
            "an unexpected internal error occurred".to_string()
        } else {
            err.to_string()
        };
        Self {
            message,
            status,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ServiceError::Query(GraphError::VertexNotFound("X".into()));
        let resp = ErrorResponse::from(&err);
        assert_eq!(resp.status, 404);
        assert_eq!(resp.message, "vertex 'X' not found");
    }

    #[test]
    fn test_response_is_timestamped() {
        let before = Utc::now();
        let resp = ErrorResponse::from(&ServiceError::NotLoaded);
        assert!(resp.timestamp >= before && resp.timestamp <= Utc::now());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], 503);
        let stamp: DateTime<Utc> = json["timestamp"].as_str().unwrap().parse().unwrap();
        assert_eq!(stamp, resp.timestamp);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = ServiceError::Query(GraphError::InvalidWeight(-1));
        assert_eq!(ErrorResponse::from(&err).status, 400);
    }

    #[test]
    fn test_not_loaded_maps_to_503() {
        assert_eq!(ErrorResponse::from(&ServiceError::NotLoaded).status, 503);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = ServiceError::InvalidConfig("secret detail".into());
        let resp = ErrorResponse::from(&err);
        assert_eq!(resp.status, 500);
        assert!(!resp.message.contains("secret"));
    }

    #[test]
    fn test_load_errors_carry_location() {
        let err = ServiceError::Graph {
            file: "edges.csv".into(),
            line: 7,
            error: GraphError::SelfLoopNotAllowed("A".into()),
        };
        assert_eq!(
            err.to_string(),
            "edges.csv:7: self-loops are not allowed (vertex 'A')"
        );
    }
}
