use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cost::CostSettings;
use crate::error::ServiceError;

pub const DEFAULT_MAX_VERTICES: usize = 1_000_000;

/// How each edge row is inserted into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// One arc per row, origin to destination.
    Directed,
    /// Two arcs per row, one each way, same cost.
    #[default]
    Undirected,
}

/// Loader settings, read from TOML. Every field has a default.
///
/// ```toml
/// vertices_path = "data/vertices.csv"
/// edges_path = "data/edges.csv"
/// edge_mode = "directed"
///
/// [cost]
/// strategy = "weighted"
/// risk_weight = 10
/// distance_divisor = 100
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub vertices_path: PathBuf,
    pub edges_path: PathBuf,
    /// Skip the first row of both files.
    pub has_headers: bool,
    pub edge_mode: EdgeMode,
    /// Loading fails once the vertex file holds more rows than this.
    pub max_vertices: usize,
    pub cost: CostSettings,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            vertices_path: PathBuf::from("data/vertices.csv"),
            edges_path: PathBuf::from("data/edges.csv"),
            has_headers: false,
            edge_mode: EdgeMode::default(),
            max_vertices: DEFAULT_MAX_VERTICES,
            cost: CostSettings::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ServiceError> {
        let config: ServiceConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Relative data paths stay relative to the process
    /// working directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ServiceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.max_vertices == 0 {
            return Err(ServiceError::InvalidConfig(
                "max_vertices must be positive".to_string(),
            ));
        }
        if let CostSettings::Weighted {
            risk_weight,
            distance_divisor,
        } = self.cost
        {
            if distance_divisor <= 0 {
                return Err(ServiceError::InvalidConfig(format!(
                    "cost.distance_divisor must be positive, got {distance_divisor}"
                )));
            }
            if risk_weight < 0 {
                return Err(ServiceError::InvalidConfig(format!(
                    "cost.risk_weight cannot be negative, got {risk_weight}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.edge_mode, EdgeMode::Undirected);
        assert_eq!(config.cost, CostSettings::Raw);
    }

    #[test]
    fn test_full_config() {
        let config = ServiceConfig::from_toml_str(
            r#"
            vertices_path = "v.csv"
            edges_path = "e.csv"
            has_headers = true
            edge_mode = "directed"
            max_vertices = 50

            [cost]
            strategy = "weighted"
            risk_weight = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.vertices_path, PathBuf::from("v.csv"));
        assert_eq!(config.edges_path, PathBuf::from("e.csv"));
        assert!(config.has_headers);
        assert_eq!(config.edge_mode, EdgeMode::Directed);
        assert_eq!(config.max_vertices, 50);
        assert_eq!(
            config.cost,
            CostSettings::Weighted {
                risk_weight: 3,
                distance_divisor: 100
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ServiceConfig::from_toml_str("vertex_file = \"x\"").unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = ServiceConfig::from_toml_str("[cost]\nstrategy = \"magic\"").unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let err = ServiceConfig::from_toml_str(
            "[cost]\nstrategy = \"weighted\"\ndistance_divisor = 0",
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_max_vertices_rejected() {
        let err = ServiceConfig::from_toml_str("max_vertices = 0").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "edge_mode = \"directed\"").unwrap();
        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.edge_mode, EdgeMode::Directed);
    }

    #[test]
    fn test_missing_file() {
        let err = ServiceConfig::from_file("/nonexistent/aegis.toml").unwrap_err();
        assert!(matches!(err, ServiceError::Io { .. }));
    }
}
