use serde::Deserialize;

/// Turns the raw attributes of a route segment into the edge weight the
/// graph stores. Implementations must return a non-negative value for
/// non-negative inputs.
pub trait CostCalculator: Send + Sync {
    fn calculate(&self, risk: i64, distance: i64) -> i64;
}

/// Cost is the risk level itself; distance is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRisk;

impl CostCalculator for RawRisk {
    fn calculate(&self, risk: i64, _distance: i64) -> i64 {
        risk
    }
}

/// `risk * risk_weight + distance / distance_divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedCost {
    pub risk_weight: i64,
    pub distance_divisor: i64,
}

pub const DEFAULT_RISK_WEIGHT: i64 = 10;
pub const DEFAULT_DISTANCE_DIVISOR: i64 = 100;

impl Default for WeightedCost {
    fn default() -> Self {
        Self {
            risk_weight: DEFAULT_RISK_WEIGHT,
            distance_divisor: DEFAULT_DISTANCE_DIVISOR,
        }
    }
}

impl CostCalculator for WeightedCost {
    fn calculate(&self, risk: i64, distance: i64) -> i64 {
        let distance_part = distance.checked_div(self.distance_divisor).unwrap_or(0);
        risk.saturating_mul(self.risk_weight)
            .saturating_add(distance_part)
    }
}

/// The `[cost]` table of the service config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum CostSettings {
    #[default]
    Raw,
    Weighted {
        #[serde(default = "default_risk_weight")]
        risk_weight: i64,
        #[serde(default = "default_distance_divisor")]
        distance_divisor: i64,
    },
}

fn default_risk_weight() -> i64 {
    DEFAULT_RISK_WEIGHT
}

fn default_distance_divisor() -> i64 {
    DEFAULT_DISTANCE_DIVISOR
}

impl CostSettings {
    pub fn build(&self) -> Box<dyn CostCalculator> {
        match *self {
            CostSettings::Raw => Box::new(RawRisk),
            CostSettings::Weighted {
                risk_weight,
                distance_divisor,
            } => Box::new(WeightedCost {
                risk_weight,
                distance_divisor,
            }),
        }
    }
}
