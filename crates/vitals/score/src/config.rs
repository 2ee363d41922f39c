//! Configuration for the vitality scoring curves and weight tables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tolerance when checking that a weight table sums to one.
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Errors raised while loading or validating a [`ScoreConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A weight table does not sum to 1.
    #[error("{table} weights sum to {sum}, expected 1.0")]
    WeightsDoNotSum {
        /// Which table is off.
        table: &'static str,
        /// The actual sum.
        sum: f64,
    },

    /// A weight is negative or not finite.
    #[error("{table}.{field} weight is invalid: {value}")]
    InvalidWeight {
        table: &'static str,
        field: &'static str,
        value: f64,
    },

    /// The degraded table gives weight to a dimension that has no data.
    #[error("without_reputation table assigns {0} to reputation, expected 0")]
    DeadDimensionWeighted(f64),

    /// A curve parameter is out of its valid range.
    #[error("{parameter} is out of range: {value}")]
    InvalidCurve {
        parameter: &'static str,
        value: f64,
    },

    /// A version decay step is outside `[0, 100]`.
    #[error("version decay score for distance {distance} is out of range: {score}")]
    InvalidDecayStep { distance: usize, score: u8 },

    /// The TOML document is malformed.
    #[error("invalid score config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config file could not be read.
    #[error("failed to read score config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for the vitality scorer.
///
/// Every section has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub uptime: UptimeCurve,
    pub storage: StorageCurve,
    pub version: VersionDecay,
    pub weights: ScoreWeights,
    pub penalties: PenaltyWeights,
}

impl ScoreConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Create config with a custom version decay table.
    pub fn with_version_decay(mut self, decay: VersionDecay) -> Self {
        self.version = decay;
        self
    }

    /// Create config with custom weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Create config with custom penalty weights.
    pub fn with_penalties(mut self, penalties: PenaltyWeights) -> Self {
        self.penalties = penalties;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.uptime.validate()?;
        self.storage.validate()?;
        self.version.validate()?;
        self.weights.validate()?;
        self.penalties.validate()
    }
}

/// Sigmoid uptime curve: `100 / (1 + e^(-steepness * (days - midpoint)))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UptimeCurve {
    /// Days of uptime that score 50 (default: 7).
    pub midpoint_days: f64,
    /// Slope of the curve (default: 0.2).
    pub steepness: f64,
    /// Nodes below this many days are capped (default: 1).
    pub new_node_days: f64,
    /// Cap applied to new nodes (default: 20).
    pub new_node_cap: f64,
}

impl Default for UptimeCurve {
    fn default() -> Self {
        Self {
            midpoint_days: 7.0,
            steepness: 0.2,
            new_node_days: 1.0,
            new_node_cap: 20.0,
        }
    }
}

impl UptimeCurve {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("uptime.steepness", self.steepness)?;
        non_negative("uptime.midpoint_days", self.midpoint_days)?;
        non_negative("uptime.new_node_days", self.new_node_days)?;
        percentage("uptime.new_node_cap", self.new_node_cap)
    }
}

/// Logarithmic storage curve with a capped utilization bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageCurve {
    /// Multiplier on `log2(committed / median + 1)` (default: 50).
    pub elasticity: f64,
    /// Multiplier on `log2(used_gib + offset)` (default: 5).
    pub bonus_factor: f64,
    /// Offset inside the bonus logarithm (default: 2).
    pub bonus_offset_gib: f64,
    /// Maximum utilization bonus (default: 15).
    pub bonus_cap: f64,
}

impl Default for StorageCurve {
    fn default() -> Self {
        Self {
            elasticity: 50.0,
            bonus_factor: 5.0,
            bonus_offset_gib: 2.0,
            bonus_cap: 15.0,
        }
    }
}

impl StorageCurve {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("storage.elasticity", self.elasticity)?;
        non_negative("storage.bonus_factor", self.bonus_factor)?;
        // log2 of the offset must not go negative for a tiny used volume
        if !(self.bonus_offset_gib.is_finite() && self.bonus_offset_gib >= 1.0) {
            return Err(ConfigError::InvalidCurve {
                parameter: "storage.bonus_offset_gib",
                value: self.bonus_offset_gib,
            });
        }
        percentage("storage.bonus_cap", self.bonus_cap)
    }
}

/// Tiered decay for nodes running behind the consensus version.
///
/// `steps[0]` is the score one release behind, `steps[1]` two releases behind,
/// and so on. Past the end of the table the score keeps falling by one point
/// per release from the last step, never below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionDecay {
    pub steps: Vec<u8>,
}

impl Default for VersionDecay {
    fn default() -> Self {
        Self::reference()
    }
}

impl VersionDecay {
    /// 90 / 70 / 50 / 30 / 10, then one point per release.
    pub fn reference() -> Self {
        Self {
            steps: vec![90, 70, 50, 30, 10],
        }
    }

    /// Stricter reading: 80 one release behind, 50 two behind, zero from three.
    pub fn two_strikes() -> Self {
        Self {
            steps: vec![80, 50, 0],
        }
    }

    /// Score for a node `distance` releases behind consensus.
    ///
    /// Distance 0 is up to date and scores 100.
    pub fn score_at(&self, distance: usize) -> u8 {
        if distance == 0 {
            return 100;
        }
        if let Some(step) = self.steps.get(distance - 1) {
            return *step;
        }
        let Some(last) = self.steps.last() else {
            return 0;
        };
        let overshoot = distance - self.steps.len();
        u8::try_from(usize::from(*last).saturating_sub(overshoot)).unwrap_or(0)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.steps.iter().enumerate().find(|(_, s)| **s > 100) {
            Some((i, score)) => Err(ConfigError::InvalidDecayStep {
                distance: i + 1,
                score: *score,
            }),
            None => Ok(()),
        }
    }
}

/// Weight of each dimension in the composite total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub uptime: f64,
    pub storage: f64,
    pub reputation: f64,
    pub version: f64,
}

impl WeightSet {
    pub fn sum(&self) -> f64 {
        self.uptime + self.storage + self.reputation + self.version
    }

    fn validate(&self, table: &'static str) -> Result<(), ConfigError> {
        for (field, value) in [
            ("uptime", self.uptime),
            ("storage", self.storage),
            ("reputation", self.reputation),
            ("version", self.version),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidWeight {
                    table,
                    field,
                    value,
                });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightsDoNotSum { table, sum });
        }
        Ok(())
    }
}

/// The two weight tables, selected by reputation availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Used whenever the credits source answered, even for nodes without credits.
    pub with_reputation: WeightSet,
    /// Used when the credits source is down; reputation must carry no weight.
    pub without_reputation: WeightSet,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            with_reputation: WeightSet {
                uptime: 0.35,
                storage: 0.30,
                reputation: 0.20,
                version: 0.15,
            },
            without_reputation: WeightSet {
                uptime: 0.45,
                storage: 0.35,
                reputation: 0.0,
                version: 0.20,
            },
        }
    }
}

impl ScoreWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        self.with_reputation.validate("with_reputation")?;
        self.without_reputation.validate("without_reputation")?;
        if self.without_reputation.reputation != 0.0 {
            return Err(ConfigError::DeadDimensionWeighted(self.without_reputation.reputation));
        }
        Ok(())
    }
}

/// How externally supplied anomaly penalties fold into the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Uptime points lost per restart (default: 5).
    pub restart_penalty: f64,
    /// Maximum uptime points lost to restarts (default: 30).
    pub max_restart_penalty: f64,
    /// Uptime cap while the uptime counter is frozen (default: 20).
    pub frozen_uptime_cap: f64,
    /// Reputation multiplier when credits stop growing (default: 0.5).
    pub stalled_yield_factor: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            restart_penalty: 5.0,
            max_restart_penalty: 30.0,
            frozen_uptime_cap: 20.0,
            stalled_yield_factor: 0.5,
        }
    }
}

impl PenaltyWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("penalties.restart_penalty", self.restart_penalty)?;
        percentage("penalties.max_restart_penalty", self.max_restart_penalty)?;
        percentage("penalties.frozen_uptime_cap", self.frozen_uptime_cap)?;
        if !(0.0..=1.0).contains(&self.stalled_yield_factor) {
            return Err(ConfigError::InvalidCurve {
                parameter: "penalties.stalled_yield_factor",
                value: self.stalled_yield_factor,
            });
        }
        Ok(())
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCurve { parameter, value })
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidCurve { parameter, value })
    }
}

fn percentage(parameter: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidCurve { parameter, value })
    }
}
