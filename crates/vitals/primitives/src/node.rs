//! Raw per-node telemetry.

use serde::{Deserialize, Serialize};

use crate::{BYTES_PER_GIB, Network, SECONDS_PER_DAY, lenient};

/// Telemetry for one live node instance, as collected for a single fetch cycle.
///
/// Deserialization never fails on field content: missing or malformed numbers
/// become 0, a missing or null `credits` stays absent, and an unrecognized
/// `network` becomes [`Network::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeSnapshot {
    /// Stable identity. `None` when absent or blank; such nodes are unrankable.
    #[serde(deserialize_with = "lenient::identity")]
    pub pubkey: Option<String>,

    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,

    pub network: Network,

    /// Free-form version string as reported by the node.
    #[serde(deserialize_with = "lenient::text")]
    pub version: Option<String>,

    #[serde(deserialize_with = "lenient::non_negative")]
    pub uptime_seconds: u64,

    #[serde(deserialize_with = "lenient::non_negative")]
    pub storage_committed_bytes: u64,

    #[serde(deserialize_with = "lenient::non_negative")]
    pub storage_used_bytes: u64,

    /// Earned credits. `None` means this node has no reputation signal.
    #[serde(deserialize_with = "lenient::credits")]
    pub credits: Option<i64>,

    #[serde(deserialize_with = "lenient::flag")]
    pub is_public: bool,

    /// Anomaly penalties computed by an upstream detector, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty: Option<PenaltyAdjustment>,
}

impl NodeSnapshot {
    /// Identity key, if the node has a usable one.
    pub fn identity(&self) -> Option<&str> {
        self.pubkey.as_deref().filter(|key| !key.trim().is_empty())
    }

    pub fn uptime_days(&self) -> f64 {
        self.uptime_seconds as f64 / SECONDS_PER_DAY
    }

    pub fn storage_used_gib(&self) -> f64 {
        self.storage_used_bytes as f64 / BYTES_PER_GIB
    }

    /// Credits for ordering purposes: absent counts as zero.
    pub fn credits_or_zero(&self) -> i64 {
        self.credits.unwrap_or(0)
    }
}

/// Penalties supplied by an external anomaly detector.
///
/// The default value is neutral: folding it into a score changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PenaltyAdjustment {
    /// Restarts observed within the detector's window.
    pub restarts: u32,
    /// Uptime consistency in `[0, 1]`; 1.0 means no inconsistency detected.
    pub consistency_multiplier: f64,
    /// Credits earned per day over the detector's window, when known.
    pub yield_velocity: Option<f64>,
    /// Uptime counter reported as frozen (node alive but not advancing).
    pub uptime_frozen: bool,
}

impl Default for PenaltyAdjustment {
    fn default() -> Self {
        Self {
            restarts: 0,
            consistency_multiplier: 1.0,
            yield_velocity: None,
            uptime_frozen: false,
        }
    }
}

impl PenaltyAdjustment {
    /// Returns true if folding this adjustment into a score is a no-op.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}
