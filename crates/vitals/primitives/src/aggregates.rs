use serde::{Deserialize, Serialize};

/// Fleet-wide values computed once per cycle, read by every per-node score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetAggregates {
    pub median_storage_committed: f64,
    pub median_credits: f64,
    /// Most frequently observed cleaned version.
    pub consensus_version: String,
    /// Distinct cleaned versions, newest first.
    pub sorted_distinct_versions: Vec<String>,
    /// Whether the credits source answered during this cycle.
    pub is_credits_source_online: bool,
}

impl Default for FleetAggregates {
    fn default() -> Self {
        Self {
            median_storage_committed: 0.0,
            median_credits: 0.0,
            consensus_version: "0.0.0".to_owned(),
            sorted_distinct_versions: Vec::new(),
            is_credits_source_online: true,
        }
    }
}

impl FleetAggregates {
    pub fn with_credits_source_online(mut self, online: bool) -> Self {
        self.is_credits_source_online = online;
        self
    }
}
