//! Phase 1: fleet-wide aggregates.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;
use vitals_primitives::{FleetAggregates, NodeSnapshot};
use vitals_version::{CleanVersion, UNPARSEABLE};

/// Computes the [`FleetAggregates`] every per-node score is measured against.
#[derive(Debug, Clone, Copy)]
pub struct FleetAggregator {
    credits_source_online: bool,
}

impl Default for FleetAggregator {
    fn default() -> Self {
        Self {
            credits_source_online: true,
        }
    }
}

impl FleetAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether the credits source answered during this cycle.
    pub fn with_credits_source_online(mut self, online: bool) -> Self {
        self.credits_source_online = online;
        self
    }

    pub fn aggregate(&self, nodes: &[NodeSnapshot]) -> FleetAggregates {
        let mut committed: Vec<f64> = nodes
            .iter()
            .filter(|n| n.storage_committed_bytes > 0)
            .map(|n| n.storage_committed_bytes as f64)
            .collect();
        let mut credits: Vec<f64> = nodes
            .iter()
            .filter_map(|n| n.credits)
            .map(|c| c as f64)
            .collect();

        // only reported versions vote; a node with no version is not a vote
        // for 0.0.0
        let versions: Vec<CleanVersion> = nodes
            .iter()
            .filter_map(|n| n.version.as_deref())
            .map(CleanVersion::parse)
            .collect();

        let aggregates = FleetAggregates {
            median_storage_committed: median(&mut committed),
            median_credits: median(&mut credits),
            consensus_version: consensus_version(&versions),
            sorted_distinct_versions: sorted_distinct_versions(&versions),
            is_credits_source_online: self.credits_source_online,
        };

        debug!(
            nodes = nodes.len(),
            committed = committed.len(),
            with_credits = credits.len(),
            median_storage = aggregates.median_storage_committed,
            median_credits = aggregates.median_credits,
            consensus = %aggregates.consensus_version,
            versions = aggregates.sorted_distinct_versions.len(),
            credits_online = aggregates.is_credits_source_online,
            "computed fleet aggregates"
        );

        aggregates
    }
}

/// Median of `values`, sorting them in place. Even counts average the two
/// middle values; an empty slice yields 0.
pub fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        return values.get(mid).copied().unwrap_or(0.0);
    }

    let lower = mid.checked_sub(1).and_then(|i| values.get(i));
    match (lower, values.get(mid)) {
        (Some(lo), Some(hi)) => (lo + hi) / 2.0,
        _ => 0.0,
    }
}

/// Most frequently reported version. A tie goes to the newer version.
pub fn consensus_version(versions: &[CleanVersion]) -> String {
    let mut counts: HashMap<&CleanVersion, usize> = HashMap::new();
    for version in versions {
        *counts.entry(version).or_default() += 1;
    }

    counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| va.cmp(vb)))
        .map_or_else(
            || UNPARSEABLE.to_owned(),
            |(version, _)| version.as_str().to_owned(),
        )
}

/// Distinct versions, newest first.
pub fn sorted_distinct_versions(versions: &[CleanVersion]) -> Vec<String> {
    let distinct: BTreeSet<&CleanVersion> = versions.iter().collect();
    distinct
        .into_iter()
        .rev()
        .map(|v| v.as_str().to_owned())
        .collect()
}
