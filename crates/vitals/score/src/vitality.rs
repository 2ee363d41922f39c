//! Composite vitality score.

use tracing::trace;
use vitals_primitives::{FleetAggregates, NodeSnapshot, ScoreBreakdown, Vitality};

use crate::config::ScoreConfig;
use crate::curves::{storage_score, uptime_score};
use crate::signal::ReputationSignal;
use crate::version::VersionRankScorer;

/// Scores nodes against one cycle's fleet aggregates.
///
/// Holds only shared references, so a single scorer can be used from many
/// threads at once. Scoring is a pure function of the node, the aggregates and
/// the config.
#[derive(Debug, Clone)]
pub struct VitalityScorer<'a> {
    config: &'a ScoreConfig,
    aggregates: &'a FleetAggregates,
    versions: VersionRankScorer<'a>,
}

impl<'a> VitalityScorer<'a> {
    pub fn new(config: &'a ScoreConfig, aggregates: &'a FleetAggregates) -> Self {
        let versions = VersionRankScorer::new(
            &aggregates.consensus_version,
            &aggregates.sorted_distinct_versions,
            &config.version,
        );
        Self {
            config,
            aggregates,
            versions,
        }
    }

    pub fn aggregates(&self) -> &FleetAggregates {
        self.aggregates
    }

    /// Score one node.
    pub fn score(&self, node: &NodeSnapshot) -> Vitality {
        let breakdown = self.breakdown(node);
        trace!(
            pubkey = node.identity().unwrap_or("-"),
            total = breakdown.total,
            reputation = ?breakdown.reputation,
            "scored node"
        );
        breakdown.into()
    }

    /// Score one node, returning only the breakdown.
    pub fn breakdown(&self, node: &NodeSnapshot) -> ScoreBreakdown {
        // gatekeeper: no committed capacity means no participation
        if node.storage_committed_bytes == 0 {
            return ScoreBreakdown::ZERO;
        }

        let config = self.config;
        let penalty = node.penalty.as_ref();

        let uptime = uptime_score(
            node.uptime_days(),
            &config.uptime,
            penalty,
            &config.penalties,
        );
        let storage = storage_score(
            node.storage_committed_bytes,
            node.storage_used_gib(),
            self.aggregates.median_storage_committed,
            &config.storage,
        );
        let version = f64::from(self.versions.score(node.version.as_deref()));

        let signal = ReputationSignal::classify(
            node.credits,
            self.aggregates.median_credits,
            self.aggregates.is_credits_source_online,
        );
        let reputation = signal.score_with_penalty(penalty, &config.penalties);
        let weights = signal.weights(&config.weights);

        let total = weights.uptime * uptime
            + weights.storage * storage
            + weights.reputation * reputation.unwrap_or(0.0)
            + weights.version * version;

        ScoreBreakdown {
            uptime: to_score(uptime),
            version: to_score(version),
            storage: to_score(storage),
            reputation: reputation.map(to_score),
            total: to_score(total),
        }
    }
}

/// Score one node with a throwaway scorer.
///
/// Prefer [`VitalityScorer`] when scoring a whole fleet against the same
/// aggregates.
pub fn score_node(
    node: &NodeSnapshot,
    aggregates: &FleetAggregates,
    config: &ScoreConfig,
) -> Vitality {
    VitalityScorer::new(config, aggregates).score(node)
}

/// Round to an integer score in `[0, 100]`.
fn to_score(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}
