//! The three-phase scoring pipeline.
//!
//! 1. Aggregate: fleet medians, consensus version and the distinct version
//!    list, computed once from every snapshot.
//! 2. Score: each node independently against those aggregates, in parallel.
//! 3. Rank: per-network leaderboards and identity clusters, side by side.
//!
//! Phase 3 reads health, so it can only start once every node is scored.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;
use vitals_primitives::{FleetAggregates, Network, NodeSnapshot, ScoredNode};
use vitals_rank::{AnnotatedNode, rank_fleet};
use vitals_score::{ScoreConfig, VitalityScorer};

use crate::aggregates::FleetAggregator;

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetReport {
    /// The aggregates every node was scored against.
    pub aggregates: FleetAggregates,
    /// Annotated nodes, in snapshot order.
    pub nodes: Vec<AnnotatedNode>,
}

impl FleetReport {
    /// Nodes on `network`, best rank first. Unranked nodes are left out.
    pub fn leaderboard(&self, network: Network) -> Vec<&AnnotatedNode> {
        let mut board: Vec<_> = self
            .nodes
            .iter()
            .filter(|n| n.is_ranked() && n.scored.node.network == network)
            .collect();
        board.sort_by_key(|n| n.rank);
        board
    }
}

/// Runs aggregate, score and rank over a fleet snapshot.
#[derive(Debug, Clone, Default)]
pub struct VitalityPipeline {
    config: ScoreConfig,
}

impl VitalityPipeline {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score and rank `snapshots`.
    ///
    /// `credits_online` reports whether the credits source answered this cycle;
    /// when it did not, reputation is dropped from every score.
    pub fn run(&self, snapshots: Vec<NodeSnapshot>, credits_online: bool) -> FleetReport {
        let aggregates = FleetAggregator::new()
            .with_credits_source_online(credits_online)
            .aggregate(&snapshots);

        let scored = self.score(snapshots, &aggregates);
        let nodes = rank_fleet(scored);

        debug!(
            nodes = nodes.len(),
            ranked = nodes.iter().filter(|n| n.is_ranked()).count(),
            "pipeline complete"
        );

        FleetReport { aggregates, nodes }
    }

    /// Phase 2 against precomputed aggregates.
    pub fn score(
        &self,
        snapshots: Vec<NodeSnapshot>,
        aggregates: &FleetAggregates,
    ) -> Vec<ScoredNode> {
        let scorer = VitalityScorer::new(&self.config, aggregates);
        let scored: Vec<ScoredNode> = snapshots
            .into_par_iter()
            .map(|node| {
                let vitality = scorer.score(&node);
                ScoredNode::new(node, vitality)
            })
            .collect();

        debug!(
            nodes = scored.len(),
            zeroed = scored.iter().filter(|n| n.health() == 0).count(),
            "scored fleet"
        );
        scored
    }

    /// Phase 2 on the calling thread.
    pub fn score_sequential(
        &self,
        snapshots: Vec<NodeSnapshot>,
        aggregates: &FleetAggregates,
    ) -> Vec<ScoredNode> {
        let scorer = VitalityScorer::new(&self.config, aggregates);
        snapshots
            .into_iter()
            .map(|node| {
                let vitality = scorer.score(&node);
                ScoredNode::new(node, vitality)
            })
            .collect()
    }
}
