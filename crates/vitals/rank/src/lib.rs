//! Fleet leaderboard and identity cluster counts.
//!
//! Ranking runs after every node has been scored, since health breaks ties
//! between nodes with equal credits. Cluster counting does not read health and
//! runs alongside the ranking pass.

mod cluster;
mod leaderboard;
mod order;
mod usage;

use serde::Serialize;
use tracing::debug;
use vitals_primitives::ScoredNode;

pub use cluster::{ClusterStats, cluster_stats};
pub use leaderboard::network_ranks;
pub use order::rank_order;
pub use usage::{NO_USAGE, TINY_USAGE, storage_usage_percent};

/// A scored node annotated with its leaderboard position and cluster counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedNode {
    #[serde(flatten)]
    pub scored: ScoredNode,
    /// 1-based position within the node's network; 0 without an identity.
    pub rank: u32,
    pub storage_usage_percent: String,
    pub cluster_stats: ClusterStats,
}

impl AnnotatedNode {
    pub fn is_ranked(&self) -> bool {
        self.rank > 0
    }
}

/// Rank a scored fleet.
///
/// Output preserves input order. Nodes without an identity are kept, with
/// rank 0 and zeroed cluster stats.
pub fn rank_fleet(nodes: Vec<ScoredNode>) -> Vec<AnnotatedNode> {
    let (ranks, clusters) = rayon::join(|| network_ranks(&nodes), || cluster_stats(&nodes));

    debug!(
        nodes = nodes.len(),
        ranked = ranks.len(),
        identities = clusters.len(),
        "ranked fleet"
    );

    let annotations: Vec<_> = nodes
        .iter()
        .map(|scored| {
            let identity = scored.identity();
            let rank = identity
                .and_then(|pubkey| ranks.get(&(pubkey, scored.node.network)))
                .copied()
                .unwrap_or(0);
            let cluster_stats = identity
                .and_then(|pubkey| clusters.get(pubkey))
                .copied()
                .unwrap_or_default();
            (rank, cluster_stats)
        })
        .collect();

    nodes
        .into_iter()
        .zip(annotations)
        .map(|(scored, (rank, cluster_stats))| AnnotatedNode {
            storage_usage_percent: storage_usage_percent(
                scored.node.storage_committed_bytes,
                scored.node.storage_used_bytes,
            ),
            scored,
            rank,
            cluster_stats,
        })
        .collect()
}
