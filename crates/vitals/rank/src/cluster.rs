use std::collections::HashMap;

use serde::Serialize;
use vitals_primitives::{Network, ScoredNode};

/// How many live instances share one identity across sub-networks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStats {
    pub mainnet_count: u32,
    pub devnet_count: u32,
    pub total_global: u32,
}

impl ClusterStats {
    fn record(&mut self, network: Network) {
        match network {
            Network::Mainnet => self.mainnet_count += 1,
            Network::Devnet => self.devnet_count += 1,
            Network::Unknown => {}
        }
        self.total_global = self.mainnet_count + self.devnet_count;
    }

    /// Returns true if the identity runs more than one instance.
    pub const fn has_siblings(&self) -> bool {
        self.total_global > 1
    }
}

/// Cluster counts keyed by pubkey. Nodes without an identity are skipped.
pub fn cluster_stats(nodes: &[ScoredNode]) -> HashMap<&str, ClusterStats> {
    let mut clusters: HashMap<&str, ClusterStats> = HashMap::new();
    for node in nodes {
        if let Some(pubkey) = node.identity() {
            clusters
                .entry(pubkey)
                .or_default()
                .record(node.node.network);
        }
    }
    clusters
}
