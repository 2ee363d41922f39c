use std::collections::{BTreeMap, HashMap};

use vitals_primitives::{Network, ScoredNode};

use crate::order::rank_order;

/// 1-based leaderboard positions keyed by `(pubkey, network)`.
///
/// Each network is ranked on its own, so one identity can hold different
/// positions on different sub-networks. Nodes without an identity are left
/// out. If an identity appears twice on the same network it keeps the better
/// of its two positions.
pub fn network_ranks(nodes: &[ScoredNode]) -> HashMap<(&str, Network), u32> {
    let mut scopes: BTreeMap<Network, Vec<&ScoredNode>> = BTreeMap::new();
    for node in nodes.iter().filter(|n| n.identity().is_some()) {
        scopes.entry(node.node.network).or_default().push(node);
    }

    let mut ranks = HashMap::with_capacity(nodes.len());
    for (network, mut scope) in scopes {
        scope.sort_by(|a, b| rank_order(a, b));
        for (position, node) in (1u32..).zip(scope) {
            if let Some(pubkey) = node.identity() {
                ranks.entry((pubkey, network)).or_insert(position);
            }
        }
    }
    ranks
}
