use core::cmp::Ordering;

use vitals_primitives::ScoredNode;

/// Leaderboard ordering: credits descending (absent counts as zero), then
/// health descending, then pubkey ascending so ties are deterministic.
pub fn rank_order(a: &ScoredNode, b: &ScoredNode) -> Ordering {
    b.node
        .credits_or_zero()
        .cmp(&a.node.credits_or_zero())
        .then_with(|| b.health().cmp(&a.health()))
        .then_with(|| a.identity().cmp(&b.identity()))
}
