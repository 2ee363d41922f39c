//! Reputation availability and the weight table it selects.

use vitals_primitives::PenaltyAdjustment;

use crate::config::{PenaltyWeights, ScoreWeights, WeightSet};

/// What is known about a node's reputation during one scoring pass.
///
/// A node with no credits while the credits source is up has a real reputation
/// of zero, whereas a source outage means nothing is known and the dimension is
/// dropped from the total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReputationSignal {
    /// The node has credits and the fleet median is known.
    Available { credits: i64, median: f64 },
    /// The source answered but does not track this node.
    ZeroKnown,
    /// The source was unreachable for this pass.
    SourceDown,
}

impl ReputationSignal {
    pub fn classify(credits: Option<i64>, median: f64, source_online: bool) -> Self {
        match (source_online, credits) {
            (false, _) => Self::SourceDown,
            (true, None) => Self::ZeroKnown,
            (true, Some(credits)) => Self::Available { credits, median },
        }
    }

    /// Reputation score in `[0, 100]`, or `None` when the source is down.
    ///
    /// Credits are measured against twice the fleet median, so a node earning
    /// double the median saturates. A zero median gives 100 to any positive
    /// balance and 0 otherwise.
    pub fn score(&self) -> Option<f64> {
        match *self {
            Self::Available { credits, median } => {
                let credits = credits as f64;
                let score = if median > 0.0 {
                    credits / (median * 2.0) * 100.0
                } else if credits > 0.0 {
                    100.0
                } else {
                    0.0
                };
                Some(score.clamp(0.0, 100.0))
            }
            Self::ZeroKnown => Some(0.0),
            Self::SourceDown => None,
        }
    }

    /// Reputation score with a stalled-yield penalty applied.
    pub fn score_with_penalty(
        &self,
        penalty: Option<&PenaltyAdjustment>,
        weights: &PenaltyWeights,
    ) -> Option<f64> {
        let stalled = penalty
            .and_then(|p| p.yield_velocity)
            .is_some_and(|velocity| velocity <= 0.0);

        self.score().map(|score| {
            if stalled {
                score * weights.stalled_yield_factor
            } else {
                score
            }
        })
    }

    /// The weight table for this case.
    pub fn weights<'w>(&self, weights: &'w ScoreWeights) -> &'w WeightSet {
        match self {
            Self::Available { .. } | Self::ZeroKnown => &weights.with_reputation,
            Self::SourceDown => &weights.without_reputation,
        }
    }
}
