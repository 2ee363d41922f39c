use serde::Serialize;

use crate::NodeSnapshot;

/// Auditable per-component breakdown of a vitality score.
///
/// Every component is an integer in `[0, 100]`. `reputation` is `None` only
/// when the credits source was unreachable for the whole scoring pass; a node
/// that simply has no credits scores `Some(0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub uptime: u8,
    pub version: u8,
    pub storage: u8,
    pub reputation: Option<u8>,
    pub total: u8,
}

impl ScoreBreakdown {
    /// The gatekeeper result: every field zero, reputation included.
    pub const ZERO: Self = Self {
        uptime: 0,
        version: 0,
        storage: 0,
        reputation: Some(0),
        total: 0,
    };

    /// Returns true if the reputation dimension was excluded from the total.
    pub const fn reputation_missing(&self) -> bool {
        self.reputation.is_none()
    }
}

/// The result of scoring one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitality {
    pub health: u8,
    pub health_breakdown: ScoreBreakdown,
}

impl From<ScoreBreakdown> for Vitality {
    fn from(breakdown: ScoreBreakdown) -> Self {
        Self {
            health: breakdown.total,
            health_breakdown: breakdown,
        }
    }
}

/// A snapshot paired with its vitality score, the input to ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredNode {
    #[serde(flatten)]
    pub node: NodeSnapshot,
    #[serde(flatten)]
    pub vitality: Vitality,
}

impl ScoredNode {
    pub fn new(node: NodeSnapshot, vitality: Vitality) -> Self {
        Self { node, vitality }
    }

    pub fn health(&self) -> u8 {
        self.vitality.health
    }

    pub fn identity(&self) -> Option<&str> {
        self.node.identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zero_breakdown_keeps_reputation() {
        assert!(!ScoreBreakdown::ZERO.reputation_missing());
        assert_eq!(Vitality::from(ScoreBreakdown::ZERO).health, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let breakdown = ScoreBreakdown {
            uptime: 88,
            version: 100,
            storage: 71,
            reputation: None,
            total: 82,
        };
        let scored = ScoredNode::new(
            NodeSnapshot {
                pubkey: Some("abc".into()),
                ..Default::default()
            },
            breakdown.into(),
        );

        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["pubkey"], json!("abc"));
        assert_eq!(value["health"], json!(82));
        assert_eq!(value["healthBreakdown"]["reputation"], json!(null));
        assert_eq!(value["healthBreakdown"]["storage"], json!(71));
    }
}
