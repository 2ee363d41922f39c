//! Scoring curves for the uptime and storage dimensions.

use vitals_primitives::PenaltyAdjustment;

use crate::config::{PenaltyWeights, StorageCurve, UptimeCurve};

/// Sigmoid uptime score before penalties and caps.
pub fn uptime_curve(days: f64, curve: &UptimeCurve) -> f64 {
    100.0 / (1.0 + (-curve.steepness * (days - curve.midpoint_days)).exp())
}

/// Uptime score with penalties folded in and the new-node cap applied last.
pub fn uptime_score(
    days: f64,
    curve: &UptimeCurve,
    penalty: Option<&PenaltyAdjustment>,
    weights: &PenaltyWeights,
) -> f64 {
    let mut score = uptime_curve(days, curve);

    if let Some(penalty) = penalty {
        score *= penalty.consistency_multiplier.clamp(0.0, 1.0);
        score -= (f64::from(penalty.restarts) * weights.restart_penalty)
            .min(weights.max_restart_penalty);
        if penalty.uptime_frozen {
            score = score.min(weights.frozen_uptime_cap);
        }
    }

    if days < curve.new_node_days {
        score = score.min(curve.new_node_cap);
    }

    score.clamp(0.0, 100.0)
}

/// Logarithmic-elastic storage score relative to the fleet median, plus a
/// capped bonus for capacity that actually holds data.
pub fn storage_score(
    committed_bytes: u64,
    used_gib: f64,
    median_committed: f64,
    curve: &StorageCurve,
) -> f64 {
    let committed = committed_bytes as f64;

    let base = if median_committed > 0.0 {
        (curve.elasticity * (committed / median_committed + 1.0).log2()).min(100.0)
    } else if committed > 0.0 {
        100.0
    } else {
        0.0
    };

    let bonus = if used_gib > 0.0 {
        (curve.bonus_factor * (used_gib + curve.bonus_offset_gib).log2()).min(curve.bonus_cap)
    } else {
        0.0
    };

    (base + bonus).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_uptime_midpoint() {
        let curve = UptimeCurve::default();
        assert!(approx(uptime_curve(7.0, &curve), 50.0));
        assert!(uptime_curve(30.0, &curve) > 99.0);
        assert!(uptime_curve(0.0, &curve) < 20.0);
    }

    #[test]
    fn test_new_node_cap() {
        let curve = UptimeCurve {
            midpoint_days: 0.0,
            ..UptimeCurve::default()
        };
        let weights = PenaltyWeights::default();

        // the raw curve is above the cap at half a day with this midpoint
        assert!(uptime_curve(0.5, &curve) > 20.0);
        assert_eq!(uptime_score(0.5, &curve, None, &weights), 20.0);
        assert!(uptime_score(1.0, &curve, None, &weights) > 20.0);
    }

    #[test]
    fn test_uptime_penalties() {
        let curve = UptimeCurve::default();
        let weights = PenaltyWeights::default();
        let clean = uptime_score(60.0, &curve, None, &weights);

        let neutral = PenaltyAdjustment::default();
        assert_eq!(uptime_score(60.0, &curve, Some(&neutral), &weights), clean);

        let restarts = PenaltyAdjustment {
            restarts: 2,
            ..Default::default()
        };
        let score = uptime_score(60.0, &curve, Some(&restarts), &weights);
        assert!(approx(score, clean - 10.0));

        let many_restarts = PenaltyAdjustment {
            restarts: 100,
            ..Default::default()
        };
        let score = uptime_score(60.0, &curve, Some(&many_restarts), &weights);
        assert!(approx(score, clean - 30.0));

        let inconsistent = PenaltyAdjustment {
            consistency_multiplier: 0.5,
            ..Default::default()
        };
        let score = uptime_score(60.0, &curve, Some(&inconsistent), &weights);
        assert!(approx(score, clean * 0.5));

        let frozen = PenaltyAdjustment {
            uptime_frozen: true,
            ..Default::default()
        };
        assert_eq!(uptime_score(60.0, &curve, Some(&frozen), &weights), 20.0);
    }

    #[test]
    fn test_uptime_never_negative() {
        let penalty = PenaltyAdjustment {
            restarts: 10,
            consistency_multiplier: 0.1,
            ..Default::default()
        };
        let score = uptime_score(
            2.0,
            &UptimeCurve::default(),
            Some(&penalty),
            &PenaltyWeights::default(),
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_storage_at_median() {
        let curve = StorageCurve::default();
        // log2(1 + 1) * 50
        assert!(approx(storage_score(1000, 0.0, 1000.0, &curve), 50.0));
        // log2(3 + 1) * 50 saturates
        assert_eq!(storage_score(3000, 0.0, 1000.0, &curve), 100.0);
    }

    #[test]
    fn test_storage_zero_median_fallback() {
        let curve = StorageCurve::default();
        assert_eq!(storage_score(1, 0.0, 0.0, &curve), 100.0);
        assert_eq!(storage_score(0, 0.0, 0.0, &curve), 0.0);
    }

    #[test]
    fn test_storage_utilization_bonus() {
        let curve = StorageCurve::default();
        let idle = storage_score(500, 0.0, 1000.0, &curve);

        // 5 * log2(0 + 2) = 5 for a sliver of used space
        let barely_used = storage_score(500, 1e-9, 1000.0, &curve);
        assert!(approx(barely_used - idle, 5.0));

        // 5 * log2(62 + 2) = 30, capped at 15
        let heavily_used = storage_score(500, 62.0, 1000.0, &curve);
        assert!(approx(heavily_used - idle, 15.0));
    }

    #[test]
    fn test_storage_total_capped() {
        let curve = StorageCurve::default();
        assert_eq!(storage_score(10_000, 500.0, 1000.0, &curve), 100.0);
    }
}
