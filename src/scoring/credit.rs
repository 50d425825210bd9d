//! Sovereign credit-quality model.
//!
//! Three maps compose the credit leg of the score:
//!
//! - `credit_quality`: spread -> smooth quality in [0.10, 0.95]
//! - `logistic_trust`: quality -> trust with a steep cliff at 0.55
//! - `fx_credit_correlation`: quality -> wrong-way-risk multiplier
//!
//! The cliff is what keeps "false bargains" (high raw yield on weak credit)
//! from topping the rankings: once quality drops below the midpoint the
//! trust factor collapses much faster than the yield advantage grows.

/// Spread scale (bps) of the exponential quality decay.
const QUALITY_DECAY_BPS: f64 = 600.0;
/// Floor/ceiling keep downstream multipliers away from degenerate 0 or 1.
const QUALITY_FLOOR: f64 = 0.10;
const QUALITY_CEIL: f64 = 0.95;

/// Steepness and midpoint of the trust cliff.
const CLIFF_SLOPE: f64 = 10.0;
const CLIFF_MID: f64 = 0.55;

/// Cap on the wrong-way amplification of the FX penalty.
const WRONG_WAY_SCALE: f64 = 0.8;

/// Convex decay of credit quality in the sovereign spread.
///
/// Near-zero spreads are barely penalized; wide spreads are punished
/// exponentially.
pub fn credit_quality(spread_bps: f64) -> f64 {
    (QUALITY_CEIL * (-spread_bps / QUALITY_DECAY_BPS).exp()).clamp(QUALITY_FLOOR, QUALITY_CEIL)
}

/// Steep sigmoid centered on quality 0.55.
pub fn logistic_trust(quality: f64) -> f64 {
    1.0 / (1.0 + (-CLIFF_SLOPE * (quality - CLIFF_MID)).exp())
}

/// Wrong-way-risk amplifier for the FX penalty.
///
/// Sovereign stress and currency depreciation are empirically correlated, so
/// weaker credits get their FX penalty scaled up instead of treating the two
/// risks as independent.
pub fn fx_credit_correlation(quality: f64) -> f64 {
    1.0 + ((1.0 - quality) * WRONG_WAY_SCALE).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_decays_and_is_convex() {
        let low = credit_quality(50.0);
        let mid = credit_quality(200.0);
        let high = credit_quality(500.0);

        assert!(low > mid && mid > high);
        // Decay accelerates in the stressed zone.
        assert!((low - mid) < (mid - high));
    }

    #[test]
    fn quality_respects_floor_and_ceiling() {
        assert!((credit_quality(0.0) - 0.95).abs() < 1e-12);
        assert!((credit_quality(5000.0) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn quality_matches_calibrated_point() {
        // 160bp is roughly an A-rated euro sovereign.
        assert!((credit_quality(160.0) - 0.728).abs() < 1e-3);
    }

    #[test]
    fn trust_cliff_is_steep_below_midpoint() {
        let above = logistic_trust(0.75);
        let mid = logistic_trust(0.55);
        let below = logistic_trust(0.35);

        assert!(above > mid && mid > below);
        assert!((mid - below) > 0.25, "cliff too shallow: {}", mid - below);
    }

    #[test]
    fn logistic_trust_matches_calibrated_point() {
        assert!((logistic_trust(0.728) - 0.855).abs() < 1e-3);
    }

    #[test]
    fn weaker_credit_amplifies_fx_penalty() {
        assert!(fx_credit_correlation(0.4) > fx_credit_correlation(0.9));
        assert!((fx_credit_correlation(1.0) - 1.0).abs() < 1e-12);
        assert!((fx_credit_correlation(0.728) - 1.218).abs() < 1e-3);
    }
}
