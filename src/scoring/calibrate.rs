//! Run-wide penalty calibration.
//!
//! The FX penalty needs a scale that tracks the market: in a rich market a
//! fixed penalty would barely reorder anything, in a cheap one it would
//! dominate. `lambda_base` is derived from the distribution of
//! balanced-profile base scores across the whole universe, taken at a
//! percentile rather than the mean so one bad or missing bond cannot move
//! it.

use crate::domain::{Bond, ReportCurrency};
use crate::math::norm_winsorized;

/// Balanced blend used only for calibration.
const CAL_COUPON_WEIGHT: f64 = 0.55;
const CAL_TOTAL_WEIGHT: f64 = 0.45;

/// Percentile rank of the calibration point (nearest-rank method).
const CAL_PERCENTILE: f64 = 0.60;

/// Neutral scale when the universe is empty.
const LAMBDA_DEFAULT: f64 = 0.5;

/// Derive the run-wide FX penalty scale from the bond universe.
pub fn lambda_base(bonds: &[Bond], report: ReportCurrency) -> f64 {
    if bonds.is_empty() {
        return LAMBDA_DEFAULT;
    }

    let current: Vec<f64> = bonds.iter().map(|b| b.current_yield(report)).collect();
    let total: Vec<f64> = bonds.iter().map(|b| b.total_yield(report)).collect();

    let mut base_scores: Vec<f64> = bonds
        .iter()
        .map(|b| {
            let norm_c = norm_winsorized(b.current_yield(report), &current);
            let norm_t = norm_winsorized(b.total_yield(report), &total);
            CAL_COUPON_WEIGHT * norm_c + CAL_TOTAL_WEIGHT * norm_t
        })
        .collect();
    base_scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let idx = (CAL_PERCENTILE * (base_scores.len() - 1) as f64).floor() as usize;
    base_scores[idx]
}
