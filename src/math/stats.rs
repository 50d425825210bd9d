//! Order statistics and winsorized normalization.
//!
//! Yield distributions in a sovereign universe have fat tails: one
//! distressed issuer can quote a yield several times the median. Min/max
//! scaling would hand that bond the entire [0,1] range, so normalization is
//! winsorized at the 5th/95th percentiles instead of discarding outliers
//! from the sample.

/// Winsorization bounds, as percentile ranks.
const WINSOR_LO: f64 = 0.05;
const WINSOR_HI: f64 = 0.95;

/// Percentile via linear interpolation between order statistics.
///
/// `index = p * (n - 1)`; fractional indices interpolate between the two
/// neighboring sorted values. Empty input returns 0.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let index = p * (sorted.len() - 1) as f64;
    let lo = index.floor() as usize;
    let hi = index.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }

    let w = index - lo as f64;
    sorted[lo] * (1.0 - w) + sorted[hi] * w
}

/// Scale `v` into [0,1] against the winsorized range of `sample`.
///
/// A degenerate sample (5th and 95th percentile coincide) returns 1.0:
/// every bond is equally attractive on this dimension, and the caller never
/// has to deal with a divide-by-zero.
pub fn norm_winsorized(v: f64, sample: &[f64]) -> f64 {
    let lo = percentile(sample, WINSOR_LO);
    let hi = percentile(sample, WINSOR_HI);
    if hi == lo {
        return 1.0;
    }
    ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_between_order_stats() {
        let values = [10.0, 20.0, 30.0, 40.0];
        // index = 0.5 * 3 = 1.5 -> halfway between 20 and 30
        assert!((percentile(&values, 0.5) - 25.0).abs() < 1e-12);
        assert!((percentile(&values, 0.0) - 10.0).abs() < 1e-12);
        assert!((percentile(&values, 1.0) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn norm_stays_in_unit_interval() {
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        for &v in &[-100.0, 0.0, 3.3, 10.0, 1e6] {
            let n = norm_winsorized(v, &sample);
            assert!((0.0..=1.0).contains(&n), "norm({v}) = {n} out of range");
        }
    }

    #[test]
    fn outliers_clamp_instead_of_stretching() {
        // The 1000.0 outlier should not compress everything else toward 0.
        let sample = [2.0, 2.5, 3.0, 3.5, 4.0, 1000.0];
        let mid = norm_winsorized(3.0, &sample);
        assert!(mid > 0.3, "mid-market bond crushed by outlier: {mid}");
        assert!((norm_winsorized(1000.0, &sample) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_sample_returns_one() {
        let sample = [4.2, 4.2, 4.2, 4.2];
        assert!((norm_winsorized(4.2, &sample) - 1.0).abs() < 1e-12);
        assert!((norm_winsorized(-1.0, &sample) - 1.0).abs() < 1e-12);
    }
}
