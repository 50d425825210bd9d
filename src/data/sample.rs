//! Offline fallbacks: a bundled FX snapshot and a synthetic bond universe.
//!
//! `--offline` runs the full pipeline without touching the network, which
//! keeps the tool usable behind firewalls and makes end-to-end behavior
//! reproducible (seeded RNG, fixed snapshot).

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::ecb::FxRates;
use crate::domain::RawBond;
use crate::error::AppError;

/// ECB reference rates snapshot (mid-2026), used when the live fetch fails
/// or `--offline` is set.
pub fn offline_rates() -> FxRates {
    FxRates::from_pairs(&[
        ("USD", 1.0812),
        ("GBP", 0.8421),
        ("CHF", 0.9417),
        ("JPY", 163.25),
        ("DKK", 7.4603),
        ("SEK", 11.312),
        ("NOK", 11.585),
        ("PLN", 4.2735),
        ("CZK", 25.214),
        ("HUF", 395.40),
        ("RON", 4.9772),
        ("BGN", 1.9558),
        ("TRY", 37.215),
    ])
}

/// Issuer labels paired with the currency their debt is denominated in.
///
/// Labels deliberately include program decorations (`BTP VALORE`,
/// `BUND`) so the sample exercises the same classification paths as
/// scraped data.
const SAMPLE_ISSUERS: &[(&str, &str)] = &[
    ("BUND", "EUR"),
    ("GERMANY", "EUR"),
    ("FINLAND", "EUR"),
    ("NETHERLANDS", "EUR"),
    ("AUSTRIA", "EUR"),
    ("FRANCE", "EUR"),
    ("BELGIUM", "EUR"),
    ("IRELAND", "EUR"),
    ("SPAIN", "EUR"),
    ("PORTUGAL", "EUR"),
    ("ITALY", "EUR"),
    ("BTP VALORE", "EUR"),
    ("BTP GREEN", "EUR"),
    ("GREECE", "EUR"),
    ("CROATIA", "EUR"),
    ("SLOVENIA", "EUR"),
    ("UNITED KINGDOM", "GBP"),
    ("SWEDEN", "SEK"),
    ("NORWAY", "NOK"),
    ("DENMARK", "DKK"),
    ("POLAND", "PLN"),
    ("HUNGARY", "HUF"),
    ("ROMANIA", "RON"),
    ("BULGARIA", "BGN"),
    ("TURKEY", "TRY"),
];

/// Generate a deterministic synthetic universe of `count` bonds.
pub fn generate_universe(
    count: usize,
    seed: u64,
    today: NaiveDate,
) -> Result<Vec<RawBond>, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    // Prices cluster just under par; the tails produce the discount/premium
    // bonds the winsorized normalization has to cope with.
    let price_noise = Normal::<f64>::new(0.0, 6.0)
        .map_err(|e| AppError::data(format!("Price noise distribution error: {e}")))?;

    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let (issuer, currency) = SAMPLE_ISSUERS[rng.gen_range(0..SAMPLE_ISSUERS.len())];
        let price = (98.0 + price_noise.sample(&mut rng)).clamp(55.0, 135.0);
        let coupon_pct = (rng.gen_range(0.5..6.5_f64) * 8.0).round() / 8.0;
        let years = rng.gen_range(2..=25);
        let maturity = today + Duration::days((years as f64 * 365.25).round() as i64);

        out.push(RawBond {
            isin: format!("XS{:010}", 7_000_000_000_u64 + i as u64),
            issuer: issuer.to_string(),
            currency: currency.to_string(),
            price,
            coupon_pct,
            maturity,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let a = generate_universe(50, 42, today).unwrap();
        let b = generate_universe(50, 42, today).unwrap();
        assert_eq!(a.len(), 50);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.isin, y.isin);
            assert_eq!(x.issuer, y.issuer);
            assert!((x.price - y.price).abs() < 1e-12);
            assert_eq!(x.maturity, y.maturity);
        }
    }

    #[test]
    fn sample_bonds_are_ingestible() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        for raw in generate_universe(200, 7, today).unwrap() {
            assert!(raw.price > 0.0);
            assert!(raw.coupon_pct > 0.0);
            assert!(raw.maturity > today + Duration::days(365));
            assert!(offline_rates().rate(&raw.currency).is_some());
        }
    }
}
