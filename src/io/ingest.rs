//! CSV ingest and yield derivation.
//!
//! This module turns raw bond rows into scored-ready `Bond` records:
//!
//! - **Strict schema** for required fields (clear errors + exit code 4)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Filtering** of bonds the scoring model cannot treat sensibly:
//!   zero-coupon issues and anything within a year of maturity
//! - **Yield derivation** per report currency, with the phase-dependent
//!   FX haircuts applied to future cashflows
//!
//! The scraping collaborator that produces the CSV is out of scope; rows
//! are already assumed to be one bond each with columns
//! `isin,issuer,currency,price,coupon_pct,maturity`.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{Bond, FxPhase, RawBond, ReportCurrency};
use crate::error::AppError;
use crate::scoring::fx_risk::FxRiskModel;

/// Theoretical amount invested, used to normalize final-capital figures.
const INIT_INVESTMENT: f64 = 1000.0;

/// Bonds this close to maturity (or closer) are dropped: their return is
/// dominated by redemption mechanics the model does not capture.
const MIN_YEARS: f64 = 1.0;

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: derived bonds + what happened to the rest.
#[derive(Debug, Clone)]
pub struct IngestedBonds {
    pub bonds: Vec<Bond>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Rows dropped by the maturity/coupon filters (not errors).
    pub rows_filtered: usize,
}

/// Load raw rows from CSV and derive the scoring fields.
pub fn load_bonds_csv(
    path: &Path,
    model: &FxRiskModel<'_>,
    today: NaiveDate,
) -> Result<IngestedBonds, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::data(format!("Failed to open bonds CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut bonds = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_filtered = 0usize;

    for (idx, result) in reader.deserialize::<RawBond>().enumerate() {
        // +2: records start after the header line, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let raw = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match derive_bond(&raw, model, today) {
            Some(bond) => bonds.push(bond),
            None => rows_filtered += 1,
        }
    }

    if bonds.is_empty() && rows_read > 0 {
        return Err(AppError::data(format!(
            "No usable bonds in '{}' ({} rows read, {} filtered, {} errors).",
            path.display(),
            rows_read,
            rows_filtered,
            row_errors.len()
        )));
    }

    Ok(IngestedBonds {
        bonds,
        row_errors,
        rows_read,
        rows_filtered,
    })
}

/// Derive the per-report-currency yield figures for one raw row.
///
/// Returns `None` for rows the universe excludes by policy: non-positive
/// price, zero coupon (different yield logic entirely), or too close to
/// maturity.
pub fn derive_bond(raw: &RawBond, model: &FxRiskModel<'_>, today: NaiveDate) -> Option<Bond> {
    if raw.price <= 0.0 || raw.coupon_pct <= 0.0 {
        return None;
    }

    let years = ((raw.maturity - today).num_days() as f64 / 365.25).floor();
    if years <= MIN_YEARS {
        return None;
    }

    let (current_yield_eur, total_yield_eur) = yields_for(raw, model, ReportCurrency::Eur, years);
    let (current_yield_chf, total_yield_chf) = yields_for(raw, model, ReportCurrency::Chf, years);

    Some(Bond {
        isin: raw.isin.clone(),
        issuer: raw.issuer.clone(),
        currency: raw.currency.clone(),
        price: raw.price,
        coupon_pct: raw.coupon_pct,
        maturity: raw.maturity,
        years_to_maturity: years,
        current_yield_eur,
        total_yield_eur,
        current_yield_chf,
        total_yield_chf,
    })
}

/// Coupon yield and projected final capital in one report currency.
///
/// The projection buys at spot, converts the coupon stream with a moderate
/// haircut (horizon `T/2`) and the redemption with the full-horizon
/// haircut, per the phase model.
fn yields_for(
    raw: &RawBond,
    model: &FxRiskModel<'_>,
    report: ReportCurrency,
    years: f64,
) -> (f64, f64) {
    let fx_buy = model.multiplier(&raw.currency, report.code(), FxPhase::Buy, years);
    let fx_coupon = model.multiplier(&raw.currency, report.code(), FxPhase::Coupon, years);
    let fx_maturity = model.multiplier(&raw.currency, report.code(), FxPhase::Maturity, years);

    let price_ref = raw.price * fx_buy;
    let current_yield = raw.coupon_pct * 100.0 / price_ref;

    // Number of securities bought with the reference investment.
    let n_bonds = INIT_INVESTMENT / price_ref;
    let coupon_income = n_bonds * raw.coupon_pct * years * fx_coupon;
    let redemption = n_bonds * 100.0 * fx_maturity;

    (current_yield, coupon_income + redemption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefData;
    use crate::data::sample::offline_rates;

    fn raw(ccy: &str, price: f64, coupon: f64, maturity: (i32, u32, u32)) -> RawBond {
        RawBond {
            isin: "XS0000000001".to_string(),
            issuer: "GERMANY".to_string(),
            currency: ccy.to_string(),
            price,
            coupon_pct: coupon,
            maturity: NaiveDate::from_ymd_opt(maturity.0, maturity.1, maturity.2).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn same_currency_projection_has_no_fx_effect() {
        let ref_data = RefData::load(None).unwrap();
        let rates = offline_rates();
        let model = FxRiskModel::new(&ref_data, &rates);

        let bond = derive_bond(&raw("EUR", 100.0, 3.0, (2035, 9, 7)), &model, today()).unwrap();
        assert!((bond.years_to_maturity - 9.0).abs() < 1e-12);
        assert!((bond.current_yield_eur - 3.0).abs() < 1e-9);
        // 10 bonds * (3 * 9 coupons + 100 redemption) = 1270 per 1000.
        assert!((bond.total_yield_eur - 1270.0).abs() < 1e-6);
    }

    #[test]
    fn foreign_bond_total_is_haircut_below_spot_conversion() {
        let ref_data = RefData::load(None).unwrap();
        let rates = offline_rates();
        let model = FxRiskModel::new(&ref_data, &rates);

        let bond = derive_bond(&raw("PLN", 100.0, 3.0, (2035, 9, 7)), &model, today()).unwrap();
        // Spot-only conversion would reproduce the same-currency figure;
        // the haircuts must land strictly below it.
        assert!(bond.total_yield_eur < 1270.0);
        assert!(bond.total_yield_eur > 0.0);
    }

    #[test]
    fn short_and_zero_coupon_bonds_are_filtered() {
        let ref_data = RefData::load(None).unwrap();
        let rates = offline_rates();
        let model = FxRiskModel::new(&ref_data, &rates);

        assert!(derive_bond(&raw("EUR", 100.0, 3.0, (2027, 6, 1)), &model, today()).is_none());
        assert!(derive_bond(&raw("EUR", 100.0, 0.0, (2035, 8, 7)), &model, today()).is_none());
        assert!(derive_bond(&raw("EUR", 0.0, 3.0, (2035, 8, 7)), &model, today()).is_none());
    }
}
