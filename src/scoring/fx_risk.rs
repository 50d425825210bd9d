//! Currency risk model.
//!
//! Two distinct quantities live here:
//!
//! - the **haircut**: an Ornstein-Uhlenbeck downside bound applied when
//!   converting future coupon/redemption cashflows into the report currency
//! - the **capital penalty**: the per-pair term subtracted from a profile's
//!   base score for holding an unhedged foreign-currency bond
//!
//! The OU effective horizon `T_eff = (1 - e^(-2kT)) / (2k)` saturates at
//! `1/(2k)` as `T -> inf`, so long-dated bonds in mean-reverting currencies
//! do not accumulate unbounded haircuts. Currencies with a structural
//! depreciation trend carry a near-zero `k` in the reference table, which
//! makes `T_eff` grow almost linearly instead.

use crate::config::RefData;
use crate::data::ecb::FxRates;
use crate::domain::FxPhase;

/// One-sided 95% confidence z-score.
const Z_95: f64 = 1.645;

/// FX conversion with phase-dependent safety margins.
pub struct FxRiskModel<'a> {
    ref_data: &'a RefData,
    rates: &'a FxRates,
}

impl<'a> FxRiskModel<'a> {
    pub fn new(ref_data: &'a RefData, rates: &'a FxRates) -> Self {
        Self { ref_data, rates }
    }

    /// OU effective variance horizon.
    fn effective_horizon(kappa: f64, t: f64) -> f64 {
        (1.0 - (-2.0 * kappa * t).exp()) / (2.0 * kappa)
    }

    /// Downside haircut for holding `ccy` exposure over `horizon` years.
    pub fn haircut(&self, ccy: &str, horizon: f64) -> f64 {
        let risk = self.ref_data.currency_risk(ccy);
        let t_eff = Self::effective_horizon(risk.mean_reversion, horizon.max(0.0));
        (risk.annual_vol * t_eff.sqrt() * Z_95).min(risk.hard_cap)
    }

    /// Expected conversion multiplier from `bond_ccy` into `report_ccy`.
    ///
    /// Same currency -> `1.0`. Otherwise the spot cross-rate via the EUR
    /// pivot, degraded by the phase haircut (`Buy` is spot-only, `Coupon`
    /// evaluates the haircut at `T/2`, `Maturity` at the full horizon).
    pub fn multiplier(&self, bond_ccy: &str, report_ccy: &str, phase: FxPhase, years: f64) -> f64 {
        if bond_ccy == report_ccy {
            return 1.0;
        }

        let spot = self.rates.cross(bond_ccy, report_ccy).unwrap_or_else(|| {
            tracing::warn!(bond_ccy, report_ccy, "missing FX rate, assuming parity");
            1.0
        });

        let horizon = match phase {
            FxPhase::Buy => return spot,
            FxPhase::Coupon => years / 2.0,
            FxPhase::Maturity => years,
        };

        spot * (1.0 - self.haircut(bond_ccy, horizon))
    }
}

/// FX capital penalty subtracted from a profile's base score.
///
/// `lambda` is the calibrated run-wide scale times the profile factor;
/// `correlation` is the wrong-way amplifier from the credit model. Bonds in
/// the report currency carry no penalty at all.
#[allow(clippy::too_many_arguments)]
pub fn fx_capital_penalty(
    ref_data: &RefData,
    bond_ccy: &str,
    report_ccy: &str,
    years: f64,
    capital_weight: f64,
    capital_sensitivity: f64,
    lambda: f64,
    correlation: f64,
) -> f64 {
    if bond_ccy == report_ccy {
        return 0.0;
    }
    let sigma = ref_data.pair_sigma(bond_ccy, report_ccy);
    let risk_sensitivity = 1.0 + capital_weight * capital_sensitivity;
    lambda * (1.0 - (-sigma * years.sqrt() * risk_sensitivity).exp()) * correlation
}
