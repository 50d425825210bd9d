//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during scoring
//! - exported to CSV/HTML report rows
//! - reloaded later for comparisons across runs

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Currency the report (and therefore the yield normalization) is expressed in.
///
/// The universe is scored once per report currency; rankings in EUR and CHF
/// can differ because the FX penalty and the derived yield figures differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportCurrency {
    Eur,
    Chf,
}

impl ReportCurrency {
    pub fn code(self) -> &'static str {
        match self {
            ReportCurrency::Eur => "EUR",
            ReportCurrency::Chf => "CHF",
        }
    }

    pub const ALL: [ReportCurrency; 2] = [ReportCurrency::Eur, ReportCurrency::Chf];
}

/// Investment phase an FX conversion applies to.
///
/// - `Buy`: purchase at spot, no haircut
/// - `Coupon`: coupon stream, haircut evaluated at half the horizon
/// - `Maturity`: redemption, haircut at the full horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxPhase {
    Buy,
    Coupon,
    Maturity,
}

/// Raw bond row as handed over by the scraping boundary (CSV) or the
/// sample generator, before yield derivation and filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBond {
    pub isin: String,
    pub issuer: String,
    pub currency: String,
    pub price: f64,
    pub coupon_pct: f64,
    pub maturity: NaiveDate,
}

/// Immutable bond fact record.
///
/// Built once by ingest (or the sample generator) and never mutated by
/// scoring. The derived yield figures are currency-pair specific, so each is
/// carried for both report currencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bond {
    pub isin: String,
    /// Raw issuer string as published, e.g. `"ITALY VALORE"`.
    pub issuer: String,
    /// ISO 4217 code of the bond's own currency.
    pub currency: String,
    /// Clean price in the bond's own currency.
    pub price: f64,
    pub coupon_pct: f64,
    pub maturity: NaiveDate,
    /// Whole years to maturity, floored on a 365.25-day year.
    pub years_to_maturity: f64,
    /// Coupon yield on the EUR purchase price, percent.
    pub current_yield_eur: f64,
    /// Projected total amount at maturity per 1000 EUR invested.
    pub total_yield_eur: f64,
    pub current_yield_chf: f64,
    pub total_yield_chf: f64,
}

impl Bond {
    /// Coupon-yield figure for the given report currency.
    pub fn current_yield(&self, report: ReportCurrency) -> f64 {
        match report {
            ReportCurrency::Eur => self.current_yield_eur,
            ReportCurrency::Chf => self.current_yield_chf,
        }
    }

    /// Total-amount-to-maturity figure for the given report currency.
    pub fn total_yield(&self, report: ReportCurrency) -> f64 {
        match report {
            ReportCurrency::Eur => self.total_yield_eur,
            ReportCurrency::Chf => self.total_yield_chf,
        }
    }
}

/// Investor profile parameters.
///
/// `alpha` weighs coupon yield against total yield in the base score; the
/// remaining knobs scale the FX penalty and the credit-quality exponent.
/// All four are empirically calibrated and therefore config data, not code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorProfile {
    pub name: String,
    pub alpha: f64,
    pub lambda_factor: f64,
    pub capital_sensitivity: f64,
    pub risk_aversion: f64,
}

/// Per-currency FX risk parameters for the Ornstein-Uhlenbeck haircut model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRiskProfile {
    /// Annualized volatility of the EUR cross rate.
    pub annual_vol: f64,
    /// Mean-reversion speed (kappa). Near zero for currencies with a
    /// structural depreciation trend, so the effective horizon keeps growing.
    pub mean_reversion: f64,
    /// Upper bound on the haircut regardless of horizon.
    pub hard_cap: f64,
    pub group: String,
}

/// One issuer-classification rule: first keyword substring match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustRule {
    pub keywords: Vec<String>,
    pub trust: f64,
    /// Indicative 10y spread vs the reference AAA issuer, basis points.
    /// Used to synthesize a spread table when every live provider fails.
    pub spread_bps: f64,
}

/// Scores for one bond, keyed by profile name.
pub type ProfileScores = BTreeMap<String, f64>;

/// Run-level configuration resolved from CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// CSV with raw bond rows; `None` means generate a sample universe.
    pub bonds_csv: Option<PathBuf>,
    /// Skip every network provider and use bundled fallbacks.
    pub offline: bool,
    pub sample_count: usize,
    pub sample_seed: u64,
    /// Profile the rankings are sorted on.
    pub rank_profile: String,
    pub top_n: usize,
    /// Optional directory overriding the bundled reference tables.
    pub config_dir: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub html_dir: Option<PathBuf>,
    pub alerts_path: PathBuf,
}
