//! Shared scoring-pipeline logic used by the `score` and `rank` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! reference tables -> FX rates -> bond universe -> sovereign spreads ->
//! calibration -> scoring -> ranked rows (once per report currency).
//!
//! Everything network-facing degrades instead of failing: a dead FX feed
//! falls back to the bundled snapshot, dead spread providers fall back to
//! the trust-rule table. The only fatal conditions are an unreadable
//! reference config and an empty bond universe.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::RefData;
use crate::data::ecb::{EcbClient, FxRates};
use crate::data::sample;
use crate::data::spreads::{
    GovYieldProvider, SpreadBoardProvider, SpreadMap, SpreadProvider, fallback_from_rules,
    resolve_spread_map,
};
use crate::domain::{Bond, ReportCurrency, RunConfig};
use crate::error::AppError;
use crate::io::ingest::{RowError, derive_bond, load_bonds_csv};
use crate::report::{ReportRow, rank_rows};
use crate::scoring::engine::{ScoringContext, score_universe};
use crate::scoring::fx_risk::FxRiskModel;
use crate::scoring::issuer::IssuerTrust;

/// Ranked output for one report currency.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub report: ReportCurrency,
    pub lambda_base: f64,
    pub rows: Vec<ReportRow>,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ref_data: RefData,
    pub bonds: Vec<Bond>,
    pub spreads: SpreadMap,
    pub reports: Vec<ReportOutput>,
    pub unknown_issuers: Vec<String>,
    pub ingest_errors: Vec<RowError>,
}

/// Execute the full scoring pipeline and return the computed outputs.
pub fn run_scoring(config: &RunConfig) -> Result<RunOutput, AppError> {
    let ref_data = RefData::load(config.config_dir.as_deref())?;
    let today = chrono::Local::now().date_naive();

    let rates = load_rates(config);
    let model = FxRiskModel::new(&ref_data, &rates);

    let (bonds, ingest_errors) = load_universe(config, &model, today)?;
    info!(bonds = bonds.len(), "bond universe ready");

    let spreads = load_spreads(config, &ref_data);
    info!(countries = spreads.len(), "sovereign spreads ready");

    let trust = IssuerTrust::new(&ref_data.trust_rules, ref_data.default_trust);

    let mut reports = Vec::with_capacity(ReportCurrency::ALL.len());
    for report in ReportCurrency::ALL {
        let ctx = ScoringContext::new(&ref_data, report, &bonds, &spreads, &trust);
        info!(report = report.code(), lambda_base = ctx.lambda_base, "calibrated");

        let scores = score_universe(&ctx, &bonds);
        let rows = rank_rows(&bonds, scores, &config.rank_profile);
        reports.push(ReportOutput {
            report,
            lambda_base: ctx.lambda_base,
            rows,
        });
    }

    let unknown_issuers = trust.unknown_issuers();
    if !unknown_issuers.is_empty() {
        warn!(count = unknown_issuers.len(), "issuers matched no trust rule");
    }
    drop(trust);

    Ok(RunOutput {
        ref_data,
        bonds,
        spreads,
        reports,
        unknown_issuers,
        ingest_errors,
    })
}

fn load_rates(config: &RunConfig) -> FxRates {
    if config.offline {
        return sample::offline_rates();
    }
    match EcbClient::from_env().fetch_rates() {
        Ok(rates) => {
            info!(currencies = rates.len(), "loaded ECB reference rates");
            rates
        }
        Err(e) => {
            warn!(error = %e, "ECB fetch failed, using bundled FX snapshot");
            sample::offline_rates()
        }
    }
}

fn load_universe(
    config: &RunConfig,
    model: &FxRiskModel<'_>,
    today: NaiveDate,
) -> Result<(Vec<Bond>, Vec<RowError>), AppError> {
    match &config.bonds_csv {
        Some(path) => {
            let ingested = load_bonds_csv(path, model, today)?;
            for err in &ingested.row_errors {
                warn!(line = err.line, "{}", err.message);
            }
            if ingested.rows_filtered > 0 {
                info!(filtered = ingested.rows_filtered, "rows dropped by universe filters");
            }
            Ok((ingested.bonds, ingested.row_errors))
        }
        None => {
            if config.sample_count == 0 {
                return Err(AppError::config("Sample count must be > 0."));
            }
            let raw = sample::generate_universe(config.sample_count, config.sample_seed, today)?;
            let bonds: Vec<Bond> = raw
                .iter()
                .filter_map(|r| derive_bond(r, model, today))
                .collect();
            if bonds.is_empty() {
                return Err(AppError::data("Synthetic universe came out empty."));
            }
            Ok((bonds, Vec::new()))
        }
    }
}

fn load_spreads(config: &RunConfig, ref_data: &RefData) -> SpreadMap {
    if config.offline {
        return fallback_from_rules(&ref_data.trust_rules);
    }
    let primary = SpreadBoardProvider::from_env();
    let secondary = GovYieldProvider::from_env();
    resolve_spread_map(
        &[&primary as &dyn SpreadProvider, &secondary],
        &ref_data.trust_rules,
    )
}
