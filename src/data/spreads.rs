//! Sovereign credit-spread resolver.
//!
//! Spread data comes from two independent HTTP providers merged by
//! priority, with a synthetic table derived from the trust rules as the
//! last resort:
//!
//! 1. the spread-board API (country -> spread vs Bund, bps)
//! 2. the 10y government-yield table, filling only the gaps
//!    (`spread = max(0, yield - germany_yield) * 100`)
//! 3. trust-rule keywords exploded into `KEYWORD -> spread_bps`
//!
//! No provider failure is fatal: each source is independently caught and
//! logged, and a stale or synthetic table is an acceptable degraded result.

use std::collections::BTreeMap;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::data::country;
use crate::domain::TrustRule;
use crate::error::AppError;
use crate::scoring::issuer::IssuerTrust;

const SPREAD_BOARD_URL: &str = "https://api.spreadboard.eu/v1/sovereign-spreads";
const GOV_YIELD_URL: &str = "https://api.ratewatch.eu/v1/gov-bonds/10y";

const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

/// Neutral spread (bps) when every lookup layer misses.
const DEFAULT_FALLBACK_SPREAD: f64 = 180.0;

/// Merged spread table: normalized country key -> spread in basis points.
pub type SpreadMap = BTreeMap<String, f64>;

/// A source of sovereign spreads.
pub trait SpreadProvider {
    fn name(&self) -> &'static str;
    fn fetch(&self) -> Result<SpreadMap, AppError>;
}

/// Primary source: a JSON API quoting spreads vs Bund directly.
pub struct SpreadBoardProvider {
    client: Client,
    url: String,
}

impl SpreadBoardProvider {
    pub fn from_env() -> Self {
        let url = std::env::var("SPREAD_BOARD_URL").unwrap_or_else(|_| SPREAD_BOARD_URL.to_string());
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpreadBoardRow {
    country: String,
    spread_bps: f64,
}

impl SpreadProvider for SpreadBoardProvider {
    fn name(&self) -> &'static str {
        "SpreadBoard"
    }

    fn fetch(&self) -> Result<SpreadMap, AppError> {
        let rows: Vec<SpreadBoardRow> = self
            .client
            .get(&self.url)
            .timeout(HTTP_TIMEOUT)
            .send()
            .map_err(|e| AppError::data(format!("SpreadBoard request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::data(format!("SpreadBoard request failed: {e}")))?
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse SpreadBoard response: {e}")))?;

        let mut out = SpreadMap::new();
        for row in rows {
            let key = country::normalize(&row.country);
            if !key.is_empty() && row.spread_bps.is_finite() {
                out.insert(key, row.spread_bps);
            }
        }
        Ok(out)
    }
}

/// Secondary source: 10y government yields, turned into spreads vs Germany.
pub struct GovYieldProvider {
    client: Client,
    url: String,
}

impl GovYieldProvider {
    pub fn from_env() -> Self {
        let url = std::env::var("GOV_YIELD_URL").unwrap_or_else(|_| GOV_YIELD_URL.to_string());
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GovYieldRow {
    country: String,
    yield_pct: f64,
}

impl SpreadProvider for GovYieldProvider {
    fn name(&self) -> &'static str {
        "GovYield10y"
    }

    fn fetch(&self) -> Result<SpreadMap, AppError> {
        let rows: Vec<GovYieldRow> = self
            .client
            .get(&self.url)
            .timeout(HTTP_TIMEOUT)
            .send()
            .map_err(|e| AppError::data(format!("GovYield request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::data(format!("GovYield request failed: {e}")))?
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse GovYield response: {e}")))?;

        derive_spreads_vs_germany(&rows)
    }
}

fn derive_spreads_vs_germany(rows: &[GovYieldRow]) -> Result<SpreadMap, AppError> {
    let germany_yield = rows
        .iter()
        .find(|r| country::normalize(&r.country) == "GERMANIA")
        .map(|r| r.yield_pct);

    let Some(germany_yield) = germany_yield else {
        // Without the Bund anchor the whole table is unusable.
        return Ok(SpreadMap::new());
    };

    let mut out = SpreadMap::new();
    for row in rows {
        if !(row.yield_pct.is_finite() && row.yield_pct > 0.0) {
            continue;
        }
        let key = country::normalize(&row.country);
        if key.is_empty() {
            continue;
        }
        out.insert(key, (row.yield_pct - germany_yield).max(0.0) * 100.0);
    }
    Ok(out)
}

/// Merge providers by priority; synthesize from the trust rules when every
/// live source comes back empty.
pub fn resolve_spread_map(providers: &[&dyn SpreadProvider], rules: &[TrustRule]) -> SpreadMap {
    let mut merged = SpreadMap::new();

    for provider in providers {
        match provider.fetch() {
            Ok(table) if table.is_empty() => {
                warn!(provider = provider.name(), "provider returned no spreads");
            }
            Ok(table) => {
                let mut filled = 0usize;
                for (key, spread) in table {
                    // Earlier providers win; later ones fill gaps only.
                    if !merged.contains_key(&key) {
                        merged.insert(key, spread);
                        filled += 1;
                    }
                }
                info!(provider = provider.name(), filled, "loaded sovereign spreads");
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "provider failed");
            }
        }
    }

    if merged.is_empty() {
        info!("all spread providers empty, using trust-rule fallback table");
        return fallback_from_rules(rules);
    }

    merged
}

/// Explode the trust rules into a `KEYWORD -> spread_bps` table.
pub fn fallback_from_rules(rules: &[TrustRule]) -> SpreadMap {
    let mut out = SpreadMap::new();
    for rule in rules {
        for keyword in &rule.keywords {
            out.entry(keyword.to_uppercase()).or_insert(rule.spread_bps);
        }
    }
    out
}

/// Spread (bps) for one issuer, with graceful degradation.
///
/// Resolution order: normalized direct hit in the merged map, synthetic
/// spread from the issuer's trust score, neutral default. Blank issuers go
/// straight to the neutral default.
pub fn spread_for_issuer(issuer: &str, spreads: &SpreadMap, trust: &IssuerTrust<'_>) -> f64 {
    if issuer.trim().is_empty() {
        return DEFAULT_FALLBACK_SPREAD;
    }

    let key = country::normalize(issuer.trim());
    if let Some(&direct) = spreads.get(&key) {
        if direct.is_finite() {
            return direct;
        }
    }

    let trust_score = trust.trust_score(issuer);
    if trust_score.is_finite() && trust_score > 0.0 {
        return trust_to_spread(trust_score);
    }

    warn!(issuer, "missing sovereign spread mapping");
    DEFAULT_FALLBACK_SPREAD
}

/// Convex inverse map from trust score to a synthetic spread.
///
/// Small trust losses move the spread a little, large losses steeply, which
/// preserves tail risk in the synthetic table:
/// trust 0.98 -> ~25bp, 0.85 -> ~39bp, 0.70 -> ~79bp, 0.60 -> ~121bp.
fn trust_to_spread(trust: f64) -> f64 {
    let trust = trust.clamp(0.6, 1.0);
    let x = 1.0 - trust;
    (25.0 + 600.0 * x * x).clamp(20.0, 600.0)
}
