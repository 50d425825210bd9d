//! Reference-table loading.
//!
//! All calibrated tables (investor profiles, currency risk, trust rules,
//! sigma pairs) are YAML documents bundled into the binary. An explicit
//! lifecycle replaces lazy statics: load -> validate -> freeze into a
//! `RefData` that is passed by reference to every scoring call and never
//! mutated afterwards.
//!
//! A `--config-dir` override lets operators recalibrate without rebuilding;
//! any file missing from the override directory falls back to the bundled
//! copy of the same name.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{CurrencyRiskProfile, InvestorProfile, TrustRule};
use crate::error::AppError;

const PROFILES_YAML: &str = include_str!("../../config/profiles.yaml");
const CURRENCY_RISK_YAML: &str = include_str!("../../config/currency_risk.yaml");
const TRUST_RULES_YAML: &str = include_str!("../../config/trust_rules.yaml");

/// Frozen reference data for one run.
#[derive(Debug, Clone)]
pub struct RefData {
    pub profiles: Vec<InvestorProfile>,
    pub currency_risk: HashMap<String, CurrencyRiskProfile>,
    pub default_currency_risk: CurrencyRiskProfile,
    pub trust_rules: Vec<TrustRule>,
    pub default_trust: f64,
    sigma_pairs: HashMap<(String, String), f64>,
    default_sigma: f64,
}

impl RefData {
    /// Load and validate every reference table.
    pub fn load(config_dir: Option<&Path>) -> Result<RefData, AppError> {
        let profiles: ProfilesFile = read_table(config_dir, "profiles.yaml", PROFILES_YAML)?;
        let risk: CurrencyRiskFile = read_table(config_dir, "currency_risk.yaml", CURRENCY_RISK_YAML)?;
        let trust: TrustRulesFile = read_table(config_dir, "trust_rules.yaml", TRUST_RULES_YAML)?;

        let data = RefData {
            profiles: profiles.profiles,
            currency_risk: risk.currencies,
            default_currency_risk: risk.default,
            trust_rules: trust.rules,
            default_trust: trust.default_trust,
            sigma_pairs: risk
                .sigma
                .pairs
                .into_iter()
                .map(|p| (pair_key(&p.a, &p.b), p.sigma))
                .collect(),
            default_sigma: risk.sigma.default,
        };
        data.validate()?;
        Ok(data)
    }

    /// Risk profile for a currency; unknown codes get the conservative default.
    pub fn currency_risk(&self, ccy: &str) -> &CurrencyRiskProfile {
        self.currency_risk
            .get(ccy)
            .unwrap_or(&self.default_currency_risk)
    }

    /// Per-pair sigma for the scoring penalty, symmetric in the pair.
    pub fn pair_sigma(&self, a: &str, b: &str) -> f64 {
        self.sigma_pairs
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or(self.default_sigma)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.profiles.is_empty() {
            return Err(AppError::config("profiles.yaml defines no profiles."));
        }
        for p in &self.profiles {
            if !(0.0..=1.0).contains(&p.alpha) {
                return Err(AppError::config(format!(
                    "Profile '{}': alpha {} outside [0,1].",
                    p.name, p.alpha
                )));
            }
            if p.lambda_factor < 0.0 || p.capital_sensitivity < 0.0 || p.risk_aversion < 0.0 {
                return Err(AppError::config(format!(
                    "Profile '{}': negative parameter.",
                    p.name
                )));
            }
        }
        for rule in &self.trust_rules {
            if rule.keywords.is_empty() {
                return Err(AppError::config("trust_rules.yaml: rule with no keywords."));
            }
            if !(0.0..=1.0).contains(&rule.trust) {
                return Err(AppError::config(format!(
                    "trust_rules.yaml: trust {} outside [0,1].",
                    rule.trust
                )));
            }
        }
        for (ccy, risk) in std::iter::once(("default", &self.default_currency_risk)).chain(
            self.currency_risk
                .iter()
                .map(|(c, r)| (c.as_str(), r)),
        ) {
            if risk.annual_vol <= 0.0 || risk.mean_reversion <= 0.0 || risk.hard_cap <= 0.0 {
                return Err(AppError::config(format!(
                    "currency_risk.yaml: non-positive parameter for {ccy}."
                )));
            }
        }
        if self.default_sigma <= 0.0 {
            return Err(AppError::config("currency_risk.yaml: non-positive default sigma."));
        }
        Ok(())
    }
}

/// Order-insensitive key for a currency pair.
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn read_table<T: for<'de> Deserialize<'de>>(
    config_dir: Option<&Path>,
    file_name: &str,
    bundled: &str,
) -> Result<T, AppError> {
    let text = match config_dir {
        Some(dir) => {
            let path = dir.join(file_name);
            if path.is_file() {
                std::fs::read_to_string(&path).map_err(|e| {
                    AppError::config(format!("Failed to read '{}': {e}", path.display()))
                })?
            } else {
                bundled.to_string()
            }
        }
        None => bundled.to_string(),
    };
    serde_yaml::from_str(&text)
        .map_err(|e| AppError::config(format!("Failed to parse {file_name}: {e}")))
}

#[derive(Debug, Deserialize)]
struct ProfilesFile {
    profiles: Vec<InvestorProfile>,
}

#[derive(Debug, Deserialize)]
struct CurrencyRiskFile {
    default: CurrencyRiskProfile,
    currencies: HashMap<String, CurrencyRiskProfile>,
    sigma: SigmaFile,
}

#[derive(Debug, Deserialize)]
struct SigmaFile {
    default: f64,
    pairs: Vec<SigmaPair>,
}

#[derive(Debug, Deserialize)]
struct SigmaPair {
    a: String,
    b: String,
    sigma: f64,
}

#[derive(Debug, Deserialize)]
struct TrustRulesFile {
    default_trust: f64,
    rules: Vec<TrustRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_tables_load_and_validate() {
        let data = RefData::load(None).unwrap();
        assert_eq!(data.profiles.len(), 4);
        assert!(data.profiles.iter().any(|p| p.name == "BALANCED"));
        assert!(!data.trust_rules.is_empty());
        assert!((data.default_trust - 0.80).abs() < 1e-12);
    }

    #[test]
    fn sigma_lookup_is_symmetric() {
        let data = RefData::load(None).unwrap();
        let ab = data.pair_sigma("EUR", "USD");
        let ba = data.pair_sigma("USD", "EUR");
        assert!((ab - ba).abs() < 1e-12);
        assert!((ab - 0.09).abs() < 1e-12);
    }

    #[test]
    fn unlisted_pair_falls_back_to_default_sigma() {
        let data = RefData::load(None).unwrap();
        assert!((data.pair_sigma("EUR", "XXX") - 0.12).abs() < 1e-12);
    }

    #[test]
    fn unknown_currency_gets_conservative_default() {
        let data = RefData::load(None).unwrap();
        let risk = data.currency_risk("XYZ");
        assert_eq!(risk.group, "unclassified");
        assert!(risk.annual_vol >= data.currency_risk("USD").annual_vol);
    }
}
