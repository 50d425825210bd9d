//! Profile-weighted scoring engine.
//!
//! For each bond and each investor profile, the final [0, ~1] score is
//!
//! `max(0, (base - fx_penalty) * logistic_trust(quality)^risk_aversion)`
//!
//! where `base` blends the winsorized yield norms by the profile's alpha,
//! the FX penalty scales with the calibrated `lambda_base`, the capital
//! weight of the bond's return, and the wrong-way credit correlation.
//!
//! Profiles are evaluated independently; bonds are independent of each
//! other too, so the universe fan-out is a plain parallel map.

use rayon::prelude::*;

use crate::config::RefData;
use crate::data::spreads::{SpreadMap, spread_for_issuer};
use crate::domain::{Bond, ProfileScores, ReportCurrency};
use crate::math::norm_winsorized;
use crate::scoring::calibrate::lambda_base;
use crate::scoring::credit::{credit_quality, fx_credit_correlation, logistic_trust};
use crate::scoring::fx_risk::fx_capital_penalty;
use crate::scoring::issuer::IssuerTrust;

/// Everything one scoring pass needs, frozen before the fan-out.
pub struct ScoringContext<'a> {
    pub ref_data: &'a RefData,
    pub report: ReportCurrency,
    pub spreads: &'a SpreadMap,
    pub trust: &'a IssuerTrust<'a>,
    pub lambda_base: f64,
    current_universe: Vec<f64>,
    total_universe: Vec<f64>,
}

impl<'a> ScoringContext<'a> {
    /// Collect the universe distributions and calibrate the penalty scale.
    pub fn new(
        ref_data: &'a RefData,
        report: ReportCurrency,
        bonds: &[Bond],
        spreads: &'a SpreadMap,
        trust: &'a IssuerTrust<'a>,
    ) -> Self {
        let current_universe = bonds.iter().map(|b| b.current_yield(report)).collect();
        let total_universe = bonds.iter().map(|b| b.total_yield(report)).collect();
        let lambda_base = lambda_base(bonds, report);

        Self {
            ref_data,
            report,
            spreads,
            trust,
            lambda_base,
            current_universe,
            total_universe,
        }
    }
}

/// Score one bond against every profile.
pub fn score_bond(ctx: &ScoringContext<'_>, bond: &Bond) -> ProfileScores {
    let current = bond.current_yield(ctx.report);
    let total = bond.total_yield(ctx.report);

    let norm_c = norm_winsorized(current, &ctx.current_universe);
    let norm_t = norm_winsorized(total, &ctx.total_universe);

    // Fraction of total return coming from capital gain rather than coupons.
    let capital_weight = if total > 0.0 {
        (total - current).max(0.0) / total
    } else {
        0.0
    };

    let spread = spread_for_issuer(&bond.issuer, ctx.spreads, ctx.trust);
    let quality = credit_quality(spread);
    let correlation = fx_credit_correlation(quality);
    let trust_factor = logistic_trust(quality);

    let mut scores = ProfileScores::new();
    for profile in &ctx.ref_data.profiles {
        let base = profile.alpha * norm_c + (1.0 - profile.alpha) * norm_t;
        let lambda = ctx.lambda_base * profile.lambda_factor;
        let penalty = fx_capital_penalty(
            ctx.ref_data,
            &bond.currency,
            ctx.report.code(),
            bond.years_to_maturity,
            capital_weight,
            profile.capital_sensitivity,
            lambda,
            correlation,
        );
        let adjusted_quality = trust_factor.powf(profile.risk_aversion);
        let score = ((base - penalty) * adjusted_quality).max(0.0);
        scores.insert(profile.name.clone(), score);
    }
    scores
}

/// Score the whole universe in parallel, preserving bond order.
pub fn score_universe(ctx: &ScoringContext<'_>, bonds: &[Bond]) -> Vec<ProfileScores> {
    bonds.par_iter().map(|b| score_bond(ctx, b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bond(isin: &str, issuer: &str, ccy: &str, current: f64, total: f64, years: f64) -> Bond {
        Bond {
            isin: isin.to_string(),
            issuer: issuer.to_string(),
            currency: ccy.to_string(),
            price: 100.0,
            coupon_pct: 3.0,
            maturity: NaiveDate::from_ymd_opt(2035, 1, 1).unwrap(),
            years_to_maturity: years,
            current_yield_eur: current,
            total_yield_eur: total,
            current_yield_chf: current * 0.98,
            total_yield_chf: total * 0.98,
        }
    }

    fn universe() -> Vec<Bond> {
        vec![
            bond("DE0001", "GERMANY", "EUR", 2.1, 1190.0, 8.0),
            bond("IT0001", "BTP VALORE", "EUR", 4.1, 1350.0, 6.0),
            bond("FR0001", "FRANCE", "EUR", 2.9, 1240.0, 10.0),
            bond("GB0001", "UNITED KINGDOM", "GBP", 3.9, 1310.0, 9.0),
            bond("PL0001", "POLAND", "PLN", 5.3, 1420.0, 7.0),
            bond("GR0001", "GREECE", "EUR", 3.4, 1280.0, 12.0),
        ]
    }

    #[test]
    fn worked_scenario_composes_to_the_documented_score() {
        // spread 160bp, alpha 0.55, lambda_factor 1.0, capital_sensitivity
        // 0.30, risk_aversion 0.70, lambda_base 0.5, 5y USD bond in EUR,
        // normC 0.6 / normT 0.7, capital weight 0.5.
        let ref_data = RefData::load(None).unwrap();

        let quality = credit_quality(160.0);
        let correlation = fx_credit_correlation(quality);
        let base = 0.55 * 0.6 + 0.45 * 0.7;
        let penalty = fx_capital_penalty(
            &ref_data, "USD", "EUR", 5.0, 0.5, 0.30, 0.5 * 1.0, correlation,
        );
        let adjusted = logistic_trust(quality).powf(0.70);
        let score = ((base - penalty) * adjusted).max(0.0);

        assert!((base - 0.645).abs() < 1e-12);
        assert!((quality - 0.728).abs() < 1e-3);
        assert!((adjusted - 0.896).abs() < 1e-3);
        assert!((score - 0.465).abs() < 2e-3, "score = {score}");
    }

    #[test]
    fn every_profile_gets_a_score_in_range() {
        let ref_data = RefData::load(None).unwrap();
        let bonds = universe();
        let trust = IssuerTrust::new(&ref_data.trust_rules, ref_data.default_trust);
        let spreads = SpreadMap::new();
        let ctx = ScoringContext::new(&ref_data, ReportCurrency::Eur, &bonds, &spreads, &trust);

        for scores in score_universe(&ctx, &bonds) {
            assert_eq!(scores.len(), ref_data.profiles.len());
            for (name, score) in &scores {
                assert!(
                    (0.0..=1.5).contains(score),
                    "{name} score {score} out of range"
                );
            }
        }
    }

    #[test]
    fn same_currency_bond_outranks_identical_foreign_one() {
        let ref_data = RefData::load(None).unwrap();
        let mut bonds = universe();
        // Two bonds identical except for currency.
        bonds.push(bond("DE0002", "GERMANY", "EUR", 3.0, 1250.0, 8.0));
        bonds.push(bond("US0001", "GERMANY", "USD", 3.0, 1250.0, 8.0));

        let trust = IssuerTrust::new(&ref_data.trust_rules, ref_data.default_trust);
        let spreads = SpreadMap::new();
        let ctx = ScoringContext::new(&ref_data, ReportCurrency::Eur, &bonds, &spreads, &trust);

        let eur_scores = score_bond(&ctx, &bonds[bonds.len() - 2]);
        let usd_scores = score_bond(&ctx, &bonds[bonds.len() - 1]);

        for profile in &ref_data.profiles {
            let eur = eur_scores[&profile.name];
            let usd = usd_scores[&profile.name];
            assert!(
                eur > usd,
                "{}: EUR {eur} should beat USD {usd} (FX penalty)",
                profile.name
            );
        }
    }

    #[test]
    fn opportunistic_discounts_credit_less_than_income() {
        // A weak-credit bond should keep more of its base score for the
        // profile with the lowest risk aversion.
        let ref_data = RefData::load(None).unwrap();
        let bonds = vec![
            bond("TR0001", "TURKEY", "EUR", 6.5, 1600.0, 5.0),
            bond("DE0001", "GERMANY", "EUR", 2.0, 1180.0, 5.0),
        ];
        let trust = IssuerTrust::new(&ref_data.trust_rules, ref_data.default_trust);
        let spreads = fallback_spreads(&ref_data);
        let ctx = ScoringContext::new(&ref_data, ReportCurrency::Eur, &bonds, &spreads, &trust);

        let scores = score_bond(&ctx, &bonds[0]);
        let quality = credit_quality(spread_for_issuer("TURKEY", &spreads, &trust));
        let trust_factor = logistic_trust(quality);

        // Same base/penalty, different risk_aversion exponent: the ratio of
        // adjusted qualities must favor OPPORTUNISTIC.
        assert!(trust_factor.powf(0.05) > trust_factor.powf(1.0));
        assert!(scores["OPPORTUNISTIC"] >= 0.0 && scores["INCOME"] >= 0.0);
    }

    #[test]
    fn unknown_issuer_is_scored_and_captured_once() {
        let ref_data = RefData::load(None).unwrap();
        let bonds = vec![
            bond("XX0001", "GOTHAM CITY TREASURY", "EUR", 3.1, 1260.0, 6.0),
            bond("DE0001", "GERMANY", "EUR", 2.2, 1200.0, 6.0),
        ];
        let trust = IssuerTrust::new(&ref_data.trust_rules, ref_data.default_trust);
        let spreads = SpreadMap::new();
        let ctx = ScoringContext::new(&ref_data, ReportCurrency::Eur, &bonds, &spreads, &trust);

        for _ in 0..3 {
            let scores = score_bond(&ctx, &bonds[0]);
            assert!(scores.values().all(|s| s.is_finite()));
        }
        assert_eq!(
            ctx.trust.unknown_issuers(),
            vec!["GOTHAM CITY TREASURY".to_string()]
        );
    }

    fn fallback_spreads(ref_data: &RefData) -> SpreadMap {
        crate::data::spreads::fallback_from_rules(&ref_data.trust_rules)
    }
}
