//! Reporting utilities: ranked rows and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod html;

use crate::config::RefData;
use crate::domain::{Bond, ProfileScores, ReportCurrency};

/// One bond with its per-profile scores, ready for rendering.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub bond: Bond,
    pub scores: ProfileScores,
}

/// Pair bonds with their scores and sort descending on the ranking profile.
///
/// Bonds whose score map is missing the ranking profile sink to the bottom
/// rather than panicking; that only happens with a misconfigured profile
/// table.
pub fn rank_rows(bonds: &[Bond], scores: Vec<ProfileScores>, rank_profile: &str) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = bonds
        .iter()
        .cloned()
        .zip(scores)
        .map(|(bond, scores)| ReportRow { bond, scores })
        .collect();

    rows.sort_by(|a, b| {
        let sa = a.scores.get(rank_profile).copied().unwrap_or(f64::MIN);
        let sb = b.scores.get(rank_profile).copied().unwrap_or(f64::MIN);
        sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// Format the run summary (universe stats + calibration + data quality).
pub fn format_run_summary(
    report: ReportCurrency,
    n_bonds: usize,
    lambda_base: f64,
    n_spreads: usize,
    n_unknown: usize,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== bondrank - {} report ===\n", report.code()));
    out.push_str(&format!("Universe: {n_bonds} bonds\n"));
    out.push_str(&format!("lambdaBase: {lambda_base:.4}\n"));
    out.push_str(&format!("Sovereign spreads: {n_spreads} countries\n"));
    if n_unknown > 0 {
        out.push_str(&format!("Unknown issuers: {n_unknown} (see alert file)\n"));
    }
    out.push('\n');

    out
}

/// Format the ranked scoreboard (top-N rows).
pub fn format_scoreboard(
    rows: &[ReportRow],
    ref_data: &RefData,
    report: ReportCurrency,
    top_n: usize,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<14} {:<22} {:>4} {:>4} {:>6} {:>8}",
        "ISIN", "ISSUER", "CCY", "YRS", "CUR%", "TOTAL"
    ));
    for profile in &ref_data.profiles {
        out.push_str(&format!(" {:>6}", shorten(&profile.name)));
    }
    out.push('\n');

    for row in rows.iter().take(top_n) {
        let b = &row.bond;
        out.push_str(&format!(
            "{:<14} {:<22} {:>4} {:>4.0} {:>6.2} {:>8.0}",
            b.isin,
            shorten_to(&b.issuer, 22),
            b.currency,
            b.years_to_maturity,
            b.current_yield(report),
            b.total_yield(report),
        ));
        for profile in &ref_data.profiles {
            let score = row.scores.get(&profile.name).copied().unwrap_or(0.0);
            out.push_str(&format!(" {score:>6.3}"));
        }
        out.push('\n');
    }

    out
}

fn shorten(name: &str) -> String {
    shorten_to(name, 6)
}

fn shorten_to(name: &str, max: usize) -> String {
    if name.len() <= max {
        name.to_string()
    } else {
        name.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn bond(isin: &str) -> Bond {
        Bond {
            isin: isin.to_string(),
            issuer: "GERMANY".to_string(),
            currency: "EUR".to_string(),
            price: 100.0,
            coupon_pct: 3.0,
            maturity: NaiveDate::from_ymd_opt(2035, 6, 1).unwrap(),
            years_to_maturity: 9.0,
            current_yield_eur: 3.0,
            total_yield_eur: 1270.0,
            current_yield_chf: 3.1,
            total_yield_chf: 1280.0,
        }
    }

    fn scores(balanced: f64) -> ProfileScores {
        let mut m = BTreeMap::new();
        m.insert("BALANCED".to_string(), balanced);
        m.insert("INCOME".to_string(), balanced * 0.9);
        m
    }

    #[test]
    fn rows_sort_descending_on_ranking_profile() {
        let bonds = vec![bond("A"), bond("B"), bond("C")];
        let all_scores = vec![scores(0.3), scores(0.9), scores(0.6)];

        let rows = rank_rows(&bonds, all_scores, "BALANCED");
        let order: Vec<&str> = rows.iter().map(|r| r.bond.isin.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn missing_ranking_profile_sinks_to_bottom() {
        let bonds = vec![bond("A"), bond("B")];
        let all_scores = vec![ProfileScores::new(), scores(0.1)];

        let rows = rank_rows(&bonds, all_scores, "BALANCED");
        assert_eq!(rows[0].bond.isin, "B");
    }
}
