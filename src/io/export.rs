//! Export scored rows to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts; one row per bond, one column per profile score.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::RefData;
use crate::domain::ReportCurrency;
use crate::error::AppError;
use crate::report::ReportRow;

/// Write the ranked rows for one report currency.
pub fn write_scores_csv(
    path: &Path,
    rows: &[ReportRow],
    ref_data: &RefData,
    report: ReportCurrency,
) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::data(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut header = String::from("isin,issuer,currency,price,coupon_pct,maturity,years,current_yield,total_yield");
    for profile in &ref_data.profiles {
        header.push(',');
        header.push_str(&format!("score_{}", profile.name.to_lowercase()));
    }
    writeln!(file, "{header}")
        .map_err(|e| AppError::data(format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        let b = &row.bond;
        let mut line = format!(
            "{},{},{},{:.2},{:.3},{},{:.0},{:.4},{:.2}",
            b.isin,
            csv_quote(&b.issuer),
            b.currency,
            b.price,
            b.coupon_pct,
            b.maturity,
            b.years_to_maturity,
            b.current_yield(report),
            b.total_yield(report),
        );
        for profile in &ref_data.profiles {
            let score = row.scores.get(&profile.name).copied().unwrap_or(0.0);
            line.push_str(&format!(",{score:.4}"));
        }
        writeln!(file, "{line}")
            .map_err(|e| AppError::data(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Quote a field if it contains a comma.
fn csv_quote(field: &str) -> String {
    if field.contains(',') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
