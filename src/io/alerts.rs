//! Unknown-issuer alert file.
//!
//! Issuers that matched no trust rule are an observability signal for
//! whoever maintains the rule table, not part of the scoring output. The
//! file is rewritten each run and removed when there is nothing to report,
//! so its mere presence is the alert.

use std::path::Path;

use crate::error::AppError;

pub fn write_alerts(path: &Path, unknown: &[String]) -> Result<(), AppError> {
    if unknown.is_empty() {
        if path.exists() {
            std::fs::remove_file(path).map_err(|e| {
                AppError::data(format!("Failed to remove stale alert file '{}': {e}", path.display()))
            })?;
        }
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::data(format!("Failed to create alert directory '{}': {e}", parent.display()))
            })?;
        }
    }

    let mut lines = Vec::with_capacity(unknown.len() + 3);
    lines.push("--- UNKNOWN ISSUERS REPORT ---".to_string());
    lines.push(format!("Generated on: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
    lines.push(String::new());
    lines.extend(unknown.iter().cloned());

    std::fs::write(path, lines.join("\n") + "\n")
        .map_err(|e| AppError::data(format!("Failed to write alert file '{}': {e}", path.display())))
}
