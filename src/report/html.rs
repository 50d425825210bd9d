//! Static HTML report writer.
//!
//! One self-contained page per report currency, no JS dependencies. The
//! page is regenerated wholesale each run; styling stays inline so the
//! file can be published as-is.

use std::path::Path;

use crate::config::RefData;
use crate::domain::ReportCurrency;
use crate::error::AppError;
use crate::report::ReportRow;

pub fn write_html(
    path: &Path,
    rows: &[ReportRow],
    ref_data: &RefData,
    report: ReportCurrency,
) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::data(format!("Failed to create report directory '{}': {e}", parent.display()))
            })?;
        }
    }

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>Sovereign bond ranking ({})</title>\n", report.code()));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         table { border-collapse: collapse; }\n\
         th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: right; }\n\
         th { background: #f0f0f0; }\n\
         td.txt, th.txt { text-align: left; }\n\
         </style>\n</head>\n<body>\n",
    );
    out.push_str(&format!("<h1>Sovereign bond ranking ({})</h1>\n", report.code()));
    out.push_str("<table>\n<tr>");
    for header in ["ISIN", "Issuer", "Ccy"] {
        out.push_str(&format!("<th class=\"txt\">{header}</th>"));
    }
    for header in ["Price", "Coupon %", "Maturity", "Current yield", "Total at maturity"] {
        out.push_str(&format!("<th>{header}</th>"));
    }
    for profile in &ref_data.profiles {
        out.push_str(&format!("<th>{}</th>", escape(&profile.name)));
    }
    out.push_str("</tr>\n");

    for row in rows {
        let b = &row.bond;
        out.push_str("<tr>");
        out.push_str(&format!("<td class=\"txt\">{}</td>", escape(&b.isin)));
        out.push_str(&format!("<td class=\"txt\">{}</td>", escape(&b.issuer)));
        out.push_str(&format!("<td class=\"txt\">{}</td>", escape(&b.currency)));
        out.push_str(&format!("<td>{:.2}</td>", b.price));
        out.push_str(&format!("<td>{:.3}</td>", b.coupon_pct));
        out.push_str(&format!("<td>{}</td>", b.maturity));
        out.push_str(&format!("<td>{:.2}</td>", b.current_yield(report)));
        out.push_str(&format!("<td>{:.0}</td>", b.total_yield(report)));
        for profile in &ref_data.profiles {
            let score = row.scores.get(&profile.name).copied().unwrap_or(0.0);
            out.push_str(&format!("<td>{score:.3}</td>"));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</table>\n</body>\n</html>\n");

    std::fs::write(path, out)
        .map_err(|e| AppError::data(format!("Failed to write HTML report '{}': {e}", path.display())))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
