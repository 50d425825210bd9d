//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the immutable `Bond` fact record and its per-currency yield accessors
//! - reference-table records (`InvestorProfile`, `CurrencyRiskProfile`,
//!   `TrustRule`)
//! - run-level configuration (`RunConfig`, `ReportCurrency`)

pub mod types;

pub use types::*;
