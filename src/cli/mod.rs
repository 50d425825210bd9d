//! Command-line parsing for the bond ranker.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the scoring/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bondrank", version, about = "Sovereign bond attractiveness ranker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score the universe, print the report, and optionally export CSV/HTML.
    Score(ScoreArgs),
    /// Print the ranked scoreboard only (useful for scripting).
    Rank(ScoreArgs),
}

/// Common options for scoring and ranking.
#[derive(Debug, Parser, Clone)]
pub struct ScoreArgs {
    /// CSV of raw bond rows (isin,issuer,currency,price,coupon_pct,maturity).
    /// Without it a synthetic sample universe is generated.
    #[arg(short = 'b', long)]
    pub bonds: Option<PathBuf>,

    /// Skip all network providers and use bundled fallbacks.
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Number of synthetic bonds when no CSV is given.
    #[arg(short = 'n', long, default_value_t = 120)]
    pub sample_count: usize,

    /// Random seed for the synthetic universe.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Profile the rankings are sorted on.
    #[arg(long, default_value = "BALANCED")]
    pub rank_profile: String,

    /// Rows shown in the terminal scoreboard.
    #[arg(long, default_value_t = 25)]
    pub top: usize,

    /// Directory overriding the bundled reference tables
    /// (profiles.yaml, currency_risk.yaml, trust_rules.yaml).
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Export scored rows as CSV; the report currency is appended to the
    /// file stem (e.g. `scores_eur.csv`).
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write one HTML report page per report currency into this directory.
    #[arg(long)]
    pub html_dir: Option<PathBuf>,

    /// Unknown-issuer alert file.
    #[arg(long, default_value = "alerts.txt")]
    pub alerts: PathBuf,
}
