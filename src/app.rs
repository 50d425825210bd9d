//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads reference tables and market data
//! - runs scoring across both report currencies
//! - prints reports
//! - writes optional exports and the alert file

use clap::Parser;
use tracing::warn;

use crate::cli::{Command, ScoreArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::alerts::write_alerts;
use crate::io::export::write_scores_csv;
use crate::report::html::write_html;
use crate::report::{format_run_summary, format_scoreboard};

pub mod pipeline;

/// Entry point for the `bondrank` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // We want a bare `bondrank` (and `bondrank -n 200`) to behave like
    // `bondrank score ...`. Clap requires a subcommand name, so we do a
    // small, explicit rewrite of the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Score(args) => handle_score(args, OutputMode::Full),
        Command::Rank(args) => handle_score(args, OutputMode::RankOnly),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    RankOnly,
}

fn handle_score(args: ScoreArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_scoring(&config)?;

    for output in &run.reports {
        if mode == OutputMode::Full {
            println!(
                "{}",
                format_run_summary(
                    output.report,
                    run.bonds.len(),
                    output.lambda_base,
                    run.spreads.len(),
                    run.unknown_issuers.len(),
                )
            );
        }
        println!(
            "{}",
            format_scoreboard(&output.rows, &run.ref_data, output.report, config.top_n)
        );
    }

    // Optional exports.
    if let Some(path) = &config.export_csv {
        for output in &run.reports {
            let target = suffixed_path(path, output.report.code());
            write_scores_csv(&target, &output.rows, &run.ref_data, output.report)?;
        }
    }
    if let Some(dir) = &config.html_dir {
        for output in &run.reports {
            let target = dir.join(output.report.code().to_lowercase()).join("index.html");
            write_html(&target, &output.rows, &run.ref_data, output.report)?;
        }
    }

    if let Err(e) = write_alerts(&config.alerts_path, &run.unknown_issuers) {
        // Alerting is observability, not output: never fail the run over it.
        warn!(error = %e, "could not manage alert file");
    }

    Ok(())
}

pub fn run_config_from_args(args: &ScoreArgs) -> RunConfig {
    RunConfig {
        bonds_csv: args.bonds.clone(),
        offline: args.offline,
        sample_count: args.sample_count,
        sample_seed: args.seed,
        rank_profile: args.rank_profile.clone(),
        top_n: args.top,
        config_dir: args.config_dir.clone(),
        export_csv: args.export.clone(),
        html_dir: args.html_dir.clone(),
        alerts_path: args.alerts.clone(),
    }
}

/// `scores.csv` + `EUR` -> `scores_eur.csv`.
fn suffixed_path(path: &std::path::Path, code: &str) -> std::path::PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "scores".to_string());
    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "csv".to_string());
    path.with_file_name(format!("{stem}_{}.{ext}", code.to_lowercase()))
}

/// Rewrite argv so `bondrank` defaults to `bondrank score`.
///
/// Rules:
/// - `bondrank`                    -> `bondrank score`
/// - `bondrank --offline ...`      -> `bondrank score --offline ...`
/// - `bondrank --help/--version`   -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("score".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "score" | "rank");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "score flags".
    if arg1.starts_with('-') {
        argv.insert(1, "score".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
