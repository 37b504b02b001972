//! AgentGuard command-line transaction screening.
//!
//! Screens an agent transaction file: validates every row, flags compliance
//! risks, and rates each agent RED / YELLOW / GREEN.
//!
//! Usage:
//!   agentguard screen fixtures/sample_transactions.csv
//!   agentguard screen july.csv --summary-out agent_summary.csv
//!   agentguard validate july.csv --as-of 2025-07-10
//!   agentguard show-config --config config/screening.toml

mod output;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agentguard_contracts::{
    error::{GuardError, GuardResult},
    report::ScreeningReport,
};
use agentguard_core::{
    clock::{FixedClock, SystemClock},
    traits::Clock,
    Screener,
};
use agentguard_ingest::{read_path, write_agent_summary, write_row_verdicts};
use agentguard_policy::ScreeningPolicy;
use agentguard_verify::RowValidator;

// ── CLI definition ────────────────────────────────────────────────────────────

/// AgentGuard: KYC and AML screening for agent transaction files.
#[derive(Parser)]
#[command(
    name = "agentguard",
    version,
    about = "KYC / AML screening for agent transaction files",
    long_about = "Validates each transaction row, flags compliance risks (KYC status,\n\
                  expired IDs, large amounts, transaction bursts) and rates every agent."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Screen a CSV file and print the agent summary and problem rows.
    Screen {
        /// Transaction file (.csv).
        file: PathBuf,
        #[command(flatten)]
        screening: ScreeningArgs,
        /// Print the full report as JSON instead of tables.
        #[arg(long)]
        json: bool,
        /// Also write the agent summary CSV here.
        #[arg(long, value_name = "FILE")]
        summary_out: Option<PathBuf>,
        /// Also write the per-row verdict CSV here.
        #[arg(long, value_name = "FILE")]
        verdicts_out: Option<PathBuf>,
    },
    /// Print one verdict per row. Exits with status 1 if any row is invalid.
    Validate {
        /// Transaction file (.csv).
        file: PathBuf,
        #[command(flatten)]
        screening: ScreeningArgs,
    },
    /// Print the effective screening configuration.
    ShowConfig {
        /// Screening configuration file (TOML).
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ScreeningArgs {
    /// Screening configuration file (TOML). Defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Judge ID expiry against this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_name = "DATE")]
    as_of: Option<NaiveDate>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Set RUST_LOG=debug for per-row output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Screen {
            file,
            screening,
            json,
            summary_out,
            verdicts_out,
        } => run_screen(&file, &screening, json, summary_out, verdicts_out),
        Command::Validate { file, screening } => run_validate(&file, &screening),
        Command::ShowConfig { config } => run_show_config(config.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn load_policy(path: Option<&Path>) -> GuardResult<ScreeningPolicy> {
    match path {
        Some(p) => ScreeningPolicy::from_file(p),
        None => Ok(ScreeningPolicy::default()),
    }
}

fn build_screener(args: &ScreeningArgs) -> GuardResult<Screener> {
    let policy = load_policy(args.config.as_deref())?;
    let clock: Arc<dyn Clock> = match args.as_of {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };
    let validator = RowValidator::from_policy(&policy, clock.clone());
    Ok(Screener::new(Box::new(validator), Box::new(policy), clock))
}

fn screen_file(file: &Path, args: &ScreeningArgs) -> GuardResult<ScreeningReport> {
    let screener = build_screener(args)?;
    let records = read_path(file)?;
    Ok(screener.screen(&records))
}

fn create_output(path: &Path) -> GuardResult<File> {
    File::create(path).map_err(|e| GuardError::ReportWriteFailed {
        reason: format!("failed to create '{}': {}", path.display(), e),
    })
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_screen(
    file: &Path,
    args: &ScreeningArgs,
    json: bool,
    summary_out: Option<PathBuf>,
    verdicts_out: Option<PathBuf>,
) -> GuardResult<ExitCode> {
    let report = screen_file(file, args)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).map_err(|e| GuardError::ReportWriteFailed {
                reason: format!("failed to render JSON report: {}", e),
            })?;
        println!("{}", rendered);
    } else {
        output::print_report(&report);
    }

    if let Some(path) = summary_out {
        write_agent_summary(create_output(&path)?, &report)?;
        info!(path = %path.display(), "agent summary saved");
    }
    if let Some(path) = verdicts_out {
        write_row_verdicts(create_output(&path)?, &report)?;
        info!(path = %path.display(), "row verdicts saved");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_validate(file: &Path, args: &ScreeningArgs) -> GuardResult<ExitCode> {
    let report = screen_file(file, args)?;
    output::print_verdicts(&report);

    if report.invalid() > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_show_config(config: Option<&Path>) -> GuardResult<ExitCode> {
    let policy = load_policy(config)?;
    print!("{}", policy.to_toml_string()?);
    Ok(ExitCode::SUCCESS)
}
