//! Command-line entry point for the payroll summary engine.
//!
//! `report` turns an `.xlsx` or CSV payroll export into an HTML report in one shot;
//! `serve` runs the upload/report HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use payroll_summary::aggregation::aggregate;
use payroll_summary::api::{AppState, create_router};
use payroll_summary::config::ConfigLoader;
use payroll_summary::error::EngineResult;
use payroll_summary::ingest::load_export;
use payroll_summary::report::write_html;

/// Payroll export aggregation into per-employee summary reports
#[derive(Parser)]
#[command(name = "payroll-summary")]
#[command(about = "Builds per-employee payroll summaries from payroll exports")]
struct Args {
    /// Report policy file
    #[arg(long, global = true, default_value = "config/payroll.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an HTML report from a payroll export
    Report {
        /// Payroll export to read (.xlsx or .csv)
        #[arg(long)]
        input: PathBuf,

        /// Report date (YYYY-MM-DD); defaults to today (UTC)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Where to write the HTML report
        #[arg(long, default_value = "output.html")]
        output: PathBuf,
    },
    /// Serve the upload and report HTTP API
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_report(
    config: &ConfigLoader,
    input: PathBuf,
    as_of: Option<NaiveDate>,
    output: PathBuf,
) -> EngineResult<()> {
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());
    let records = load_export(&input)?;
    let result = aggregate(&records, as_of, &config.policy())?;

    info!(
        input = %input.display(),
        as_of = %as_of,
        raw_records = result.totals.raw_records,
        employees_included = result.totals.employees_included,
        employees_excluded = result.totals.employees_excluded,
        "Aggregated payroll export"
    );
    for warning in &result.audit_trace.warnings {
        info!(code = %warning.code, severity = %warning.severity, "{}", warning.message);
    }

    write_html(&output, &result.rows, config.report_settings())
}

async fn serve(config: ConfigLoader, addr: SocketAddr) -> std::io::Result<()> {
    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Payroll summary API listening");
    axum::serve(listener, router).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let config = match ConfigLoader::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Command::Report {
            input,
            as_of,
            output,
        } => match run_report(&config, input, as_of, output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(error = %err, "Report generation failed");
                ExitCode::FAILURE
            }
        },
        Command::Serve { addr } => match serve(config, addr).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(error = %err, "Server error");
                ExitCode::FAILURE
            }
        },
    }
}
