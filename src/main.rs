use analytics::{
    AnalyticsEngine, DashboardCriteria, DateRange, OrderCriteria, Restriction, ShipmentCriteria,
};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{AnalyticsScope, load_config};
use core_types::Snapshot;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod loader;
mod render;

/// The main entry point for the Freightlens reporting tool.
fn main() -> anyhow::Result<()> {
    // Loaded before the subscriber so RUST_LOG may come from the .env file too.
    let dotenv = load_env_file(Path::new(".env"));

    // Logs go to stderr so the report on stdout can be piped.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "Ignoring unreadable .env file.");
    }

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args),
    }
}

/// Loads FREIGHTLENS__* overrides from an optional env file.
///
/// Returns `Ok(false)` when the file does not exist; any other failure is an error.
fn load_env_file(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Order and shipment tracking views over a snapshot of records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a snapshot and print every tracking view.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// JSON array of order records.
    #[arg(long)]
    orders: PathBuf,

    /// JSON array of shipment records.
    #[arg(long)]
    shipments: PathBuf,

    /// Keep only orders with this status (repeatable). Omit to keep all.
    #[arg(long = "status")]
    order_status: Vec<String>,

    /// First order date to keep (format: YYYY-MM-DD). Defaults to the earliest order.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last order date to keep (format: YYYY-MM-DD). Defaults to the latest order.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Keep only shipments with this status (repeatable).
    #[arg(long)]
    shipment_status: Vec<String>,

    /// Keep only shipments handled by this carrier (repeatable).
    #[arg(long)]
    carrier: Vec<String>,

    /// Optional TOML file with a `[views]` section.
    #[arg(long, default_value = "freightlens.toml")]
    config: PathBuf,

    /// Overrides `views.analytics_scope` from the configuration.
    #[arg(long, value_enum)]
    scope: Option<AnalyticsScope>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Handles the orchestration of the report: load, filter, aggregate, render.
fn handle_report(args: ReportArgs) -> anyhow::Result<()> {
    let config = load_config(Some(&args.config)).context("Failed to load configuration")?;

    let mut engine = AnalyticsEngine::from_settings(&config.views)?;
    if let Some(scope) = args.scope {
        engine = engine.with_scope(scope);
    }

    let snapshot = loader::load_snapshot(&args.orders, &args.shipments)?;
    let criteria = build_criteria(&args, &snapshot, Utc::now().date_naive())?;

    let report = engine.build_dashboard(&snapshot, &criteria);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => render::print_report(&report),
    }

    Ok(())
}

/// Turns the CLI selections into filter criteria.
///
/// Omitted selections restrict nothing. A partially given date range is completed
/// from the span of the loaded orders.
fn build_criteria(
    args: &ReportArgs,
    snapshot: &Snapshot,
    today: NaiveDate,
) -> anyhow::Result<DashboardCriteria> {
    let date_range = if args.from.is_some() || args.to.is_some() {
        let span = DateRange::spanning(snapshot.orders(), today);
        Some(DateRange::new(
            args.from.unwrap_or(span.start()),
            args.to.unwrap_or(span.end()),
        )?)
    } else {
        None
    };

    Ok(DashboardCriteria {
        orders: OrderCriteria {
            status: Restriction::from_selection(args.order_status.iter().cloned()),
            date_range,
        },
        shipments: ShipmentCriteria {
            status: Restriction::from_selection(args.shipment_status.iter().cloned()),
            carrier: Restriction::from_selection(args.carrier.iter().cloned()),
        },
    })
}
