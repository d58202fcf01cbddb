//! allocation-report CLI: renders the project allocation of a schedule snapshot.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use allocation_report::persistence::load_schedule_from_json;
use allocation_report::source::ScheduleSource;
use allocation_report::{
    AllocationReport, OutputFormat, RenderError, ReportConfig, ReportResult, render,
};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "allocation-report",
    version,
    about = "Project allocation report for an external resource-management system"
)]
struct Cli {
    /// Schedule snapshot (JSON) with resources, tasks and bookings.
    #[arg(long)]
    schedule: PathBuf,

    /// Report definition (TOML).
    #[arg(long)]
    config: PathBuf,

    /// Output format, overrides the report definition.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Scenario index, overrides the report definition.
    #[arg(long)]
    scenario: Option<usize>,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "report generation failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ReportResult<()> {
    let schedule = load_schedule_from_json(&cli.schedule)?;
    let mut config = ReportConfig::load(&cli.config)?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(scenario) = cli.scenario {
        config.scenario = scenario;
    }

    let table = AllocationReport::new(&schedule, &config).generate()?;
    let rendered = render(&table, schedule.metadata(), &config.output)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).map_err(RenderError::from)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .map_err(RenderError::from)?;
        }
    }
    Ok(())
}
