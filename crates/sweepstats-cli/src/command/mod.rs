use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    enrich::EnrichArg, histogram::HistogramArg, moving_average::MovingAverageArg,
    report::ReportArg, summary::SummaryArg, trend::TrendArg,
};

mod common;
mod enrich;
mod histogram;
mod moving_average;
mod report;
mod summary;
mod trend;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug details of each stage
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Log warnings and errors only
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Validate records and print them in chronological order
    Enrich(#[clap(flatten)] EnrichArg),
    /// Fit a linear trend of each metric over time
    Trend(#[clap(flatten)] TrendArg),
    /// Compute the trailing moving average of each metric
    MovingAverage(#[clap(flatten)] MovingAverageArg),
    /// Bucket metric values into fixed-width bins
    Histogram(#[clap(flatten)] HistogramArg),
    /// Summarize solved, unsolved and all sessions
    Summary(#[clap(flatten)] SummaryArg),
    /// Build the full dashboard data
    Report(#[clap(flatten)] ReportArg),
}

impl CommandArgs {
    fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn init_logging(default_level: &str) {
    // Logs go to stderr so that stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.default_log_level());
    match args.mode {
        Mode::Enrich(arg) => enrich::run(&arg)?,
        Mode::Trend(arg) => trend::run(&arg)?,
        Mode::MovingAverage(arg) => moving_average::run(&arg)?,
        Mode::Histogram(arg) => histogram::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
    }
    Ok(())
}
