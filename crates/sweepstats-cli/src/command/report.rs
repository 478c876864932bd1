use clap::Args;
use sweepstats_analysis::dashboard::DashboardData;
use tracing::{debug, info};

use crate::{command::common::DataArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    #[command(flatten)]
    data: DataArg,
    /// Skip the trend lines
    #[arg(long)]
    no_trend: bool,
    /// Skip the moving average
    #[arg(long)]
    no_moving_average: bool,
    /// Skip the histograms
    #[arg(long)]
    no_histograms: bool,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let loaded = arg.data.load(|config| {
        config.show_trend &= !arg.no_trend;
        config.show_moving_average &= !arg.no_moving_average;
        config.show_histograms &= !arg.no_histograms;
    })?;

    info!("Building dashboard...");
    let dashboard = DashboardData::build(
        loaded.batch,
        loaded.latest_data_timestamp,
        &loaded.config,
    )?;
    debug!(
        records = dashboard.records.len(),
        rejected = dashboard.rejected.len(),
        panels = dashboard.summaries.len(),
        "Dashboard built"
    );

    Output::save_json(&dashboard, arg.data.output.clone())
}
