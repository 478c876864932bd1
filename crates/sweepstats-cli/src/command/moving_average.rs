use std::num::NonZeroUsize;

use clap::Args;
use sweepstats_analysis::{metric::Metric, moving_average::moving_average_points};
use tracing::{debug, info, warn};

use crate::{command::common::DataArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct MovingAverageArg {
    #[command(flatten)]
    data: DataArg,
    /// Number of consecutive sessions per window
    #[arg(long)]
    window: Option<NonZeroUsize>,
}

pub(crate) fn run(arg: &MovingAverageArg) -> anyhow::Result<()> {
    let loaded = arg.data.load(|config| {
        if let Some(window) = arg.window {
            config.moving_average_window = window.get();
        }
    })?;
    let records = loaded.select();
    let window = loaded.config.moving_average_window;

    info!("Computing moving average over {window} sessions...");
    let points = moving_average_points(&records, window);
    if points.is_empty() && !records.is_empty() {
        warn!(
            "Window of {window} sessions exceeds the {} selected sessions",
            records.len()
        );
    }
    if let Some(latest) = points.last() {
        for metric in Metric::ALL {
            debug!(
                metric = metric.label(),
                epoch_value = latest.epoch_value,
                value = latest.value(metric),
                "Latest moving average"
            );
        }
    }

    Output::save_json(&points, arg.data.output.clone())
}
