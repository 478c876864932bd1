use clap::Args;
use sweepstats_analysis::{dashboard::TrendOutcome, metric::Metric, trend::TrendLine};
use tracing::{debug, info, warn};

use crate::{command::common::DataArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct TrendArg {
    #[command(flatten)]
    data: DataArg,
    /// Milliseconds the trend segment extends past the data on each side
    #[arg(long)]
    padding_ms: Option<i64>,
}

pub(crate) fn run(arg: &TrendArg) -> anyhow::Result<()> {
    let loaded = arg.data.load(|config| {
        if let Some(padding_ms) = arg.padding_ms {
            config.trend_padding_ms = padding_ms;
        }
    })?;
    let records = loaded.select();

    info!("Fitting trend lines...");
    let outcome = match TrendLine::estimate(&records, loaded.config.trend_padding_ms) {
        Some(line) => {
            for metric in Metric::ALL {
                let fit = line.fits.get(metric);
                debug!(
                    metric = metric.label(),
                    slope = fit.slope,
                    intercept = fit.intercept,
                    r_squared = ?fit.r_squared,
                    "Fitted trend"
                );
            }
            TrendOutcome::Available(line)
        }
        None => {
            warn!("Trend unavailable: at least two distinct session times are required");
            TrendOutcome::Unavailable
        }
    };

    Output::save_json(&outcome, arg.data.output.clone())
}
