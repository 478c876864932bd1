use anyhow::Context;
use clap::Args;
use sweepstats_analysis::{
    histogram::{metric_histogram, metric_histograms},
    metric::Metric,
};
use tracing::{debug, info};

use crate::{command::common::DataArg, util::Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct HistogramArg {
    #[command(flatten)]
    data: DataArg,
    /// Metric to bucket (time, rate, efficiency); all metrics when omitted
    #[arg(long)]
    metric: Option<Metric>,
    /// Bin width for the selected metric
    #[arg(long, requires = "metric")]
    width: Option<f64>,
}

pub(crate) fn run(arg: &HistogramArg) -> anyhow::Result<()> {
    let loaded = arg.data.load(|config| {
        if let (Some(metric), Some(width)) = (arg.metric, arg.width) {
            let widths = &mut config.histogram_widths;
            match metric {
                Metric::Time => widths.time = width,
                Metric::Rate => widths.rate = width,
                Metric::Efficiency => widths.efficiency = width,
            }
        }
    })?;
    let records = loaded.select();
    let widths = &loaded.config.histogram_widths;

    match arg.metric {
        Some(metric) => {
            info!("Building {} histogram...", metric.label());
            let buckets = metric_histogram(&records, metric, widths.get(metric))
                .with_context(|| format!("Cannot build {metric} histogram"))?;
            debug!(metric = metric.label(), buckets = buckets.len(), "Histogram built");
            Output::save_json(&buckets, arg.data.output.clone())
        }
        None => {
            info!("Building histograms...");
            let histograms =
                metric_histograms(&records, widths).context("Cannot build histograms")?;
            for (metric, buckets) in histograms.iter() {
                debug!(metric = metric.label(), buckets = buckets.len(), "Histogram built");
            }
            Output::save_json(&histograms, arg.data.output.clone())
        }
    }
}
