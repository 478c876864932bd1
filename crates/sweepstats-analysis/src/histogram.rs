//! Frequency distribution of each metric
//!
//! Each metric is binned with its own fixed width (1 s for time, 0.1 3BV/s for
//! rate, 1 % for efficiency by default). Values are assigned to the nearest
//! multiple of the width, with exact halves going to the even multiple, and
//! every bin between the lowest and highest occupied bin is reported.

use serde::{Deserialize, Serialize};
pub use sweepstats_stats::histogram::HistogramError;
use sweepstats_stats::histogram::Histogram;

use crate::{
    metric::{Metric, PerMetric},
    record::SessionRecord,
};

/// Bin width per metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramWidths {
    pub time: f64,
    pub rate: f64,
    pub efficiency: f64,
}

impl Default for HistogramWidths {
    fn default() -> Self {
        Self {
            time: 1.0,
            rate: 0.1,
            efficiency: 1.0,
        }
    }
}

impl HistogramWidths {
    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Time => self.time,
            Metric::Rate => self.rate,
            Metric::Efficiency => self.efficiency,
        }
    }
}

/// One bar of a metric histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    /// Display label, the bin value followed by the metric unit.
    pub label: String,
    /// Nominal value of the bin, a multiple of the bin width.
    ///
    /// Values are rounded to the nearest bin, so this is the centre of the
    /// bucket rather than its lower edge: the `2 s` bucket holds times in
    /// `[1.5, 2.5]`.
    pub lower_bound: f64,
    /// Lowest value the bucket holds, half a width below `lowerBound`.
    pub lower_edge: f64,
    pub frequency: u64,
    /// Metric values that fell into this bin, in record order.
    pub member_values: Vec<f64>,
}

/// Buckets one metric of `records`.
///
/// Returns no buckets for empty input. Fails when `width` is not finite and
/// positive, or when the values spread over more than
/// [`MAX_BINS`](sweepstats_stats::histogram::MAX_BINS) bins, as with a
/// runaway estimated time on a barely started session.
///
/// # Examples
///
/// ```
/// use sweepstats_analysis::{histogram::metric_histogram, metric::Metric};
/// # use sweepstats_analysis::record::SessionRecord;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let records: Vec<SessionRecord> = vec![];
///
/// let buckets = metric_histogram(&records, Metric::Rate, 0.1)?;
/// let total = buckets.iter().map(|bucket| bucket.frequency).sum::<u64>();
/// assert_eq!(total, records.len() as u64);
/// # Ok(())
/// # }
/// ```
pub fn metric_histogram(
    records: &[SessionRecord],
    metric: Metric,
    width: f64,
) -> Result<Vec<HistogramBucket>, HistogramError> {
    let histogram = Histogram::new(records.iter().map(|record| metric.value(record)), width)?;
    let buckets = histogram
        .bins
        .into_iter()
        .map(|bin| HistogramBucket {
            label: format!("{} {}", bin.lower_bound, metric.unit()),
            lower_bound: bin.lower_bound,
            lower_edge: bin.lower_edge,
            frequency: bin.count,
            member_values: bin.values,
        })
        .collect();
    Ok(buckets)
}

/// Buckets every metric of `records`, each with its own width.
pub fn metric_histograms(
    records: &[SessionRecord],
    widths: &HistogramWidths,
) -> Result<PerMetric<Vec<HistogramBucket>>, HistogramError> {
    let [time, rate, efficiency] =
        Metric::ALL.map(|metric| metric_histogram(records, metric, widths.get(metric)));
    Ok(PerMetric::from_array([time?, rate?, efficiency?]))
}
