//! Linear trend of each metric over time
//!
//! One least-squares line per metric is fitted against `epochValue`, with all
//! three metrics accumulated in the same single pass over the records. The
//! result is rendered as a segment between two synthetic [`DerivedPoint`]s
//! that extend past the data by a fixed padding on each side, so the line
//! stays visible beyond the first and last session.
//!
//! The records need not be sorted: the segment ends come from the minimum and
//! maximum `epochValue`, found in the same pass.

use serde::{Deserialize, Serialize};
use sweepstats_stats::regression::{LinearRegression, SeriesFit};

use crate::{
    metric::{DerivedPoint, Metric, PerMetric},
    record::SessionRecord,
};

/// Default distance in milliseconds the trend segment extends beyond the data.
pub const DEFAULT_TREND_PADDING_MS: i64 = 500_000_000;

/// Least-squares line for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricFit {
    /// Metric units per millisecond.
    pub slope: f64,
    /// Value at `epochValue = 0`.
    pub intercept: f64,
    /// `None` when the metric is constant over the records.
    pub r_squared: Option<f64>,
}

impl From<SeriesFit> for MetricFit {
    fn from(fit: SeriesFit) -> Self {
        Self {
            slope: fit.slope,
            intercept: fit.intercept,
            r_squared: fit.r_squared,
        }
    }
}

impl MetricFit {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn predict(&self, epoch_value: i64) -> f64 {
        self.slope * epoch_value as f64 + self.intercept
    }
}

/// Fitted trend of all metrics with the segment to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    pub fits: PerMetric<MetricFit>,
    /// Segment start and end, each carrying the fitted value of every metric.
    pub points: [DerivedPoint; 2],
}

impl TrendLine {
    /// Fits a trend over `records`.
    ///
    /// Returns `None` when no trend is available: fewer than two records, or
    /// every record sharing the same `epochValue`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepstats_analysis::{metric::Metric, trend::TrendLine};
    /// # use sweepstats_analysis::record::SessionRecord;
    /// # let records: Vec<SessionRecord> = vec![];
    ///
    /// match TrendLine::estimate(&records, 500_000_000) {
    ///     Some(trend) => println!("time slope: {}", trend.fits.get(Metric::Time).slope),
    ///     None => println!("no trend available"),
    /// }
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn estimate(records: &[SessionRecord], padding_ms: i64) -> Option<Self> {
        let mut regression = LinearRegression::<3>::new();
        let mut min_epoch = i64::MAX;
        let mut max_epoch = i64::MIN;
        for record in records {
            regression.push(record.epoch_value as f64, record.metric_values());
            min_epoch = min_epoch.min(record.epoch_value);
            max_epoch = max_epoch.max(record.epoch_value);
        }

        let fits = PerMetric::from_array(regression.fit()?.map(MetricFit::from));
        let point_at = |epoch_value: i64| {
            DerivedPoint::new(
                epoch_value,
                Metric::ALL.map(|metric| fits.get(metric).predict(epoch_value)),
            )
        };
        let points = [
            point_at(min_epoch.saturating_sub(padding_ms)),
            point_at(max_epoch.saturating_add(padding_ms)),
        ];

        Some(Self { fits, points })
    }
}
