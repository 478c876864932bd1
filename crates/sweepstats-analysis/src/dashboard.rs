//! Dashboard assembly
//!
//! [`DashboardData`] bundles everything the presentation layer draws: the
//! selected records in time order, the optional analytics overlays and the
//! statistics panels. Overlays whose display toggle is off are not computed at
//! all.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    cohort::{CohortPanel, cohort_panels},
    config::{AnalyticsConfig, ConfigError},
    enrich::{EnrichedBatch, RejectedRecord, sort_chronologically},
    histogram::{HistogramBucket, HistogramError, metric_histograms},
    metric::{DerivedPoint, PerMetric},
    moving_average::moving_average_points,
    record::SessionRecord,
    trend::TrendLine,
};

/// A session record with the link to its replay page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedRecord {
    #[serde(flatten)]
    pub record: SessionRecord,
    pub game_url: String,
}

impl LinkedRecord {
    #[must_use]
    pub fn new(record: SessionRecord, game_url_base: &str) -> Self {
        let game_url = record.game_url(game_url_base);
        Self { record, game_url }
    }
}

/// State of the trend overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TrendOutcome {
    /// The overlay is switched off and nothing was computed.
    Hidden,
    /// Too few distinct timestamps to fit a line.
    Unavailable,
    Available(TrendLine),
}

impl TrendOutcome {
    #[must_use]
    pub fn line(&self) -> Option<&TrendLine> {
        match self {
            Self::Available(line) => Some(line),
            Self::Hidden | Self::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DashboardError {
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("cannot build histograms: {_0}")]
    Histogram(HistogramError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// When the data service last refreshed its records, if it reported it.
    pub latest_data_timestamp: Option<DateTime<Utc>>,
    /// Records passing the filter, ordered by `epochValue`.
    pub records: Vec<LinkedRecord>,
    pub rejected: Vec<RejectedRecord>,
    pub trend: TrendOutcome,
    /// `None` when the overlay is switched off.
    pub moving_average: Option<Vec<DerivedPoint>>,
    /// `None` when the histograms are switched off.
    pub histograms: Option<PerMetric<Vec<HistogramBucket>>>,
    pub summaries: Vec<CohortPanel>,
}

impl DashboardData {
    /// Filters, orders and analyzes an enriched batch.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate, or if a metric spreads
    /// over more histogram bins than can be drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepstats_analysis::{
    ///     config::AnalyticsConfig,
    ///     dashboard::{DashboardData, TrendOutcome},
    ///     enrich::EnrichedBatch,
    /// };
    ///
    /// let config = AnalyticsConfig {
    ///     show_trend: false,
    ///     ..AnalyticsConfig::default()
    /// };
    /// let dashboard = DashboardData::build(EnrichedBatch::default(), None, &config).unwrap();
    /// assert_eq!(dashboard.trend, TrendOutcome::Hidden);
    /// assert!(dashboard.summaries.is_empty());
    /// ```
    pub fn build(
        batch: EnrichedBatch,
        latest_data_timestamp: Option<DateTime<Utc>>,
        config: &AnalyticsConfig,
    ) -> Result<Self, DashboardError> {
        config.validate().map_err(DashboardError::Config)?;

        let selected = config.filter.apply(&batch.records);
        let records = sort_chronologically(&selected);

        let trend = if config.show_trend {
            TrendLine::estimate(&records, config.trend_padding_ms)
                .map_or(TrendOutcome::Unavailable, TrendOutcome::Available)
        } else {
            TrendOutcome::Hidden
        };
        let moving_average = config
            .show_moving_average
            .then(|| moving_average_points(&records, config.moving_average_window));
        let histograms = config
            .show_histograms
            .then(|| metric_histograms(&records, &config.histogram_widths))
            .transpose()
            .map_err(DashboardError::Histogram)?;
        let summaries = cohort_panels(&records);

        let records = records
            .into_iter()
            .map(|record| LinkedRecord::new(record, &config.game_url_base))
            .collect();

        Ok(Self {
            latest_data_timestamp,
            records,
            rejected: batch.rejected,
            trend,
            moving_average,
            histograms,
            summaries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cohort::Cohort,
        enrich::EnrichError,
        record::GameId,
        test_support::{record, unsolved},
    };

    fn batch() -> EnrichedBatch {
        EnrichedBatch {
            records: vec![
                record(2000, 30.0, 3.0, 90.0),
                unsolved(1500, 80.0, 40.0),
                record(0, 10.0, 1.0, 70.0),
                record(1000, 20.0, 2.0, 80.0),
            ],
            rejected: vec![RejectedRecord {
                position: 4,
                id: Some(GameId::new("broken")),
                error: EnrichError::MissingField {
                    field: "efficiency",
                },
            }],
        }
    }

    #[test]
    fn test_records_sorted_and_linked() {
        let dashboard = DashboardData::build(batch(), None, &AnalyticsConfig::default()).unwrap();
        let epochs = dashboard
            .records
            .iter()
            .map(|linked| linked.record.epoch_value)
            .collect::<Vec<_>>();
        assert_eq!(epochs, [0, 1000, 1500, 2000]);
        assert_eq!(
            dashboard.records[0].game_url,
            "https://minesweeper.online/game/game-0"
        );
        assert_eq!(dashboard.rejected.len(), 1);
    }

    #[test]
    fn test_all_overlays_by_default() {
        let dashboard = DashboardData::build(batch(), None, &AnalyticsConfig::default()).unwrap();
        assert!(dashboard.trend.line().is_some());
        // window of 10 exceeds the four records
        assert_eq!(dashboard.moving_average, Some(vec![]));
        let histograms = dashboard.histograms.unwrap();
        let total = histograms.time.iter().map(|b| b.frequency).sum::<u64>();
        assert_eq!(total, 4);
        let cohorts = dashboard
            .summaries
            .iter()
            .map(|panel| panel.cohort)
            .collect::<Vec<_>>();
        assert_eq!(cohorts, [Cohort::Solved, Cohort::Unsolved, Cohort::All]);
    }

    #[test]
    fn test_toggles_skip_overlays() {
        let config = AnalyticsConfig {
            show_trend: false,
            show_moving_average: false,
            show_histograms: false,
            ..AnalyticsConfig::default()
        };
        let dashboard = DashboardData::build(batch(), None, &config).unwrap();
        assert_eq!(dashboard.trend, TrendOutcome::Hidden);
        assert_eq!(dashboard.moving_average, None);
        assert_eq!(dashboard.histograms, None);
        assert_eq!(dashboard.summaries.len(), 3);
    }

    #[test]
    fn test_filter_applies_before_analytics() {
        let mut config = AnalyticsConfig {
            moving_average_window: 2,
            ..AnalyticsConfig::default()
        };
        config.filter.solved_only = true;
        let dashboard = DashboardData::build(batch(), None, &config).unwrap();
        assert_eq!(dashboard.records.len(), 3);
        let times = dashboard
            .moving_average
            .unwrap()
            .iter()
            .map(|p| p.effective_time)
            .collect::<Vec<_>>();
        assert_eq!(times, [15.0, 25.0]);
        assert_eq!(dashboard.summaries.len(), 1);
    }

    #[test]
    fn test_single_record_trend_unavailable() {
        let batch = EnrichedBatch {
            records: vec![record(0, 10.0, 1.0, 70.0)],
            rejected: vec![],
        };
        let dashboard = DashboardData::build(batch, None, &AnalyticsConfig::default()).unwrap();
        assert_eq!(dashboard.trend, TrendOutcome::Unavailable);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalyticsConfig::default();
        config.histogram_widths.time = 0.0;
        assert!(matches!(
            DashboardData::build(batch(), None, &config),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn test_runaway_histogram_is_an_error_unless_hidden() {
        let mut batch = batch();
        batch.records.push(unsolved(2500, 1e12, 0.0));

        let result = DashboardData::build(batch.clone(), None, &AnalyticsConfig::default());
        assert!(matches!(
            result,
            Err(DashboardError::Histogram(HistogramError::TooManyBins { .. }))
        ));

        let config = AnalyticsConfig {
            show_histograms: false,
            ..AnalyticsConfig::default()
        };
        let dashboard = DashboardData::build(batch, None, &config).unwrap();
        assert_eq!(dashboard.records.len(), 5);
    }

    #[test]
    fn test_serialized_shape() {
        let latest = DateTime::from_timestamp_millis(3000);
        let dashboard = DashboardData::build(batch(), latest, &AnalyticsConfig::default()).unwrap();
        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["trend"]["status"], "available");
        assert!(json["trend"]["fits"]["time"]["slope"].is_number());
        assert_eq!(json["records"][0]["epochValue"], 0);
        assert_eq!(json["records"][0]["gameUrl"], "https://minesweeper.online/game/game-0");
        assert_eq!(json["rejected"][0]["error"], "missing required field `efficiency`");
        assert_eq!(json["latestDataTimestamp"], "1970-01-01T00:00:03Z");
    }
}
