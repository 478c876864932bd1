//! Analytics configuration
//!
//! Every field has a default, so a configuration file only needs the settings
//! it changes:
//!
//! ```
//! use sweepstats_analysis::{config::AnalyticsConfig, enrich::UnsolvedTimePolicy};
//!
//! let config: AnalyticsConfig = serde_json::from_str(
//!     r#"{ "unsolvedTime": "elapsed", "histogramWidths": { "rate": 0.5 } }"#,
//! )
//! .unwrap();
//! config.validate().unwrap();
//!
//! assert_eq!(config.unsolved_time, UnsolvedTimePolicy::Elapsed);
//! assert_eq!(config.histogram_widths.rate, 0.5);
//! assert_eq!(config.histogram_widths.time, 1.0);
//! assert_eq!(config.moving_average_window, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    enrich::UnsolvedTimePolicy,
    filter::RecordFilter,
    histogram::HistogramWidths,
    metric::Metric,
    moving_average::DEFAULT_MOVING_AVERAGE_WINDOW,
    trend::DEFAULT_TREND_PADDING_MS,
};

/// Base of the link to a session's replay page.
pub const DEFAULT_GAME_URL_BASE: &str = "https://minesweeper.online/game/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    pub unsolved_time: UnsolvedTimePolicy,
    pub moving_average_window: usize,
    /// Milliseconds the trend segment extends past the first and last session.
    pub trend_padding_ms: i64,
    pub histogram_widths: HistogramWidths,
    pub game_url_base: String,
    pub show_trend: bool,
    pub show_moving_average: bool,
    pub show_histograms: bool,
    pub filter: RecordFilter,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            unsolved_time: UnsolvedTimePolicy::default(),
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            trend_padding_ms: DEFAULT_TREND_PADDING_MS,
            histogram_widths: HistogramWidths::default(),
            game_url_base: DEFAULT_GAME_URL_BASE.to_owned(),
            show_trend: true,
            show_moving_average: true,
            show_histograms: true,
            filter: RecordFilter::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("histogram width for {metric} must be finite and positive, got {width}")]
    InvalidHistogramWidth { metric: Metric, width: f64 },
    #[display("moving average window must be at least 1")]
    EmptyMovingAverageWindow,
    #[display("trend padding must not be negative, got {padding_ms} ms")]
    NegativeTrendPadding { padding_ms: i64 },
}

impl AnalyticsConfig {
    /// Checks the values the analytics cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for metric in Metric::ALL {
            let width = self.histogram_widths.get(metric);
            if !(width.is_finite() && width > 0.0) {
                return Err(ConfigError::InvalidHistogramWidth { metric, width });
            }
        }
        if self.moving_average_window == 0 {
            return Err(ConfigError::EmptyMovingAverageWindow);
        }
        if self.trend_padding_ms < 0 {
            return Err(ConfigError::NegativeTrendPadding {
                padding_ms: self.trend_padding_ms,
            });
        }
        Ok(())
    }
}
