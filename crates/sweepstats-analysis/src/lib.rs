//! Session analytics for Minesweeper game records
//!
//! This crate turns the records reported by the game service into the data a
//! statistics dashboard draws: time-ordered scatter points, a linear trend per
//! metric, a trailing moving average, per-metric histograms and cohort
//! summary panels.
//!
//! # Overview
//!
//! Every session is measured by three metrics ([`metric::Metric`]):
//!
//! - **Time**: the effective time in seconds, lower is better
//! - **Rate**: 3BV per second, higher is better
//! - **Efficiency**: percentage of useful clicks, higher is better
//!
//! ## Pipeline
//!
//! 1. **Load Raw Records** ([`record::RawSessionRecord`]): Deserialize the loosely
//!    typed service records
//! 2. **Enrich** ([`enrich::enrich_all`]): Validate required fields and derive
//!    `epochValue` and `effectiveTime`; invalid records are set aside with the
//!    reason
//! 3. **Filter and Order** ([`filter::RecordFilter`], [`enrich::sort_chronologically`]):
//!    Narrow the records and sort them by time
//! 4. **Analyze**: [`trend::TrendLine`], [`moving_average::moving_average_points`],
//!    [`histogram::metric_histograms`] and [`cohort::cohort_panels`]
//!
//! [`dashboard::DashboardData::build`] runs steps 3 and 4 under an
//! [`config::AnalyticsConfig`], skipping overlays that are switched off.
//!
//! All computations are pure functions over borrowed input. None of them
//! reorders or mutates the records they are given.
//!
//! # Examples
//!
//! ```
//! use sweepstats_analysis::{
//!     config::AnalyticsConfig,
//!     dashboard::DashboardData,
//!     enrich::enrich_all,
//!     record::RawSessionRecord,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let raw: Vec<RawSessionRecord> = serde_json::from_str(
//!     r#"[
//!         {"game-id": 1, "game-timestamp": "2023-06-01 12:00:00", "board-solved": true,
//!          "elapsed-time": 20.0, "board-3bv": 40, "game-3bvps": 2.0, "efficiency": 80,
//!          "total-clicks": 50, "useful-clicks": 40, "wasted-clicks": 10},
//!         {"game-id": 2, "game-timestamp": "2023-06-02 12:00:00", "board-solved": true,
//!          "elapsed-time": 16.0, "board-3bv": 40, "game-3bvps": 2.5, "efficiency": 85,
//!          "total-clicks": 47, "useful-clicks": 40, "wasted-clicks": 7}
//!     ]"#,
//! )?;
//!
//! let config = AnalyticsConfig::default();
//! let batch = enrich_all(&raw, config.unsolved_time);
//! let dashboard = DashboardData::build(batch, None, &config)?;
//!
//! let trend = dashboard.trend.line().unwrap();
//! assert!(trend.fits.time.slope < 0.0);
//! assert_eq!(dashboard.summaries[0].summary.mean_time, 18.0);
//! # Ok(())
//! # }
//! ```

pub mod cohort;
pub mod config;
pub mod dashboard;
pub mod enrich;
pub mod filter;
pub mod histogram;
pub mod metric;
pub mod moving_average;
pub mod record;
pub mod trend;

#[cfg(test)]
mod test_support;
