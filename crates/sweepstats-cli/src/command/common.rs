//! Options and loading steps shared by every subcommand
//!
//! Each subcommand reads a session dump, enriches it under the effective
//! configuration and narrows it with the record filter. Configuration values
//! come from `--config` and are overridden by the command-line flags.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Days, NaiveDate, Utc};
use sweepstats_analysis::{
    config::AnalyticsConfig,
    enrich::{EnrichedBatch, UnsolvedTimePolicy, enrich_all, parse_timestamp, sort_chronologically},
    filter::RecordFilter,
    record::{Difficulty, SessionRecord},
};
use tracing::{debug, info, warn};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DataArg {
    /// Path to the session dump JSON file
    pub data: PathBuf,
    /// Analytics configuration JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Time used for unsolved sessions (estimated, elapsed)
    #[arg(long)]
    pub unsolved_time: Option<UnsolvedTimePolicy>,
    #[command(flatten)]
    pub filter: FilterArg,
    /// Output file path
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct FilterArg {
    /// Keep sessions of this difficulty only (beginner, intermediate, expert)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    /// Keep solved sessions only
    #[arg(long)]
    pub solved_only: bool,
    /// Minimum completion percentage of unsolved sessions
    #[arg(long)]
    pub min_solve_percent: Option<f64>,
    /// Minimum board 3BV
    #[arg(long = "min-board-3bv")]
    pub min_board_3bv: Option<u32>,
    /// Minimum efficiency percentage
    #[arg(long)]
    pub min_efficiency: Option<f64>,
    /// First day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD, UTC)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl FilterArg {
    /// Overrides the criteria given on the command line.
    pub fn apply_to(&self, filter: &mut RecordFilter) -> anyhow::Result<()> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            anyhow::bail!("--from {from} is after --to {to}");
        }
        if let Some(difficulty) = self.difficulty {
            filter.difficulty = Some(difficulty);
        }
        if self.solved_only {
            filter.solved_only = true;
        }
        if let Some(percent) = self.min_solve_percent {
            filter.min_solve_percent = Some(percent);
        }
        if let Some(board_3bv) = self.min_board_3bv {
            filter.min_difficulty_metric = Some(board_3bv);
        }
        if let Some(efficiency) = self.min_efficiency {
            filter.min_efficiency = Some(efficiency);
        }
        if let Some(from) = self.from {
            filter.from = Some(start_of_day(from));
        }
        if let Some(to) = self.to {
            let next_day = to
                .checked_add_days(Days::new(1))
                .with_context(|| format!("--to {to} is out of range"))?;
            filter.until = Some(start_of_day(next_day));
        }
        Ok(())
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// A dump enriched under the effective configuration.
#[derive(Debug)]
pub(crate) struct LoadedData {
    pub config: AnalyticsConfig,
    pub latest_data_timestamp: Option<DateTime<Utc>>,
    pub batch: EnrichedBatch,
}

impl DataArg {
    pub fn load_config(&self) -> anyhow::Result<AnalyticsConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading analytics config from {}...", path.display());
                util::read_config_file(path)?
            }
            None => AnalyticsConfig::default(),
        };
        if let Some(policy) = self.unsolved_time {
            config.unsolved_time = policy;
        }
        self.filter.apply_to(&mut config.filter)?;
        Ok(config)
    }

    /// Reads and enriches the dump.
    ///
    /// `adjust` applies subcommand-specific overrides before the configuration
    /// is validated.
    pub fn load<F>(&self, adjust: F) -> anyhow::Result<LoadedData>
    where
        F: FnOnce(&mut AnalyticsConfig),
    {
        let mut config = self.load_config()?;
        adjust(&mut config);
        config
            .validate()
            .context("Invalid analytics configuration")?;
        debug!(?config, "Effective configuration");

        info!("Loading sessions from {}...", self.data.display());
        let (latest_timestamp, raw) = util::read_session_dump_file(&self.data)?.into_parts();
        info!("Loaded {} sessions", raw.len());

        let latest_data_timestamp = latest_timestamp.and_then(|value| {
            let parsed = parse_timestamp(&value);
            if parsed.is_none() {
                warn!("Ignoring unrecognized latest data timestamp `{value}`");
            }
            parsed
        });

        info!(
            "Enriching sessions (unsolved time: {})...",
            config.unsolved_time
        );
        let batch = enrich_all(&raw, config.unsolved_time);
        for rejected in &batch.rejected {
            match &rejected.id {
                Some(id) => warn!(
                    "Skipping session {id} at position {}: {}",
                    rejected.position, rejected.error
                ),
                None => warn!(
                    "Skipping session at position {}: {}",
                    rejected.position, rejected.error
                ),
            }
        }
        for record in &batch.records {
            let clicks = record.clicks;
            if !clicks.is_consistent() {
                warn!(
                    "Session {} has inconsistent click counts: {} useful + {} wasted != {} total",
                    record.id, clicks.useful, clicks.wasted, clicks.total
                );
            }
        }
        debug!(
            accepted = batch.records.len(),
            rejected = batch.rejected.len(),
            "Enrichment finished"
        );

        Ok(LoadedData {
            config,
            latest_data_timestamp,
            batch,
        })
    }
}

impl LoadedData {
    /// Records passing the filter, ordered by `epochValue`.
    pub fn select(&self) -> Vec<SessionRecord> {
        if !self.config.filter.is_empty() {
            info!("Filtering sessions...");
        }
        let selected = sort_chronologically(&self.config.filter.apply(&self.batch.records));
        debug!(
            selected = selected.len(),
            total = self.batch.records.len(),
            "Filtering finished"
        );
        if selected.is_empty() {
            warn!("No sessions match the current filters");
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_flags_override() {
        let mut filter = RecordFilter {
            min_efficiency: Some(50.0),
            min_difficulty_metric: Some(10),
            ..RecordFilter::default()
        };
        let arg = FilterArg {
            solved_only: true,
            min_board_3bv: Some(100),
            ..FilterArg::default()
        };
        arg.apply_to(&mut filter).unwrap();
        assert!(filter.solved_only);
        assert_eq!(filter.min_difficulty_metric, Some(100));
        assert_eq!(filter.min_efficiency, Some(50.0));
    }

    #[test]
    fn test_to_date_is_inclusive() {
        let mut filter = RecordFilter::default();
        let arg = FilterArg {
            from: NaiveDate::from_ymd_opt(2023, 6, 1),
            to: NaiveDate::from_ymd_opt(2023, 6, 30),
            ..FilterArg::default()
        };
        arg.apply_to(&mut filter).unwrap();
        assert_eq!(filter.from, parse_timestamp("2023-06-01T00:00:00Z"));
        assert_eq!(filter.until, parse_timestamp("2023-07-01T00:00:00Z"));
    }

    #[test]
    fn test_reversed_range_rejected() {
        let arg = FilterArg {
            from: NaiveDate::from_ymd_opt(2023, 7, 1),
            to: NaiveDate::from_ymd_opt(2023, 6, 1),
            ..FilterArg::default()
        };
        assert!(arg.apply_to(&mut RecordFilter::default()).is_err());
    }
}
