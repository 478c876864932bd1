//! Cohort selection and summary statistics
//!
//! A cohort is a subset of records chosen by solved status. The statistics
//! panel shows up to three cohorts:
//!
//! - solved sessions, when any exist
//! - unsolved sessions, when any exist
//! - all sessions, when any unsolved session exists (otherwise it would
//!   repeat the solved panel)
//!
//! # Click Counts
//!
//! Click counters are expected to satisfy `useful + wasted == total`, but the
//! data service does not enforce it. Summaries average the reported totals as
//! they are and count the records that break the invariant.

use std::fmt;

use serde::{Deserialize, Serialize};
use sweepstats_stats::descriptive::DescriptiveStats;

use crate::record::SessionRecord;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Cohort {
    #[display("solved")]
    Solved,
    #[display("unsolved")]
    Unsolved,
    #[display("all")]
    All,
}

impl Cohort {
    #[must_use]
    pub fn contains(self, record: &SessionRecord) -> bool {
        match self {
            Self::Solved => record.solved,
            Self::Unsolved => !record.solved,
            Self::All => true,
        }
    }

    /// Records belonging to this cohort, in input order.
    #[must_use]
    pub fn select(self, records: &[SessionRecord]) -> Vec<&SessionRecord> {
        records
            .iter()
            .filter(|record| self.contains(record))
            .collect()
    }
}

/// Composition of a summarized cohort, derived from its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum CohortKind {
    #[display("completed")]
    Completed,
    #[display("incomplete")]
    Incomplete,
    #[display("total (complete and incomplete)")]
    Mixed,
}

/// Aggregate statistics of a non-empty cohort.
///
/// Means are serialized rounded to three decimal places; extremes keep their
/// native precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub kind: CohortKind,
    pub count: usize,
    #[serde(serialize_with = "serialize_rounded")]
    pub mean_time: f64,
    /// Lowest effective time.
    pub best_time: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub mean_rate: f64,
    /// Highest 3BV/s.
    pub best_rate: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub mean_efficiency: f64,
    /// Highest efficiency.
    pub best_efficiency: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub mean_clicks: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub mean_difficulty_metric: f64,
    /// Records whose click counters do not add up.
    pub inconsistent_clicks: usize,
}

const MEAN_DECIMALS: i32 = 3;

fn round_mean(value: f64) -> f64 {
    let scale = 10_f64.powi(MEAN_DECIMALS);
    (value * scale).round() / scale
}

fn serialize_rounded<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_mean(*value))
}

impl CohortSummary {
    /// Summarizes a cohort.
    ///
    /// Returns `None` for an empty cohort, which has no summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepstats_analysis::cohort::{Cohort, CohortSummary};
    /// # use sweepstats_analysis::record::SessionRecord;
    /// # let records: Vec<SessionRecord> = vec![];
    ///
    /// if let Some(summary) = CohortSummary::new(Cohort::Solved.select(&records)) {
    ///     println!("{summary}");
    /// }
    /// ```
    #[must_use]
    pub fn new<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SessionRecord>,
    {
        let records = records.into_iter().collect::<Vec<_>>();
        let stats_of = |value: fn(&SessionRecord) -> f64| {
            DescriptiveStats::new(records.iter().map(|record| value(record)))
        };

        let time = stats_of(|record| record.effective_time)?;
        let rate = stats_of(|record| record.rate_metric)?;
        let efficiency = stats_of(|record| record.efficiency_metric)?;
        let clicks = stats_of(|record| f64::from(record.clicks.total))?;
        let difficulty_metric = stats_of(|record| f64::from(record.difficulty_metric))?;

        let kind = if records.iter().all(|record| record.solved) {
            CohortKind::Completed
        } else if records.iter().all(|record| !record.solved) {
            CohortKind::Incomplete
        } else {
            CohortKind::Mixed
        };

        Some(Self {
            kind,
            count: records.len(),
            mean_time: time.mean,
            best_time: time.min,
            mean_rate: rate.mean,
            best_rate: rate.max,
            mean_efficiency: efficiency.mean,
            best_efficiency: efficiency.max,
            mean_clicks: clicks.mean,
            mean_difficulty_metric: difficulty_metric.mean,
            inconsistent_clicks: records
                .iter()
                .filter(|record| !record.clicks.is_consistent())
                .count(),
        })
    }

    /// Panel heading, e.g. `Stats for 12 completed games:`.
    #[must_use]
    pub fn headline(&self) -> String {
        format!("Stats for {} {} games:", self.count, self.kind)
    }
}

impl fmt::Display for CohortSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline())?;
        writeln!(f, "  Avg. time: {:.3} s", self.mean_time)?;
        writeln!(f, "  Best time: {} s", self.best_time)?;
        writeln!(f, "  Avg. 3BV/s: {:.3}", self.mean_rate)?;
        writeln!(f, "  Best 3BV/s: {}", self.best_rate)?;
        writeln!(f, "  Avg. efficiency: {:.3}%", self.mean_efficiency)?;
        writeln!(f, "  Best efficiency: {}%", self.best_efficiency)?;
        writeln!(f, "  Avg. # clicks: {:.3}", self.mean_clicks)?;
        write!(f, "  Avg. board 3BV: {:.3}", self.mean_difficulty_metric)?;
        if self.inconsistent_clicks > 0 {
            write!(
                f,
                "\n  Inconsistent click counts: {}",
                self.inconsistent_clicks
            )?;
        }
        Ok(())
    }
}

/// One panel of the statistics view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortPanel {
    pub cohort: Cohort,
    pub summary: CohortSummary,
}

/// Builds the statistics panels shown for `records`.
#[must_use]
pub fn cohort_panels(records: &[SessionRecord]) -> Vec<CohortPanel> {
    let mut cohorts = vec![Cohort::Solved, Cohort::Unsolved];
    if records.iter().any(|record| !record.solved) {
        cohorts.push(Cohort::All);
    }
    cohorts
        .into_iter()
        .filter_map(|cohort| {
            let summary = CohortSummary::new(cohort.select(records))?;
            Some(CohortPanel { cohort, summary })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        record::ClickCounts,
        test_support::{record, unsolved},
    };

    fn cohort_example() -> Vec<SessionRecord> {
        let mut first = record(0, 10.0, 2.0, 80.0);
        first.clicks = ClickCounts {
            total: 20,
            useful: 18,
            wasted: 2,
        };
        first.difficulty_metric = 15;
        let mut second = record(1000, 20.0, 4.0, 90.0);
        second.clicks = ClickCounts {
            total: 30,
            useful: 25,
            wasted: 5,
        };
        second.difficulty_metric = 25;
        vec![first, second]
    }

    #[test]
    fn test_summary_values() {
        let records = cohort_example();
        let summary = CohortSummary::new(&records).unwrap();
        assert_eq!(summary.kind, CohortKind::Completed);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean_time, 15.0);
        assert_eq!(summary.best_time, 10.0);
        assert_eq!(summary.mean_rate, 3.0);
        assert_eq!(summary.best_rate, 4.0);
        assert_eq!(summary.mean_efficiency, 85.0);
        assert_eq!(summary.best_efficiency, 90.0);
        assert_eq!(summary.mean_clicks, 25.0);
        assert_eq!(summary.mean_difficulty_metric, 20.0);
        assert_eq!(summary.inconsistent_clicks, 0);
    }

    #[test]
    fn test_summary_rendering() {
        let records = cohort_example();
        let text = CohortSummary::new(&records).unwrap().to_string();
        assert!(text.starts_with("Stats for 2 completed games:"));
        assert!(text.contains("Avg. time: 15.000 s"));
        assert!(text.contains("Best time: 10 s"));
        assert!(text.contains("Avg. 3BV/s: 3.000"));
        assert!(text.contains("Best 3BV/s: 4"));
        assert!(text.contains("Avg. efficiency: 85.000%"));
        assert!(!text.contains("Inconsistent"));
    }

    #[test]
    fn test_means_serialize_rounded() {
        let records = [
            record(0, 10.0, 1.0, 80.0),
            record(1, 10.0, 1.0, 80.0),
            record(2, 11.0, 2.0, 81.0),
        ];
        let summary = CohortSummary::new(&records).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["meanTime"], 10.333);
        assert_eq!(json["meanRate"], 1.333);
        assert_eq!(json["bestRate"], 2.0);
        assert_eq!(json["kind"], "completed");
    }

    #[test]
    fn test_empty_cohort_has_no_summary() {
        assert_eq!(CohortSummary::new(std::iter::empty()), None);
        let records = cohort_example();
        assert_eq!(CohortSummary::new(Cohort::Unsolved.select(&records)), None);
    }

    #[test]
    fn test_inconsistent_clicks_are_counted() {
        let mut records = cohort_example();
        records[1].clicks.wasted = 7;
        let summary = CohortSummary::new(&records).unwrap();
        assert_eq!(summary.inconsistent_clicks, 1);
        assert_eq!(summary.mean_clicks, 25.0);
        assert!(summary.to_string().contains("Inconsistent click counts: 1"));
    }

    #[test]
    fn test_kind_from_contents() {
        let records = vec![record(0, 10.0, 1.0, 80.0), unsolved(1, 50.0, 60.0)];
        assert_eq!(
            CohortSummary::new(&records).unwrap().kind,
            CohortKind::Mixed
        );
        let summary = CohortSummary::new(Cohort::Unsolved.select(&records)).unwrap();
        assert_eq!(summary.kind, CohortKind::Incomplete);
        assert_eq!(summary.headline(), "Stats for 1 incomplete games:");
        assert_eq!(summary.best_time, 50.0);
    }

    mod panels {
        use super::*;

        fn cohorts(records: &[SessionRecord]) -> Vec<Cohort> {
            cohort_panels(records).iter().map(|p| p.cohort).collect()
        }

        #[test]
        fn test_solved_only() {
            let records = cohort_example();
            assert_eq!(cohorts(&records), [Cohort::Solved]);
        }

        #[test]
        fn test_mixed() {
            let mut records = cohort_example();
            records.push(unsolved(2000, 99.0, 40.0));
            assert_eq!(
                cohorts(&records),
                [Cohort::Solved, Cohort::Unsolved, Cohort::All]
            );
            let all = &cohort_panels(&records)[2].summary;
            assert_eq!(all.count, 3);
            assert_eq!(all.kind, CohortKind::Mixed);
        }

        #[test]
        fn test_unsolved_only() {
            let records = vec![unsolved(0, 80.0, 50.0), unsolved(1, 90.0, 70.0)];
            assert_eq!(cohorts(&records), [Cohort::Unsolved, Cohort::All]);
        }

        #[test]
        fn test_no_records() {
            assert!(cohort_panels(&[]).is_empty());
        }
    }
}
