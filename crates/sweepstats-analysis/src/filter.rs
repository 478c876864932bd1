//! Record filters
//!
//! The data service filters records by difficulty tier, solved status and a
//! handful of thresholds. [`RecordFilter`] applies the same criteria to
//! records already in memory, so a stored dump can be narrowed without another
//! request.
//!
//! A criterion that is set excludes records lacking the field it tests: a
//! record with no difficulty tag never matches a difficulty filter, and an
//! unsolved record with no completion percentage never passes a completion
//! threshold. Solved records count as 100 % complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Difficulty, SessionRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFilter {
    pub difficulty: Option<Difficulty>,
    /// Keep solved sessions only.
    pub solved_only: bool,
    /// Minimum completion percentage of unsolved sessions.
    pub min_solve_percent: Option<f64>,
    /// Minimum board 3BV.
    pub min_difficulty_metric: Option<u32>,
    pub min_efficiency: Option<f64>,
    /// Inclusive lower bound of the session time.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound of the session time.
    pub until: Option<DateTime<Utc>>,
}

impl RecordFilter {
    /// Returns `true` if no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn matches(&self, record: &SessionRecord) -> bool {
        if self
            .difficulty
            .is_some_and(|difficulty| record.difficulty != Some(difficulty))
        {
            return false;
        }
        if self.solved_only && !record.solved {
            return false;
        }
        if let Some(threshold) = self.min_solve_percent {
            let percent = if record.solved {
                Some(100.0)
            } else {
                record.solve_percentage
            };
            if !percent.is_some_and(|percent| percent >= threshold) {
                return false;
            }
        }
        if self
            .min_difficulty_metric
            .is_some_and(|threshold| record.difficulty_metric < threshold)
        {
            return false;
        }
        if self
            .min_efficiency
            .is_some_and(|threshold| record.efficiency_metric < threshold)
        {
            return false;
        }
        if self.from.is_some_and(|from| record.timestamp < from) {
            return false;
        }
        if self.until.is_some_and(|until| record.timestamp >= until) {
            return false;
        }
        true
    }

    /// Returns the matching records in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepstats_analysis::filter::RecordFilter;
    /// # use sweepstats_analysis::record::SessionRecord;
    /// # let records: Vec<SessionRecord> = vec![];
    ///
    /// let filter = RecordFilter {
    ///     solved_only: true,
    ///     min_efficiency: Some(90.0),
    ///     ..RecordFilter::default()
    /// };
    /// let selected = filter.apply(&records);
    /// assert!(selected.iter().all(|r| r.solved && r.efficiency_metric >= 90.0));
    /// ```
    #[must_use]
    pub fn apply(&self, records: &[SessionRecord]) -> Vec<SessionRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, unsolved};

    const DAY: i64 = 86_400_000;

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = vec![record(0, 10.0, 1.0, 50.0), unsolved(DAY, 80.0, 10.0)];
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&records), records);
    }

    #[test]
    fn test_solved_only() {
        let records = vec![record(0, 10.0, 1.0, 50.0), unsolved(DAY, 80.0, 10.0)];
        let filter = RecordFilter {
            solved_only: true,
            ..RecordFilter::default()
        };
        let kept = filter.apply(&records);
        assert_eq!(kept.len(), 1);
        assert!(kept[0].solved);
    }

    #[test]
    fn test_min_solve_percent() {
        let mut unknown = unsolved(3 * DAY, 80.0, 0.0);
        unknown.solve_percentage = None;
        let records = vec![
            record(0, 10.0, 1.0, 50.0),
            unsolved(DAY, 80.0, 49.0),
            unsolved(2 * DAY, 80.0, 75.0),
            unknown,
        ];
        let filter = RecordFilter {
            min_solve_percent: Some(50.0),
            ..RecordFilter::default()
        };
        let epochs = filter
            .apply(&records)
            .iter()
            .map(|r| r.epoch_value)
            .collect::<Vec<_>>();
        assert_eq!(epochs, [0, 2 * DAY]);
    }

    #[test]
    fn test_thresholds() {
        let mut low_3bv = record(0, 10.0, 1.0, 95.0);
        low_3bv.difficulty_metric = 80;
        let records = vec![low_3bv, record(1, 10.0, 1.0, 70.0), record(2, 10.0, 1.0, 95.0)];
        let filter = RecordFilter {
            min_difficulty_metric: Some(100),
            min_efficiency: Some(90.0),
            ..RecordFilter::default()
        };
        let epochs = filter
            .apply(&records)
            .iter()
            .map(|r| r.epoch_value)
            .collect::<Vec<_>>();
        assert_eq!(epochs, [2]);
    }

    #[test]
    fn test_difficulty_requires_tag() {
        let mut expert = record(0, 10.0, 1.0, 50.0);
        expert.difficulty = Some(Difficulty::Expert);
        let mut beginner = record(1, 10.0, 1.0, 50.0);
        beginner.difficulty = Some(Difficulty::Beginner);
        let untagged = record(2, 10.0, 1.0, 50.0);
        let filter = RecordFilter {
            difficulty: Some(Difficulty::Expert),
            ..RecordFilter::default()
        };
        let kept = filter.apply(&[expert, beginner, untagged]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].difficulty, Some(Difficulty::Expert));
    }

    #[test]
    fn test_date_range_is_half_open() {
        let records = (0..5)
            .map(|day| record(day * DAY, 10.0, 1.0, 50.0))
            .collect::<Vec<_>>();
        let filter = RecordFilter {
            from: DateTime::from_timestamp_millis(DAY),
            until: DateTime::from_timestamp_millis(3 * DAY),
            ..RecordFilter::default()
        };
        let epochs = filter
            .apply(&records)
            .iter()
            .map(|r| r.epoch_value)
            .collect::<Vec<_>>();
        assert_eq!(epochs, [DAY, 2 * DAY]);
    }

    #[test]
    fn test_filter_deserializes_with_defaults() {
        let filter: RecordFilter =
            serde_json::from_str(r#"{"difficulty": "expert", "minEfficiency": 80}"#).unwrap();
        assert_eq!(filter.difficulty, Some(Difficulty::Expert));
        assert_eq!(filter.min_efficiency, Some(80.0));
        assert!(!filter.solved_only);
    }
}
