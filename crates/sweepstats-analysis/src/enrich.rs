//! Record enrichment: validation and derived fields
//!
//! Enrichment is the single boundary where loosely typed service records become
//! [`SessionRecord`]s. Every required numeric field is checked once here, so
//! downstream computations never see a missing or negative value.
//!
//! Two fields are derived:
//!
//! - `epochValue`: the session timestamp in milliseconds since the Unix epoch
//! - `effectiveTime`: the elapsed time for solved sessions; for unsolved
//!   sessions either the estimated or the elapsed time, per
//!   [`UnsolvedTimePolicy`]
//!
//! Deriving is idempotent: [`SessionRecord::rederive`] recomputes both fields
//! from the record's own source fields, so applying the same policy twice
//! gives the same record.
//!
//! # Example
//!
//! ```
//! use sweepstats_analysis::{
//!     enrich::{UnsolvedTimePolicy, enrich_all},
//!     record::RawSessionRecord,
//! };
//!
//! let raw: Vec<RawSessionRecord> = serde_json::from_str(
//!     r#"[{
//!         "game-id": 1, "game-timestamp": "2023-06-01T12:00:00Z",
//!         "board-solved": false, "elapsed-time": 30.0, "estimated-time": 80.0,
//!         "board-3bv": 120, "game-3bvps": 1.5, "efficiency": 70,
//!         "total-clicks": 40, "useful-clicks": 35, "wasted-clicks": 5
//!     }]"#,
//! )
//! .unwrap();
//!
//! let batch = enrich_all(&raw, UnsolvedTimePolicy::Estimated);
//! assert!(batch.rejected.is_empty());
//! assert_eq!(batch.records[0].effective_time, 80.0);
//! assert_eq!(batch.records[0].epoch_value, 1_685_620_800_000);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ClickCounts, GameId, RawSessionRecord, SessionRecord};

/// Which time stands in for an unsolved session.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum UnsolvedTimePolicy {
    /// Projected time to clear the board. The elapsed time of an abandoned
    /// attempt says little about the player's pace.
    #[default]
    #[display("estimated")]
    Estimated,
    /// Time actually spent before the session ended.
    #[display("elapsed")]
    Elapsed,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum EnrichError {
    #[display("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[display("field `{field}` has invalid value {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[display("unrecognized timestamp `{value}`")]
    InvalidTimestamp { value: String },
}

/// A raw record that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    /// Position of the record in the input sequence.
    pub position: usize,
    /// Identifier, when the record carried one.
    pub id: Option<GameId>,
    #[serde(serialize_with = "serialize_display")]
    pub error: EnrichError,
}

fn serialize_display<S>(error: &EnrichError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

/// Result of enriching a sequence of raw records.
#[derive(Debug, Clone, Default)]
pub struct EnrichedBatch {
    /// Records that passed validation, in input order.
    pub records: Vec<SessionRecord>,
    /// Records that failed validation.
    pub rejected: Vec<RejectedRecord>,
}

/// Enriches every record, separating valid records from rejected ones.
///
/// The input is not modified; accepted records keep their input order.
#[must_use]
pub fn enrich_all(raw: &[RawSessionRecord], policy: UnsolvedTimePolicy) -> EnrichedBatch {
    let mut batch = EnrichedBatch::default();
    for (position, record) in raw.iter().enumerate() {
        match record.enrich(policy) {
            Ok(record) => batch.records.push(record),
            Err(error) => batch.rejected.push(RejectedRecord {
                position,
                id: record.game_id.clone(),
                error,
            }),
        }
    }
    batch
}

/// Returns the records ordered by `epochValue`.
///
/// The sort is stable, so sessions sharing a timestamp keep their relative
/// order. The input slice is left untouched.
#[must_use]
pub fn sort_chronologically(records: &[SessionRecord]) -> Vec<SessionRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| record.epoch_value);
    sorted
}

impl RawSessionRecord {
    /// Validates this record and computes its derived fields.
    pub fn enrich(&self, policy: UnsolvedTimePolicy) -> Result<SessionRecord, EnrichError> {
        let id = self
            .game_id
            .clone()
            .ok_or(EnrichError::MissingField { field: "game-id" })?;
        let timestamp = required("game-timestamp", self.game_timestamp.as_deref())?;
        let timestamp =
            parse_timestamp(timestamp).ok_or_else(|| EnrichError::InvalidTimestamp {
                value: timestamp.to_owned(),
            })?;
        let solved = required("board-solved", self.board_solved)?;
        let elapsed_time =
            non_negative("elapsed-time", required("elapsed-time", self.elapsed_time)?)?;
        let estimated_time = self
            .estimated_time
            .map(|value| non_negative("estimated-time", value))
            .transpose()?;
        let difficulty_metric = count("board-3bv", required("board-3bv", self.board_3bv)?)?;
        let rate_metric = non_negative("game-3bvps", required("game-3bvps", self.game_3bvps)?)?;
        let efficiency_metric =
            non_negative("efficiency", required("efficiency", self.efficiency)?)?;
        let clicks = ClickCounts {
            total: count("total-clicks", required("total-clicks", self.total_clicks)?)?,
            useful: count("useful-clicks", required("useful-clicks", self.useful_clicks)?)?,
            wasted: count("wasted-clicks", required("wasted-clicks", self.wasted_clicks)?)?,
        };
        let solve_percentage = self
            .solve_percentage
            .map(|value| non_negative("solve-percentage", value))
            .transpose()?;
        let completed_difficulty_metric = self
            .completed_3bv
            .map(|value| count("completed-3bv", value))
            .transpose()?;

        let effective_time = effective_time(solved, elapsed_time, estimated_time, policy)?;

        Ok(SessionRecord {
            id,
            timestamp,
            epoch_value: timestamp.timestamp_millis(),
            solved,
            elapsed_time,
            estimated_time,
            effective_time,
            difficulty_metric,
            rate_metric,
            efficiency_metric,
            clicks,
            difficulty: self.difficulty,
            solve_percentage,
            completed_difficulty_metric,
        })
    }
}

impl SessionRecord {
    /// Recomputes the derived fields from this record's source fields.
    ///
    /// Fails only when `policy` asks for an estimated time the record does not
    /// carry.
    pub fn rederive(&self, policy: UnsolvedTimePolicy) -> Result<Self, EnrichError> {
        Ok(Self {
            epoch_value: self.timestamp.timestamp_millis(),
            effective_time: effective_time(
                self.solved,
                self.elapsed_time,
                self.estimated_time,
                policy,
            )?,
            ..self.clone()
        })
    }
}

fn effective_time(
    solved: bool,
    elapsed_time: f64,
    estimated_time: Option<f64>,
    policy: UnsolvedTimePolicy,
) -> Result<f64, EnrichError> {
    match (solved, policy) {
        (true, _) | (false, UnsolvedTimePolicy::Elapsed) => Ok(elapsed_time),
        (false, UnsolvedTimePolicy::Estimated) => estimated_time.ok_or(EnrichError::MissingField {
            field: "estimated-time",
        }),
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, EnrichError> {
    value.ok_or(EnrichError::MissingField { field })
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, EnrichError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EnrichError::InvalidValue { field, value })
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(field: &'static str, value: f64) -> Result<u32, EnrichError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(EnrichError::InvalidValue { field, value })
    }
}

/// Parses a service timestamp.
///
/// RFC 3339 timestamps keep their offset. Naive date-times
/// (`YYYY-MM-DD HH:MM:SS`, optionally with `T` and fractional seconds) and bare
/// dates are taken as UTC.
///
/// # Examples
///
/// ```
/// # use sweepstats_analysis::enrich::parse_timestamp;
/// let a = parse_timestamp("2023-06-01T12:00:00+02:00").unwrap();
/// let b = parse_timestamp("2023-06-01 10:00:00").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
