//! Session record types
//!
//! Two shapes of the same session exist:
//!
//! - [`RawSessionRecord`]: the loosely typed record as delivered by the data
//!   service. Every field is optional and numeric fields are plain JSON
//!   numbers.
//! - [`SessionRecord`]: the validated, strongly typed record produced by
//!   [`enrich`](crate::enrich), carrying the derived `epochValue` and
//!   `effectiveTime` fields every analytic depends on.
//!
//! # Wire Format
//!
//! Raw records use the service's hyphenated keys:
//!
//! ```json
//! {
//!   "game-id": 2417788123,
//!   "game-timestamp": "2023-06-01 18:22:05",
//!   "board-solved": false,
//!   "elapsed-time": 41.2,
//!   "estimated-time": 97.81,
//!   "board-3bv": 160,
//!   "game-3bvps": 1.64,
//!   "efficiency": 71,
//!   "total-clicks": 93,
//!   "useful-clicks": 84,
//!   "wasted-clicks": 9,
//!   "difficulty": "expert",
//!   "solve-percentage": 42.125,
//!   "completed-3bv": 67
//! }
//! ```
//!
//! Enriched records serialize with camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque session identifier.
///
/// The service emits identifiers either as JSON strings or as integers; both
/// deserialize into the same textual form.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(from = "GameIdRepr", into = "String")]
pub struct GameId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum GameIdRepr {
    Text(String),
    Integer(u64),
}

impl From<GameIdRepr> for GameId {
    fn from(repr: GameIdRepr) -> Self {
        match repr {
            GameIdRepr::Text(text) => Self(text),
            GameIdRepr::Integer(value) => Self(value.to_string()),
        }
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

impl GameId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Board difficulty tier.
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
pub enum Difficulty {
    #[display("beginner")]
    Beginner,
    #[display("intermediate")]
    Intermediate,
    #[display("expert")]
    Expert,
}

/// Session record as delivered by the data service, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawSessionRecord {
    pub game_id: Option<GameId>,
    pub game_timestamp: Option<String>,
    pub board_solved: Option<bool>,
    pub elapsed_time: Option<f64>,
    pub estimated_time: Option<f64>,
    pub board_3bv: Option<f64>,
    pub game_3bvps: Option<f64>,
    pub efficiency: Option<f64>,
    pub total_clicks: Option<f64>,
    pub useful_clicks: Option<f64>,
    pub wasted_clicks: Option<f64>,
    pub difficulty: Option<Difficulty>,
    pub solve_percentage: Option<f64>,
    pub completed_3bv: Option<f64>,
}

/// Click counters of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClickCounts {
    pub total: u32,
    pub useful: u32,
    pub wasted: u32,
}

impl ClickCounts {
    /// Returns `true` if `useful + wasted == total`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sweepstats_analysis::record::ClickCounts;
    /// assert!(ClickCounts { total: 20, useful: 15, wasted: 5 }.is_consistent());
    /// assert!(!ClickCounts { total: 20, useful: 15, wasted: 4 }.is_consistent());
    /// ```
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        u64::from(self.useful) + u64::from(self.wasted) == u64::from(self.total)
    }
}

/// Validated session record with derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Opaque identifier, used only to link back to the session.
    pub id: GameId,
    /// When the session was played.
    pub timestamp: DateTime<Utc>,
    /// `timestamp` as milliseconds since the Unix epoch.
    pub epoch_value: i64,
    /// Whether the board was cleared.
    pub solved: bool,
    /// Time actually spent, in seconds.
    pub elapsed_time: f64,
    /// Projected time to clear the board, in seconds. Only meaningful for
    /// unsolved sessions.
    pub estimated_time: Option<f64>,
    /// Time used by every display and computation, chosen by
    /// [`UnsolvedTimePolicy`](crate::enrich::UnsolvedTimePolicy).
    pub effective_time: f64,
    /// Board 3BV.
    pub difficulty_metric: u32,
    /// 3BV per second.
    pub rate_metric: f64,
    /// Efficiency score in percent.
    pub efficiency_metric: f64,
    pub clicks: ClickCounts,
    pub difficulty: Option<Difficulty>,
    /// Completion percentage of an unsolved session.
    pub solve_percentage: Option<f64>,
    /// 3BV cleared before an unsolved session ended.
    pub completed_difficulty_metric: Option<u32>,
}

impl SessionRecord {
    /// Builds the link to this session on the game site by appending the
    /// identifier to `base`.
    #[must_use]
    pub fn game_url(&self, base: &str) -> String {
        format!("{base}{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod raw_record_deserialization {
        use super::*;

        #[test]
        fn test_full_record() {
            let json = r#"{
                "game-id": 2417788123,
                "game-timestamp": "2023-06-01 18:22:05",
                "board-solved": false,
                "elapsed-time": 41.2,
                "estimated-time": 97.81,
                "board-3bv": 160,
                "game-3bvps": 1.64,
                "efficiency": 71,
                "total-clicks": 93,
                "useful-clicks": 84,
                "wasted-clicks": 9,
                "difficulty": "expert",
                "solve-percentage": 42.125,
                "completed-3bv": 67
            }"#;
            let raw: RawSessionRecord = serde_json::from_str(json).unwrap();
            assert_eq!(raw.game_id, Some(GameId::new("2417788123")));
            assert_eq!(raw.board_solved, Some(false));
            assert_eq!(raw.board_3bv, Some(160.0));
            assert_eq!(raw.game_3bvps, Some(1.64));
            assert_eq!(raw.difficulty, Some(Difficulty::Expert));
            assert_eq!(raw.completed_3bv, Some(67.0));
        }

        #[test]
        fn test_missing_fields_are_none() {
            let raw: RawSessionRecord = serde_json::from_str(r#"{"game-id": "abc"}"#).unwrap();
            assert_eq!(raw.game_id, Some(GameId::new("abc")));
            assert_eq!(raw.elapsed_time, None);
            assert_eq!(raw.efficiency, None);
        }

        #[test]
        fn test_unknown_fields_are_ignored() {
            let raw: RawSessionRecord =
                serde_json::from_str(r#"{"game-id": 1, "board-width": 30}"#).unwrap();
            assert_eq!(raw.game_id, Some(GameId::new("1")));
        }
    }

    #[test]
    fn test_game_id_serializes_as_string() {
        let json = serde_json::to_string(&GameId::new("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert_eq!("Beginner".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert!("hard".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Intermediate.to_string(), "intermediate");
    }
}
