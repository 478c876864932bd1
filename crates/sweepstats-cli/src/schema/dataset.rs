use serde::Deserialize;
use sweepstats_analysis::record::RawSessionRecord;

/// Session records saved from the game service.
///
/// A dump is either the bare record list or a snapshot that also carries the
/// time the service last refreshed its data.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SessionDump {
    Games(Vec<RawSessionRecord>),
    Snapshot {
        #[serde(rename = "latest-timestamp", default)]
        latest_timestamp: Option<String>,
        games: Vec<RawSessionRecord>,
    },
}

impl SessionDump {
    pub fn into_parts(self) -> (Option<String>, Vec<RawSessionRecord>) {
        match self {
            Self::Games(games) => (None, games),
            Self::Snapshot {
                latest_timestamp,
                games,
            } => (latest_timestamp, games),
        }
    }
}
