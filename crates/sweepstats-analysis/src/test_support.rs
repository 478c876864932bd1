use chrono::DateTime;

use crate::record::{ClickCounts, GameId, SessionRecord};

/// Solved record with the given time axis value and metrics.
pub(crate) fn record(
    epoch_value: i64,
    effective_time: f64,
    rate_metric: f64,
    efficiency_metric: f64,
) -> SessionRecord {
    SessionRecord {
        id: GameId::new(format!("game-{epoch_value}")),
        timestamp: DateTime::from_timestamp_millis(epoch_value).unwrap(),
        epoch_value,
        solved: true,
        elapsed_time: effective_time,
        estimated_time: None,
        effective_time,
        difficulty_metric: 100,
        rate_metric,
        efficiency_metric,
        clicks: ClickCounts {
            total: 30,
            useful: 25,
            wasted: 5,
        },
        difficulty: None,
        solve_percentage: None,
        completed_difficulty_metric: None,
    }
}

/// Unsolved record whose effective time is its estimate.
pub(crate) fn unsolved(
    epoch_value: i64,
    estimated_time: f64,
    solve_percentage: f64,
) -> SessionRecord {
    SessionRecord {
        solved: false,
        elapsed_time: estimated_time * solve_percentage / 100.0,
        estimated_time: Some(estimated_time),
        solve_percentage: Some(solve_percentage),
        ..record(epoch_value, estimated_time, 1.0, 60.0)
    }
}
