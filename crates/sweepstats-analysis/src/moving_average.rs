//! Trailing moving average of each metric
//!
//! The records are averaged in the order given. Callers that want a time
//! ordered series sort first with
//! [`sort_chronologically`](crate::enrich::sort_chronologically); this module
//! never reorders its input.

use sweepstats_stats::moving_average::moving_average;

use crate::{metric::DerivedPoint, record::SessionRecord};

/// Default number of sessions per window.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 10;

/// Computes the trailing moving average of every metric with the given window.
///
/// Each point averages `window` consecutive records and carries the
/// `epochValue` of the newest record in its window. The result has
/// `records.len() - window + 1` points, or none when `window` is zero or
/// exceeds the number of records.
///
/// # Examples
///
/// ```
/// use sweepstats_analysis::moving_average::moving_average_points;
/// # use sweepstats_analysis::record::SessionRecord;
/// # let records: Vec<SessionRecord> = vec![];
///
/// let points = moving_average_points(&records, 10);
/// assert!(points.len() <= records.len());
/// ```
#[must_use]
pub fn moving_average_points(records: &[SessionRecord], window: usize) -> Vec<DerivedPoint> {
    let rows = records
        .iter()
        .map(SessionRecord::metric_values)
        .collect::<Vec<_>>();
    let averages = moving_average(&rows, window);
    if averages.is_empty() {
        return vec![];
    }

    records[window - 1..]
        .iter()
        .zip(averages)
        .map(|(record, values)| DerivedPoint::new(record.epoch_value, values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn series(times: &[f64]) -> Vec<SessionRecord> {
        (0_i64..)
            .zip(times)
            .map(|(i, &time)| record(i * 1000, time, time / 10.0, 50.0 + time))
            .collect()
    }

    #[test]
    fn test_window_of_three() {
        let records = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let points = moving_average_points(&records, 3);
        let times = points.iter().map(|p| p.effective_time).collect::<Vec<_>>();
        assert_eq!(times, [2.0, 3.0, 4.0]);
        let efficiencies = points.iter().map(|p| p.efficiency_metric).collect::<Vec<_>>();
        assert_eq!(efficiencies, [52.0, 53.0, 54.0]);
        let epochs = points.iter().map(|p| p.epoch_value).collect::<Vec<_>>();
        assert_eq!(epochs, [2000, 3000, 4000]);
    }

    #[test]
    fn test_output_length() {
        let records = series(&[4.0, 8.0, 15.0, 16.0, 23.0, 42.0]);
        for window in 0..=8 {
            let expected = if (1..=records.len()).contains(&window) {
                records.len() - window + 1
            } else {
                0
            };
            assert_eq!(moving_average_points(&records, window).len(), expected);
        }
    }

    #[test]
    fn test_window_of_one_matches_records() {
        let records = series(&[0.1, 0.7, 12.345, 3.3]);
        let points = moving_average_points(&records, 1);
        assert_eq!(points.len(), records.len());
        for (point, record) in points.iter().zip(&records) {
            assert_eq!(point.epoch_value, record.epoch_value);
            assert_eq!(point.effective_time, record.effective_time);
            assert_eq!(point.rate_metric, record.rate_metric);
            assert_eq!(point.efficiency_metric, record.efficiency_metric);
        }
    }

    #[test]
    fn test_empty_records() {
        assert!(moving_average_points(&[], 1).is_empty());
        assert!(moving_average_points(&[], DEFAULT_MOVING_AVERAGE_WINDOW).is_empty());
    }

    #[test]
    fn test_input_order_is_used() {
        let records = vec![
            record(3000, 9.0, 1.0, 50.0),
            record(1000, 1.0, 1.0, 50.0),
            record(2000, 5.0, 1.0, 50.0),
        ];
        let points = moving_average_points(&records, 2);
        assert_eq!(points[0].effective_time, 5.0);
        assert_eq!(points[0].epoch_value, 1000);
        assert_eq!(points[1].effective_time, 3.0);
        assert_eq!(points[1].epoch_value, 2000);
    }
}
