//! Trailing simple moving averages computed incrementally.
//!
//! A window of `w` rows slides over the input one position at a time. The
//! running sums are initialised from the first `w` rows and then updated by
//! removing the row leaving the window and adding the row entering it, so the
//! whole series costs O(n) regardless of the window size.
//!
//! Rows are averaged column-wise, which lets several metrics share one pass.
//! The input order is the order of the series; nothing is sorted here.

/// Computes the trailing moving average of each column of `rows`.
///
/// One output row is produced per complete window, ending at input positions
/// `window - 1 ..= rows.len() - 1`, so the output length is
/// `rows.len() - window + 1`. A window of zero or one longer than the input
/// yields an empty result.
///
/// The leaving row is subtracted before the entering row is added. With a
/// window of one the running sum is therefore reset to exactly zero before
/// each new value, and the output reproduces the input bit for bit.
///
/// # Examples
///
/// ```
/// use sweepstats_stats::moving_average::moving_average;
///
/// let rows = [[1.0], [2.0], [3.0], [4.0], [5.0]];
/// let averages = moving_average(&rows, 3);
/// assert_eq!(averages, vec![[2.0], [3.0], [4.0]]);
///
/// assert!(moving_average(&rows, 0).is_empty());
/// assert!(moving_average(&rows, 6).is_empty());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn moving_average<const N: usize>(rows: &[[f64; N]], window: usize) -> Vec<[f64; N]> {
    if window < 1 || window > rows.len() {
        return vec![];
    }

    let divisor = window as f64;
    let mut sums = [0.0; N];
    for row in &rows[..window] {
        for (sum, value) in sums.iter_mut().zip(row) {
            *sum += value;
        }
    }

    let mut averages = Vec::with_capacity(rows.len() - window + 1);
    averages.push(sums.map(|sum| sum / divisor));
    for (leaving, entering) in rows.iter().zip(&rows[window..]) {
        for ((sum, old), new) in sums.iter_mut().zip(leaving).zip(entering) {
            *sum -= old;
            *sum += new;
        }
        averages.push(sums.map(|sum| sum / divisor));
    }
    averages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_length() {
        let rows: Vec<[f64; 2]> = (0..10).map(|i| [f64::from(i), 1.0]).collect();
        for window in 0..=12 {
            let expected = if (1..=rows.len()).contains(&window) {
                rows.len() - window + 1
            } else {
                0
            };
            assert_eq!(moving_average(&rows, window).len(), expected, "window {window}");
        }
    }

    #[test]
    fn test_empty_input() {
        let rows: [[f64; 3]; 0] = [];
        assert!(moving_average(&rows, 1).is_empty());
    }

    #[test]
    fn test_window_of_one_reproduces_input() {
        let rows = [[0.1, 7.25], [0.7, 1e-9], [0.2, 3.3], [1e12, 0.3]];
        assert_eq!(moving_average(&rows, 1), rows.to_vec());
    }

    #[test]
    fn test_full_window_is_overall_mean() {
        let rows = [[2.0, 10.0], [4.0, 20.0], [6.0, 60.0]];
        assert_eq!(moving_average(&rows, 3), vec![[4.0, 30.0]]);
    }

    #[test]
    fn test_columns_slide_together() {
        let rows = [[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0], [5.0, 50.0]];
        assert_eq!(
            moving_average(&rows, 2),
            vec![[1.5, 15.0], [2.5, 25.0], [3.5, 35.0], [4.5, 45.0]]
        );
    }
}
