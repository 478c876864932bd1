/// Descriptive statistics summarizing a dataset.
///
/// This structure contains the measures of central tendency and the extremes
/// of a dataset of `f64` values. It is computed in a single pass and does not
/// require the values to be sorted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The sum of all values.
    pub sum: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from values in any order.
    ///
    /// # Arguments
    ///
    /// * `values` - An iterator over `f64` values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use sweepstats_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;

        let mut count = 1;
        let mut min = first;
        let mut max = first;
        let mut sum = first;
        for value in values {
            count += 1;
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }
        let mean = sum / count as f64;

        Some(Self {
            count,
            min,
            max,
            sum,
            mean,
        })
    }
}
