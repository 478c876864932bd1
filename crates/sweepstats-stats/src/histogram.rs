/// A fixed-width histogram of a dataset's distribution.
///
/// Values are assigned to bins by rounding to the nearest multiple of the bin
/// width rather than by flooring, so the bin with nominal value `v` collects
/// everything within half a width of `v`. Ties are broken with
/// round-half-to-even: with a width of `1.0`, `2.5` lands in bin `2` and `3.5`
/// in bin `4`.
///
/// The bins run contiguously from the bin of the smallest value to the bin of
/// the largest value. Every bin in that range is present, including bins no
/// value falls into, so the span is capped at [`MAX_BINS`] bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Width of every bin.
    pub width: f64,
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Number of non-finite input values that were left out.
    pub excluded: usize,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// Integer bin index, `round(value / width)`.
    pub index: i64,
    /// Nominal value of the bin, `index × width`.
    ///
    /// This is the centre of the bin, not its lower edge: with a width of `1.0`
    /// the bin with `lower_bound == 2.0` collects values in `[1.5, 2.5]`.
    pub lower_bound: f64,
    /// Lower edge of the values the bin collects, `(index − 0.5) × width`.
    pub lower_edge: f64,
    /// The number of values assigned to this bin.
    pub count: u64,
    /// The values assigned to this bin, in input order.
    pub values: Vec<f64>,
}

/// Largest number of bins a histogram may span.
pub const MAX_BINS: u64 = 100_000;

/// Largest scaled value whose bin index is exactly representable.
const MAX_SCALED_VALUE: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum HistogramError {
    #[display("bin width must be finite and positive, got {width}")]
    InvalidWidth { width: f64 },
    #[display("value {value} is out of range for bin width {width}")]
    ValueOutOfRange { value: f64, width: f64 },
    #[display("values span {bins} bins of width {width}, more than the limit of {limit}")]
    TooManyBins { bins: u64, width: f64, limit: u64 },
}

impl Histogram {
    /// Creates a histogram with bins of the given width.
    ///
    /// The width is applied as a scale factor of `1 / width`, so a width of
    /// `0.1` multiplies by exactly `10` and avoids the representation error of
    /// dividing by `0.1`.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to bin, in any order.
    /// * `width` - The width of each bin. Must be finite and positive.
    ///
    /// # Returns
    ///
    /// A `Histogram` whose bin counts sum to the number of finite input
    /// values. Empty input produces no bins.
    ///
    /// # Errors
    ///
    /// Fails without allocating any bin if `width` is not finite and positive,
    /// if a value lies more than 2^53 widths from zero, or if the values would
    /// need more than [`MAX_BINS`] bins.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sweepstats_stats::histogram::Histogram;
    /// let histogram = Histogram::new([1.2, 3.9, 1.4], 1.0).unwrap();
    /// let counts = histogram.bins.iter().map(|bin| bin.count).collect::<Vec<_>>();
    /// assert_eq!(counts, [2, 0, 0, 1]);
    /// assert_eq!(histogram.bins[0].lower_bound, 1.0);
    /// assert_eq!(histogram.bins[3].lower_bound, 4.0);
    ///
    /// assert!(Histogram::new([0.0, 1e12], 1.0).is_err());
    /// ```
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn new<I>(values: I, width: f64) -> Result<Self, HistogramError>
    where
        I: IntoIterator<Item = f64>,
    {
        if !(width.is_finite() && width > 0.0) {
            return Err(HistogramError::InvalidWidth { width });
        }
        let scale = width.recip();

        let mut excluded = 0;
        let mut indexed = vec![];
        for value in values {
            if !value.is_finite() {
                excluded += 1;
                continue;
            }
            let scaled = (value * scale).round_ties_even();
            if scaled.abs() > MAX_SCALED_VALUE {
                return Err(HistogramError::ValueOutOfRange { value, width });
            }
            indexed.push((scaled as i64, value));
        }

        let Some(first_index) = indexed.iter().map(|(index, _)| *index).min() else {
            return Ok(Self {
                width,
                bins: vec![],
                excluded,
            });
        };
        let last_index = indexed
            .iter()
            .map(|(index, _)| *index)
            .max()
            .unwrap_or(first_index);

        let span = last_index.abs_diff(first_index) + 1;
        if span > MAX_BINS {
            return Err(HistogramError::TooManyBins {
                bins: span,
                width,
                limit: MAX_BINS,
            });
        }

        let mut bins = (first_index..=last_index)
            .map(|index| HistogramBin {
                index,
                lower_bound: index as f64 / scale,
                lower_edge: (index as f64 - 0.5) / scale,
                count: 0,
                values: vec![],
            })
            .collect::<Vec<_>>();

        for (index, value) in indexed {
            let bin = &mut bins[usize::try_from(index - first_index).unwrap_or_default()];
            bin.count += 1;
            bin.values.push(value);
        }

        Ok(Self {
            width,
            bins,
            excluded,
        })
    }

    /// Sum of all bin counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Returns `true` if the histogram has no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}
