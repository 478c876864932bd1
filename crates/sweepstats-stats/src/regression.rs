//! Ordinary least-squares regression over several series sharing one x axis.
//!
//! [`LinearRegression`] accumulates the closed-form sums (Σx, Σx², and per
//! series Σy, Σxy, Σy²) in a single pass, so fitting `N` series against the
//! same independent variable never traverses the data more than once.
//!
//! The fit uses the textbook formulas:
//!
//! ```text
//! slope     = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! r         = (nΣxy − ΣxΣy) / √((nΣx² − (Σx)²)(nΣy² − (Σy)²))
//! ```
//!
//! x values are shifted by the first observed x before accumulation. Large
//! offsets such as epoch milliseconds (around 1.7e12) would otherwise square to
//! magnitudes where `nΣx² − (Σx)²` loses every significant digit. The shift
//! leaves the slope and the correlation unchanged; the intercept is translated
//! back to the unshifted axis.
//!
//! # Examples
//!
//! ```
//! use sweepstats_stats::regression::LinearRegression;
//!
//! let mut regression = LinearRegression::<1>::new();
//! regression.push(0.0, [10.0]);
//! regression.push(1000.0, [20.0]);
//! regression.push(2000.0, [30.0]);
//!
//! let [fit] = regression.fit().unwrap();
//! assert!((fit.slope - 0.01).abs() < 1e-12);
//! assert!((fit.intercept - 10.0).abs() < 1e-9);
//! assert!((fit.r_squared.unwrap() - 1.0).abs() < 1e-12);
//! ```

/// Relative size of `nΣy² − (Σy)²` against `nΣy²` below which a series is
/// treated as constant.
pub const CONSTANT_SERIES_TOLERANCE: f64 = 1e-10;

/// Fitted line for a single series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesFit {
    /// Change of y per unit of x.
    pub slope: f64,
    /// Value of y at `x = 0`.
    pub intercept: f64,
    /// Squared Pearson correlation coefficient.
    ///
    /// `None` when the series has no variance, in which case the correlation is
    /// undefined. Spreads below [`CONSTANT_SERIES_TOLERANCE`] relative to the
    /// series' magnitude count as no variance, so constant series whose values
    /// are not exact in binary still report `None`.
    pub r_squared: Option<f64>,
}

impl SeriesFit {
    /// Evaluates the fitted line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Single-pass accumulator for `N` least-squares fits against a shared x axis.
#[derive(Debug, Clone)]
pub struct LinearRegression<const N: usize> {
    origin: Option<f64>,
    count: usize,
    sum_x: f64,
    sum_xx: f64,
    sum_y: [f64; N],
    sum_xy: [f64; N],
    sum_yy: [f64; N],
}

impl<const N: usize> Default for LinearRegression<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LinearRegression<N> {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: None,
            count: 0,
            sum_x: 0.0,
            sum_xx: 0.0,
            sum_y: [0.0; N],
            sum_xy: [0.0; N],
            sum_yy: [0.0; N],
        }
    }

    /// Builds an accumulator from `(x, [y; N])` observations.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepstats_stats::regression::LinearRegression;
    ///
    /// let points = [(0.0, [1.0, 5.0]), (1.0, [3.0, 4.0]), (2.0, [5.0, 3.0])];
    /// let [up, down] = LinearRegression::from_points(points).fit().unwrap();
    /// assert_eq!(up.slope, 2.0);
    /// assert_eq!(down.slope, -1.0);
    /// ```
    #[must_use]
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, [f64; N])>,
    {
        let mut regression = Self::new();
        for (x, ys) in points {
            regression.push(x, ys);
        }
        regression
    }

    /// Number of observations accumulated so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Adds one observation.
    pub fn push(&mut self, x: f64, ys: [f64; N]) {
        let origin = *self.origin.get_or_insert(x);
        let x = x - origin;

        self.count += 1;
        self.sum_x += x;
        self.sum_xx += x * x;
        for (i, y) in ys.into_iter().enumerate() {
            self.sum_y[i] += y;
            self.sum_xy[i] += x * y;
            self.sum_yy[i] += y * y;
        }
    }

    /// Fits all `N` series.
    ///
    /// Returns `None` when no line can be determined: fewer than two
    /// observations, all x values identical (zero denominator), or any series
    /// producing a non-finite slope or intercept.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit(&self) -> Option<[SeriesFit; N]> {
        if self.count < 2 {
            return None;
        }
        let origin = self.origin?;
        let n = self.count as f64;
        let x_denominator = n * self.sum_xx - self.sum_x * self.sum_x;
        if !(x_denominator.is_finite() && x_denominator > 0.0) {
            return None;
        }

        let fits = std::array::from_fn(|i| {
            let numerator = n * self.sum_xy[i] - self.sum_x * self.sum_y[i];
            let slope = numerator / x_denominator;
            let shifted_intercept = (self.sum_y[i] - slope * self.sum_x) / n;
            let intercept = shifted_intercept - slope * origin;

            let y_denominator = n * self.sum_yy[i] - self.sum_y[i] * self.sum_y[i];
            let y_floor = n * self.sum_yy[i] * CONSTANT_SERIES_TOLERANCE;
            let r_squared = (y_denominator > y_floor).then(|| {
                let r = numerator / (x_denominator * y_denominator).sqrt();
                (r * r).min(1.0)
            });

            SeriesFit {
                slope,
                intercept,
                r_squared,
            }
        });

        fits.iter()
            .all(|fit: &SeriesFit| fit.slope.is_finite() && fit.intercept.is_finite())
            .then_some(fits)
    }
}
