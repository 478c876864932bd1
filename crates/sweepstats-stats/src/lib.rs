//! Numeric kernels for the sweepstats analytics engine.
//!
//! This crate provides the domain-free computations the analysis layer
//! builds on:
//!
//! - **Descriptive statistics**: count, extremes, sum and mean in one pass
//! - **Linear regression**: least-squares fits of several series against a
//!   shared x axis, accumulated in a single traversal
//! - **Moving averages**: trailing window means updated incrementally
//! - **Histograms**: fixed-width bins assigned by rounding, with a bounded
//!   number of bins
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`regression`]: Ordinary least-squares fits with R²
//! - [`moving_average`]: Sliding-window means over multi-column rows
//! - [`histogram`]: Fixed-width histogram construction
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use sweepstats_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Fitting a trend
//!
//! ```
//! use sweepstats_stats::regression::LinearRegression;
//!
//! let [fit] = LinearRegression::from_points([(0.0, [1.0]), (2.0, [5.0])])
//!     .fit()
//!     .unwrap();
//! assert_eq!(fit.slope, 2.0);
//! assert_eq!(fit.predict(1.0), 3.0);
//! ```
//!
//! ## Smoothing a series
//!
//! ```
//! use sweepstats_stats::moving_average::moving_average;
//!
//! let rows = [[1.0], [2.0], [3.0], [4.0], [5.0]];
//! assert_eq!(moving_average(&rows, 3), vec![[2.0], [3.0], [4.0]]);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use sweepstats_stats::histogram::Histogram;
//!
//! let histogram = Histogram::new([1.0, 2.0, 2.2, 4.0], 1.0).unwrap();
//! assert_eq!(histogram.bins.len(), 4);
//! assert_eq!(histogram.total_count(), 4);
//! ```

pub mod descriptive;
pub mod histogram;
pub mod moving_average;
pub mod regression;
