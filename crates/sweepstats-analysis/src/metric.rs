//! Displayable metrics and per-metric containers
//!
//! Every chart shows one of three metrics against time:
//!
//! | metric                   | record field        | unit   |
//! |--------------------------|---------------------|--------|
//! | [`Metric::Time`]         | `effectiveTime`     | s      |
//! | [`Metric::Rate`]         | `rateMetric`        | 3BV/s  |
//! | [`Metric::Efficiency`]   | `efficiencyMetric`  | %      |
//!
//! [`DerivedPoint`] carries all three so one synthetic point can be plotted
//! whichever metric is selected.

use serde::{Deserialize, Serialize};

use crate::record::SessionRecord;

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
pub enum Metric {
    #[display("time")]
    Time,
    #[display("rate")]
    Rate,
    #[display("efficiency")]
    Efficiency,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::Time, Self::Rate, Self::Efficiency];

    /// Reads this metric from a record.
    #[must_use]
    pub fn value(self, record: &SessionRecord) -> f64 {
        match self {
            Self::Time => record.effective_time,
            Self::Rate => record.rate_metric,
            Self::Efficiency => record.efficiency_metric,
        }
    }

    /// Unit suffix used in labels.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Time => "s",
            Self::Rate => "3BV/s",
            Self::Efficiency => "%",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Rate => "3BV per second",
            Self::Efficiency => "Efficiency",
        }
    }

    const fn position(self) -> usize {
        match self {
            Self::Time => 0,
            Self::Rate => 1,
            Self::Efficiency => 2,
        }
    }
}

impl SessionRecord {
    /// The three metric values in [`Metric::ALL`] order.
    #[must_use]
    pub fn metric_values(&self) -> [f64; 3] {
        Metric::ALL.map(|metric| metric.value(self))
    }
}

/// One value per metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerMetric<T> {
    pub time: T,
    pub rate: T,
    pub efficiency: T,
}

impl<T> PerMetric<T> {
    /// Builds a container by evaluating `f` for each metric in
    /// [`Metric::ALL`] order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Metric) -> T,
    {
        Self {
            time: f(Metric::Time),
            rate: f(Metric::Rate),
            efficiency: f(Metric::Efficiency),
        }
    }

    /// Builds a container from values in [`Metric::ALL`] order.
    pub fn from_array([time, rate, efficiency]: [T; 3]) -> Self {
        Self {
            time,
            rate,
            efficiency,
        }
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> &T {
        match metric {
            Metric::Time => &self.time,
            Metric::Rate => &self.rate,
            Metric::Efficiency => &self.efficiency,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &T)> + '_ {
        Metric::ALL.into_iter().map(|metric| (metric, self.get(metric)))
    }
}

/// A synthetic chart point produced by trend and moving-average computations.
///
/// Derived points never correspond to a real session and therefore carry no
/// identity fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPoint {
    pub epoch_value: i64,
    pub effective_time: f64,
    pub rate_metric: f64,
    pub efficiency_metric: f64,
}

impl DerivedPoint {
    /// Builds a point from metric values in [`Metric::ALL`] order.
    #[must_use]
    pub fn new(
        epoch_value: i64,
        [effective_time, rate_metric, efficiency_metric]: [f64; 3],
    ) -> Self {
        Self {
            epoch_value,
            effective_time,
            rate_metric,
            efficiency_metric,
        }
    }

    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        [self.effective_time, self.rate_metric, self.efficiency_metric][metric.position()]
    }
}
