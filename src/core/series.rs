//! Append-only daily time series
//!
//! Every quantity tracked by the simulation is stored as a `Series` indexed by day, starting at
//! the initial condition on day 0. Outflow kernels look back over the complete history, so
//! nothing is ever dropped during a run.

use derive_more::Deref;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Deref, Serialize, Deserialize)]
pub struct Series(Vec<f64>);

impl Series {
    /// Create a series holding only the value of day 0.
    pub fn new(initial: f64) -> Self {
        Series(vec![initial])
    }

    pub fn with_capacity(initial: f64, days: usize) -> Self {
        let mut values = Vec::with_capacity(days + 1);
        values.push(initial);
        Series(values)
    }

    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    /// Value of the most recent day.
    pub fn latest(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Prefix sums, including the value of the current day.
    pub fn cumulative(&self) -> Series {
        self.0
            .iter()
            .scan(0., |acc, &value| {
                *acc += value;
                Some(*acc)
            })
            .collect()
    }

    pub fn scaled(&self, factor: f64) -> Series {
        self.0.iter().map(|value| value * factor).collect()
    }

    pub fn offset(&self, amount: f64) -> Series {
        self.0.iter().map(|value| value + amount).collect()
    }

    /// Element-wise sum of two series of equal length.
    pub fn add(&self, other: &Series) -> Series {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a + b)
            .collect()
    }

    /// Day and value of the first maximum.
    pub fn argmax(&self) -> Option<(usize, f64)> {
        self.0
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (day, value)| match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((day, value)),
            })
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Series(iter.into_iter().collect())
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative() {
        let series = Series::from(vec![1., 2., 0., 3.]);
        assert_eq!(*series.cumulative(), vec![1., 3., 3., 6.]);
        assert_eq!(series.total(), 6.);
    }

    #[test]
    fn argmax_takes_first_maximum() {
        let series = Series::from(vec![0., 4., 2., 4., 1.]);
        assert_eq!(series.argmax(), Some((1, 4.)));
        assert_eq!(Series::default().argmax(), None);
    }

    #[test]
    fn push_and_latest() {
        let mut series = Series::with_capacity(5., 3);
        assert_eq!(series.latest(), 5.);
        series.push(7.);
        assert_eq!(series.len(), 2);
        assert_eq!(series[1], 7.);
        assert_eq!(series.latest(), 7.);
    }

    #[test]
    fn arithmetic() {
        let a = Series::from(vec![1., 2.]);
        let b = Series::from(vec![3., 5.]);
        assert_eq!(*a.add(&b), vec![4., 7.]);
        assert_eq!(*a.scaled(0.5), vec![0.5, 1.]);
        assert_eq!(*a.offset(1.), vec![2., 3.]);
    }
}
