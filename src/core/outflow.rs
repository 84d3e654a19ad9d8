//! Outflow kernels
//!
//! An outflow kernel decides how many of the cases that became infectious in the past leave the
//! infectious compartment on a given day. The fixed kernel removes every daily cohort in a
//! single batch after the mean infectious period. The Gaussian kernel spreads the removal of a
//! cohort over a normal profile centred on the mean infectious period.
//!
//! The Gaussian kernel never removes the part of a cohort's profile that lies before the day
//! the cohort appeared. When the spread is large compared to the mean period this leaves a
//! small permanent residue of active cases.

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutflowKernel {
    /// Every cohort leaves exactly `period` days after it appeared.
    Fixed,

    /// Cohorts leave following a normal distribution centred `period` days after they
    /// appeared.
    Gaussian,
}

impl OutflowKernel {
    /// Kernel implied by the spread of the infectious period: no spread selects the fixed kernel.
    pub fn from_spread(spread: f64) -> Self {
        if spread == 0. {
            OutflowKernel::Fixed
        } else {
            OutflowKernel::Gaussian
        }
    }

    pub fn outflow(&self, day: usize, history: &[f64], period: usize, spread: f64) -> f64 {
        match self {
            OutflowKernel::Fixed => fixed_outflow(day, history, period),
            OutflowKernel::Gaussian => gaussian_outflow(day, history, period, spread),
        }
    }
}

impl std::fmt::Display for OutflowKernel {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutflowKernel::Fixed => write!(formatter, "fixed"),
            OutflowKernel::Gaussian => write!(formatter, "gaussian"),
        }
    }
}

/// Cases that appeared exactly `period` days before `day`.
pub fn fixed_outflow(day: usize, history: &[f64], period: usize) -> f64 {
    match day.checked_sub(period) {
        Some(origin) => history.get(origin).copied().unwrap_or(0.),
        None => 0.,
    }
}

/// Share of every earlier cohort whose removal time falls into `[day - 1, day)`.
///
/// The standard deviation never drops below one day.
pub fn gaussian_outflow(day: usize, history: &[f64], period: usize, spread: f64) -> f64 {
    let stdev = spread.max(1.);
    let lower = day as f64 - 1.;
    let upper = day as f64;
    history
        .iter()
        .take(day)
        .enumerate()
        .map(|(origin, cases)| {
            let center = (origin + period) as f64;
            cases * interval_mass(center, stdev, lower, upper)
        })
        .sum()
}

/// Probability mass of a normal distribution between `lower` and `upper`.
pub fn interval_mass(center: f64, stdev: f64, lower: f64, upper: f64) -> f64 {
    normal_cdf(upper, center, stdev) - normal_cdf(lower, center, stdev)
}

pub fn normal_cdf(x: f64, center: f64, stdev: f64) -> f64 {
    0.5 * (1. + erf((x - center) / (stdev * SQRT_2)))
}

// Abramowitz and Stegun 7.1.26, absolute error below 1.5e-7.
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0. { -1. } else { 1. };
    let x = x.abs();

    let t = 1. / (1. + p * x);
    let y = 1. - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}
