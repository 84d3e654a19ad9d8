use serde::{Deserialize, Serialize};

/// Reference growth curves without incubation or removal.
///
/// They are kept next to the epidemic models for comparison only and take no part in any
/// statistic.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Permanent infection in an unconstrained population, capped at the population size.
    Exponential,

    /// Permanent infection with a finite population correction on the active cases.
    Logistic,
}

impl Baseline {
    /// Active cases of the next day given the cases of today and the daily rate `beta = h * p`.
    pub fn next(&self, current: f64, beta: f64, population: f64) -> f64 {
        match self {
            Baseline::Exponential => (current * (1. + beta)).min(population),
            Baseline::Logistic => {
                if current <= 0. {
                    return 0.;
                }
                let correction = 1. - current / population;
                (current * (1. + beta * correction)).min(population)
            }
        }
    }
}
