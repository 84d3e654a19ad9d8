use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViralyError};

/// Epidemiological parameters of a simulation that do not change over time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parameters {
    /// Mean number of days an infected individual stays infectious (`T`).
    pub infectious_period: usize,

    /// Standard deviation of the infectious period in days (`L`). A value of zero describes a
    /// fixed infectious period.
    #[serde(default)]
    pub infectious_period_stdev: f64,

    /// Days from exposure until an individual becomes infectious (`I`). One day means that
    /// exposed individuals are infectious from the next day on.
    #[serde(default = "default_incubation_period")]
    pub incubation_period: usize,

    /// Size of the population (`M`).
    pub population: f64,

    /// Active cases on day zero (`N0`).
    pub initial_infections: f64,

    /// Individuals that are immune before the simulation starts.
    #[serde(default)]
    pub pre_immune: f64,

    /// Fraction of removed cases that are deaths rather than recoveries (`DR`).
    pub death_rate: f64,

    /// Number of simulated days after the initial condition (`tmax`).
    pub days: usize,
}

fn default_incubation_period() -> usize {
    1
}

impl Parameters {
    /// Susceptible population on day zero.
    pub fn initial_available(&self) -> f64 {
        self.population - self.initial_infections - self.pre_immune
    }

    pub fn validate(&self) -> Result<()> {
        let check = |condition: bool, message: &str| {
            if condition {
                Ok(())
            } else {
                Err(ViralyError::ConfigurationError(message.to_string()))
            }
        };

        check(
            self.infectious_period >= 1,
            "infectious period must be at least one day",
        )?;
        check(
            self.infectious_period_stdev.is_finite() && self.infectious_period_stdev >= 0.,
            "infectious period standard deviation must not be negative",
        )?;
        check(
            self.incubation_period >= 1,
            "incubation period must be at least one day",
        )?;
        check(
            self.population.is_finite() && self.population > 0.,
            "population must be positive",
        )?;
        check(
            self.initial_infections.is_finite() && self.initial_infections >= 0.,
            "initial infections must not be negative",
        )?;
        check(
            self.pre_immune.is_finite() && self.pre_immune >= 0.,
            "pre-immune population must not be negative",
        )?;
        check(
            self.initial_infections + self.pre_immune <= self.population,
            "initial infections and pre-immune population must not exceed the population",
        )?;
        check(
            (0. ..=1.).contains(&self.death_rate),
            "death rate must be between 0 and 1",
        )?;
        Ok(())
    }
}
