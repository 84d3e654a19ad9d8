//! Output of a simulation run.
//!
//! The dataset holds the daily series of the preferred reference model together with the
//! series derived from it, the totals of the run, and the raw histories of every model for
//! comparison. All series start with the initial condition on day 0.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::core::{CompartmentHistory, OutflowKernel, Series};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Totals {
    /// Sum of the daily new cases, including the initial infections of day 0.
    pub transmissions: f64,

    /// Transmissions plus the initial infections.
    pub infections: f64,

    /// New cases from day 1 on, caused by transmission within the run.
    pub secondary_cases: f64,
    pub recoveries: f64,
    pub deaths: f64,
    pub removals: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub day: usize,
    pub active: f64,
}

/// Every model computed during a run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Comparison {
    pub fixed: CompartmentHistory,
    pub gaussian: CompartmentHistory,
    pub exponential: Series,
    pub logistic: Series,
}

impl Comparison {
    pub fn get(&self, kernel: OutflowKernel) -> &CompartmentHistory {
        match kernel {
            OutflowKernel::Fixed => &self.fixed,
            OutflowKernel::Gaussian => &self.gaussian,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimulationResult {
    pub kernel: OutflowKernel,
    pub population: f64,
    pub initial_infections: f64,
    pub pre_immune: f64,

    /// Basic reproduction number of the free expansion phase.
    pub r0: f64,

    pub active: Series,
    pub new_cases: Series,
    pub removed: Series,
    pub recoveries: Series,
    pub deaths: Series,
    pub available: Series,
    pub exposed: Series,
    pub rt: Series,

    pub cumulative_cases: Series,
    pub cumulative_recoveries: Series,
    pub cumulative_deaths: Series,

    /// Pre-immune population plus cumulative recoveries.
    pub immune: Series,

    pub totals: Totals,
    pub peak: Peak,
    pub comparison: Comparison,
}

impl SimulationResult {
    pub fn new(settings: &Settings, comparison: Comparison) -> Self {
        let parameters = &settings.parameters;
        let kernel = settings.preferred_kernel();
        let preferred = comparison.get(kernel).clone();
        let death_rate = parameters.death_rate;

        let recoveries = preferred.outflow.scaled(1. - death_rate);
        let deaths = preferred.outflow.scaled(death_rate);
        let cumulative_cases = preferred.new_cases.cumulative();
        let cumulative_recoveries = recoveries.cumulative();
        let cumulative_deaths = deaths.cumulative();
        let immune = cumulative_recoveries.offset(parameters.pre_immune);

        let transmissions = preferred.new_cases.total();
        let totals = Totals {
            transmissions,
            infections: transmissions + parameters.initial_infections,
            secondary_cases: preferred.new_cases.iter().skip(1).sum(),
            recoveries: recoveries.total(),
            deaths: deaths.total(),
            removals: preferred.outflow.total(),
        };

        let (day, active) = preferred
            .active
            .argmax()
            .unwrap_or((0, parameters.initial_infections));

        Self {
            kernel,
            population: parameters.population,
            initial_infections: parameters.initial_infections,
            pre_immune: parameters.pre_immune,
            r0: settings
                .schedule
                .free
                .reproduction_number(parameters.infectious_period),
            active: preferred.active,
            new_cases: preferred.new_cases,
            removed: preferred.outflow,
            recoveries,
            deaths,
            available: preferred.available,
            exposed: preferred.exposed,
            rt: preferred.rt,
            cumulative_cases,
            cumulative_recoveries,
            cumulative_deaths,
            immune,
            totals,
            peak: Peak { day, active },
            comparison,
        }
    }

    /// Number of days in the dataset, including day 0.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Sum of all compartments on each day. Stays at the population size up to rounding unless
    /// the susceptible pool was clamped at zero.
    pub fn population_balance(&self) -> Series {
        self.available
            .add(&self.exposed)
            .add(&self.active)
            .add(&self.removed.cumulative())
            .offset(self.pre_immune)
    }

    /// Largest absolute deviation of the population balance from the population size.
    pub fn population_drift(&self) -> f64 {
        self.population_balance()
            .iter()
            .map(|balance| (balance - self.population).abs())
            .fold(0., f64::max)
    }
}
