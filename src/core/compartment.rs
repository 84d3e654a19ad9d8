//! Compartment recurrence
//!
//! A `Compartment` tracks one reference epidemic model: the active cases, the susceptible
//! population still available for infection and the exposed cases in the incubation pipeline.
//! Each day the active cases infect a share of the available population, corrected by the
//! fraction of the population that is still susceptible. The exposed cohort enters the
//! incubation queue, the cohort leaving the queue becomes active, and the outflow kernel
//! removes earlier cohorts.

use serde::{Deserialize, Serialize};

use super::incubation::IncubationQueue;
use super::outflow::OutflowKernel;
use super::series::Series;
use crate::config::{Parameters, Phase};

/// Result of the transmission computation of a single day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transmission {
    /// Newly exposed cases, before incubation.
    pub exposed: f64,

    /// Cases leaving the infectious compartment.
    pub outflow: f64,

    /// Effective reproduction number estimate.
    pub rt: f64,
}

/// Compute exposures, outflow and `Rt` of `day` from the state of the previous day.
///
/// The finite population correction is the susceptible share of the population,
/// `1 - (M - available) / M`, and never drops below zero.
pub fn transmission_step(
    day: usize,
    active: f64,
    phase: &Phase,
    available: f64,
    parameters: &Parameters,
    history: &[f64],
    kernel: OutflowKernel,
) -> Transmission {
    let population = parameters.population;
    let correction = (1. - (population - available) / population).max(0.);
    let exposed = active * phase.beta() * correction;
    let outflow = kernel.outflow(
        day,
        history,
        parameters.infectious_period,
        parameters.infectious_period_stdev,
    );
    let rt = phase.reproduction_number(parameters.infectious_period) * correction;

    Transmission {
        exposed,
        outflow,
        rt,
    }
}

/// Daily history of a compartment, starting with the initial condition on day 0.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CompartmentHistory {
    pub kernel: OutflowKernel,
    pub active: Series,

    /// Cases that became infectious on each day.
    pub new_cases: Series,

    /// Cases that left the infectious compartment on each day.
    pub outflow: Series,
    pub available: Series,

    /// Cases in the incubation pipeline at the end of each day.
    pub exposed: Series,
    pub rt: Series,
}

impl CompartmentHistory {
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Compartment {
    kernel: OutflowKernel,
    incubator: IncubationQueue,
    active: f64,
    available: f64,
    history: CompartmentHistory,
}

impl Compartment {
    pub fn new(kernel: OutflowKernel, parameters: &Parameters, phase: &Phase) -> Self {
        let days = parameters.days;
        let active = parameters.initial_infections;
        let available = parameters.initial_available();
        let history = CompartmentHistory {
            kernel,
            active: Series::with_capacity(active, days),
            new_cases: Series::with_capacity(active, days),
            outflow: Series::with_capacity(0., days),
            available: Series::with_capacity(available, days),
            exposed: Series::with_capacity(0., days),
            rt: Series::with_capacity(phase.reproduction_number(parameters.infectious_period), days),
        };

        Self {
            kernel,
            incubator: IncubationQueue::new(parameters.incubation_period),
            active,
            available,
            history,
        }
    }

    /// Advance the compartment to `day` using the transmission parameters of `phase`.
    pub fn advance(&mut self, day: usize, phase: &Phase, parameters: &Parameters) -> Transmission {
        let transmission = transmission_step(
            day,
            self.active,
            phase,
            self.available,
            parameters,
            &self.history.new_cases,
            self.kernel,
        );

        let infectious = self.incubator.advance(transmission.exposed);

        // clamp floating point drift below zero
        self.active = (self.active + infectious - transmission.outflow).max(0.);
        // exposed individuals are no longer available, even while incubating
        self.available = (self.available - transmission.exposed).max(0.);

        self.history.active.push(self.active);
        self.history.new_cases.push(infectious);
        self.history.outflow.push(transmission.outflow);
        self.history.available.push(self.available);
        self.history.exposed.push(self.incubator.pending());
        self.history.rt.push(transmission.rt);

        transmission
    }

    pub fn get_active(&self) -> f64 {
        self.active
    }

    pub fn get_available(&self) -> f64 {
        self.available
    }

    pub fn get_history(&self) -> &CompartmentHistory {
        &self.history
    }

    pub fn into_history(self) -> CompartmentHistory {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(incubation_period: usize) -> Parameters {
        Parameters {
            infectious_period: 5,
            infectious_period_stdev: 0.,
            incubation_period,
            population: 1000.,
            initial_infections: 10.,
            pre_immune: 0.,
            death_rate: 0.,
            days: 40,
        }
    }

    #[test]
    fn correction_uses_available_population() {
        let parameters = parameters(1);
        let phase = Phase::new(2., 0.25);
        let history = vec![10.];
        let transmission = transmission_step(
            1,
            10.,
            &phase,
            500.,
            &parameters,
            &history,
            OutflowKernel::Fixed,
        );
        assert_eq!(transmission.exposed, 2.5);
        assert_eq!(transmission.outflow, 0.);
        assert_eq!(transmission.rt, 1.25);
    }

    #[test]
    fn correction_is_never_negative() {
        let parameters = parameters(1);
        let phase = Phase::new(2., 0.25);
        let transmission = transmission_step(
            1,
            10.,
            &phase,
            -5.,
            &parameters,
            &[10.],
            OutflowKernel::Fixed,
        );
        assert_eq!(transmission.exposed, 0.);
        assert_eq!(transmission.rt, 0.);
    }

    #[test]
    fn initial_condition() {
        let parameters = parameters(1);
        let compartment = Compartment::new(OutflowKernel::Fixed, &parameters, &Phase::new(1., 0.2));
        let history = compartment.get_history();
        assert_eq!(*history.active, vec![10.]);
        assert_eq!(*history.new_cases, vec![10.]);
        assert_eq!(*history.outflow, vec![0.]);
        assert_eq!(*history.available, vec![990.]);
        assert_eq!(*history.exposed, vec![0.]);
        assert_eq!(*history.rt, vec![1.]);
    }

    #[test]
    fn single_day_incubation_is_immediate() {
        let parameters = parameters(1);
        let phase = Phase::new(1., 0.2);
        let mut compartment = Compartment::new(OutflowKernel::Fixed, &parameters, &phase);

        // reference recurrence without any incubation queue
        let mut active: f64 = 10.;
        let mut available: f64 = 990.;
        let mut new_cases = vec![10.];
        for day in 1..=parameters.days {
            let transmission = compartment.advance(day, &phase, &parameters);
            let expected = transmission_step(
                day,
                active,
                &phase,
                available,
                &parameters,
                &new_cases,
                OutflowKernel::Fixed,
            );
            assert_eq!(transmission, expected);
            active = (active + expected.exposed - expected.outflow).max(0.);
            available = (available - expected.exposed).max(0.);
            new_cases.push(expected.exposed);
            assert_eq!(compartment.get_active(), active);
            assert_eq!(compartment.get_available(), available);
        }
        assert_eq!(*compartment.get_history().new_cases, new_cases);
    }

    #[test]
    fn incubation_delays_new_cases() {
        let parameters = parameters(3);
        let phase = Phase::new(1., 0.2);
        let mut compartment = Compartment::new(OutflowKernel::Fixed, &parameters, &phase);

        let first = compartment.advance(1, &phase, &parameters);
        let second = compartment.advance(2, &phase, &parameters);
        compartment.advance(3, &phase, &parameters);

        let history = compartment.get_history();
        assert_eq!(history.new_cases[1], 0.);
        assert_eq!(history.new_cases[2], 0.);
        assert_eq!(history.new_cases[3], first.exposed);
        // the susceptible pool shrinks while the active cases stay constant
        assert!(second.exposed < first.exposed);
        assert_eq!(history.active[2], 10.);
        assert_eq!(history.exposed[2], first.exposed + second.exposed);
        // exposures leave the susceptible pool right away
        assert_eq!(history.available[1], 990. - first.exposed);
    }

    #[test]
    fn fixed_kernel_removes_initial_cases() {
        let parameters = parameters(1);
        let phase = Phase::new(0., 0.);
        let mut compartment = Compartment::new(OutflowKernel::Fixed, &parameters, &phase);
        for day in 1..=10 {
            compartment.advance(day, &phase, &parameters);
        }
        let history = compartment.get_history();
        assert_eq!(history.active[4], 10.);
        assert_eq!(history.outflow[5], 10.);
        assert_eq!(history.active[5], 0.);
        assert_eq!(history.len(), 11);
    }
}
