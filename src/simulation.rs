//! Simulation driver
//!
//! The driver owns every history of a run. It advances the two reference compartments (fixed
//! and Gaussian outflow) and the two baseline curves one day at a time and assembles the
//! `SimulationResult` once the horizon is reached.
//!
//! The parameters used on day `t` are the ones resolved by the schedule at the end of day
//! `t - 1`, so the first simulated day always uses the free expansion phase.

use crate::config::{Phase, Settings};
use crate::core::{Baseline, Compartment, OutflowKernel, Series};
use crate::dataset::{Comparison, SimulationResult};
use crate::errors::Result;

pub struct Simulation {
    settings: Settings,
    day: usize,
    phase: Phase,
    fixed: Compartment,
    gaussian: Compartment,
    exponential: Series,
    logistic: Series,
}

impl Simulation {
    /// Validate the settings and set up the initial condition of day 0.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let parameters = &settings.parameters;
        let phase = settings.schedule.free;
        let fixed = Compartment::new(OutflowKernel::Fixed, parameters, &phase);
        let gaussian = Compartment::new(OutflowKernel::Gaussian, parameters, &phase);
        let exponential = Series::with_capacity(parameters.initial_infections, parameters.days);
        let logistic = Series::with_capacity(parameters.initial_infections, parameters.days);

        log::info!(
            "Setting up simulation of {} days with population {}, R0={:.3}, preferred kernel {}",
            parameters.days,
            parameters.population,
            phase.reproduction_number(parameters.infectious_period),
            settings.preferred_kernel(),
        );

        Ok(Self {
            settings,
            day: 0,
            phase,
            fixed,
            gaussian,
            exponential,
            logistic,
        })
    }

    pub fn get_day(&self) -> usize {
        self.day
    }

    pub fn get_phase(&self) -> &Phase {
        &self.phase
    }

    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get_compartment(&self, kernel: OutflowKernel) -> &Compartment {
        match kernel {
            OutflowKernel::Fixed => &self.fixed,
            OutflowKernel::Gaussian => &self.gaussian,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.day >= self.settings.parameters.days
    }

    /// Simulate the next day. Does nothing once the horizon is reached.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }

        self.day += 1;
        let day = self.day;
        let parameters = &self.settings.parameters;
        let population = parameters.population;
        let beta = self.phase.beta();

        self.exponential
            .push(Baseline::Exponential.next(self.exponential.latest(), beta, population));
        self.logistic
            .push(Baseline::Logistic.next(self.logistic.latest(), beta, population));

        let fixed = self.fixed.advance(day, &self.phase, parameters);
        let gaussian = self.gaussian.advance(day, &self.phase, parameters);

        log::debug!(
            "day={day} beta={beta:.5} fixed=(active={:.3}, exposed={:.3}, outflow={:.3}) gaussian=(active={:.3}, exposed={:.3}, outflow={:.3})",
            self.fixed.get_active(),
            fixed.exposed,
            fixed.outflow,
            self.gaussian.get_active(),
            gaussian.exposed,
            gaussian.outflow,
        );

        // the schedule update only affects the following days
        self.phase = self.settings.schedule.effective_params(day);
    }

    /// Simulate all remaining days and assemble the result.
    pub fn run(mut self) -> SimulationResult {
        while !self.is_finished() {
            self.step();
        }
        self.finish()
    }

    /// Assemble the result from the days simulated so far.
    pub fn finish(self) -> SimulationResult {
        let comparison = Comparison {
            fixed: self.fixed.into_history(),
            gaussian: self.gaussian.into_history(),
            exponential: self.exponential,
            logistic: self.logistic,
        };
        let result = SimulationResult::new(&self.settings, comparison);

        log::info!(
            "Finished simulation after {} days: peak of {:.1} active cases on day {}, {:.1} infections, {:.1} recoveries, {:.1} deaths",
            self.day,
            result.peak.active,
            result.peak.day,
            result.totals.infections,
            result.totals.recoveries,
            result.totals.deaths,
        );

        let drift = result.population_drift();
        if drift > 1e-6 * result.population {
            log::warn!("Population balance drifted by {drift} during the simulation");
        }

        result
    }
}

/// Run a complete simulation for `settings`.
pub fn run_simulation(settings: &Settings) -> Result<SimulationResult> {
    Ok(Simulation::new(settings.clone())?.run())
}
