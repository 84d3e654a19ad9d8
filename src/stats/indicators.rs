use crate::core::Series;
use crate::dataset::SimulationResult;

/// Trait extension to compute public health indicators of a simulation result.
///
/// All indicators are daily series aligned with the dataset, starting on day 0.
pub trait EpidemicIndicators {
    /// New cases in the `period` days ending on each day, per 100 000 inhabitants.
    fn incidence(&self, period: usize) -> Series;

    /// Active cases in percent of the population.
    fn prevalence(&self) -> Series;

    /// Pre-immune and recovered individuals in percent of the population.
    fn immunity_share(&self) -> Series;

    /// Recovered individuals in percent of the population.
    fn recovered_share(&self) -> Series;

    /// Cases caused by transmission within the run in percent of the population.
    fn attack_rate(&self) -> f64;
}

impl EpidemicIndicators for SimulationResult {
    fn incidence(&self, period: usize) -> Series {
        let scale = 100_000. / self.population;
        (0..self.len())
            .map(|day| {
                // no complete window before `period` days have passed
                if day < period {
                    return 0.;
                }
                self.new_cases[day + 1 - period..=day].iter().sum::<f64>() * scale
            })
            .collect()
    }

    fn prevalence(&self) -> Series {
        self.active.scaled(100. / self.population)
    }

    fn immunity_share(&self) -> Series {
        self.immune.scaled(100. / self.population)
    }

    fn recovered_share(&self) -> Series {
        self.cumulative_recoveries.scaled(100. / self.population)
    }

    fn attack_rate(&self) -> f64 {
        self.totals.secondary_cases / self.population * 100.
    }
}

/// Share of the population in percent that has to be immune to stop growth at `r0`.
pub fn herd_immunity_threshold(r0: f64) -> f64 {
    if r0 <= 0. {
        return 0.;
    }
    ((1. - 1. / r0) * 100.).max(0.)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Parameters, Phase, Schedule, Settings};
    use crate::simulation::run_simulation;

    fn result() -> SimulationResult {
        let parameters = Parameters {
            infectious_period: 10,
            infectious_period_stdev: 0.,
            incubation_period: 1,
            population: 100_000.,
            initial_infections: 10.,
            pre_immune: 1000.,
            death_rate: 0.1,
            days: 40,
        };
        let schedule = Schedule::step(Phase::new(2., 0.1), Phase::new(1., 0.05), 20);
        run_simulation(&Settings::new(parameters, schedule)).unwrap()
    }

    #[test]
    fn incidence_sums_trailing_window() {
        let result = result();
        let incidence = result.incidence(7);
        assert_eq!(incidence.len(), result.len());
        for day in 0..7 {
            assert_eq!(incidence[day], 0.);
        }
        let window: f64 = (4..=10).map(|day| result.new_cases[day]).sum();
        assert!((incidence[10] - window).abs() < 1e-9);

        // the initial infections are not part of any window
        let first: f64 = (1..=7).map(|day| result.new_cases[day]).sum();
        assert!((incidence[7] - first).abs() < 1e-9);
    }

    #[test]
    fn shares_of_population() {
        let result = result();
        let prevalence = result.prevalence();
        assert!((prevalence[0] - 0.01).abs() < 1e-12);
        assert!((result.immunity_share()[0] - 1.).abs() < 1e-12);
        assert_eq!(result.recovered_share()[0], 0.);

        let last = result.len() - 1;
        let expected = result.cumulative_recoveries[last] / 1000.;
        assert!((result.recovered_share()[last] - expected).abs() < 1e-9);
        assert!(result.immunity_share()[last] > result.recovered_share()[last]);
    }

    #[test]
    fn attack_rate_excludes_initial_infections() {
        let result = result();
        let expected = result.totals.secondary_cases / 1000.;
        assert!((result.attack_rate() - expected).abs() < 1e-12);
        assert!(result.attack_rate() > 0.);
    }

    #[test]
    fn herd_immunity() {
        assert_eq!(herd_immunity_threshold(0.), 0.);
        assert_eq!(herd_immunity_threshold(-1.), 0.);
        assert_eq!(herd_immunity_threshold(0.5), 0.);
        assert_eq!(herd_immunity_threshold(1.), 0.);
        assert!((herd_immunity_threshold(2.) - 50.).abs() < 1e-12);
        assert!((herd_immunity_threshold(4.) - 75.).abs() < 1e-12);
    }
}
