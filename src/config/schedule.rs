//! Time-varying transmission parameters.
//!
//! A schedule consists of up to three phases: free expansion, contention and, optionally,
//! release. The change from one phase to the next starts on a configured day. In progressive
//! schedules the change is a linear ramp over the transition duration, otherwise it is an
//! instantaneous step on the start day.

use serde::{Deserialize, Serialize};

/// Contact rate `h` and transmission probability `p` in effect on a day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub contact_rate: f64,
    pub transmission_probability: f64,
}

impl Phase {
    pub fn new(contact_rate: f64, transmission_probability: f64) -> Self {
        Self {
            contact_rate,
            transmission_probability,
        }
    }

    /// Daily transmission rate `h * p`.
    pub fn beta(&self) -> f64 {
        self.contact_rate * self.transmission_probability
    }

    /// Basic reproduction number `h * p * T` for an infectious period `T`.
    pub fn reproduction_number(&self, infectious_period: usize) -> f64 {
        self.beta() * infectious_period as f64
    }

    /// Linear interpolation towards `target` after `elapsed` of `width` days.
    ///
    /// A transition without width yields the target immediately.
    pub fn interpolate(&self, target: &Phase, elapsed: usize, width: usize) -> Phase {
        if width == 0 {
            return *target;
        }
        let fraction = elapsed as f64 / width as f64;
        Phase {
            contact_rate: self.contact_rate + (target.contact_rate - self.contact_rate) * fraction,
            transmission_probability: self.transmission_probability
                + (target.transmission_probability - self.transmission_probability) * fraction,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// First day of the transition.
    pub start: usize,

    /// Length of the ramp in days. Only used by progressive schedules.
    #[serde(default)]
    pub duration: usize,
}

impl Transition {
    pub fn new(start: usize, duration: usize) -> Self {
        Self { start, duration }
    }
}

/// Third phase reached after the contention phase.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub phase: Phase,
    pub transition: Transition,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Schedule {
    pub free: Phase,
    pub contention: Phase,
    pub contention_transition: Transition,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,

    /// Ramp linearly through transitions instead of switching on their start day.
    #[serde(default)]
    pub progressive: bool,
}

impl Schedule {
    /// A single instantaneous change from the free phase to the contention phase.
    pub fn step(free: Phase, contention: Phase, start: usize) -> Self {
        Self {
            free,
            contention,
            contention_transition: Transition::new(start, 0),
            release: None,
            progressive: false,
        }
    }

    /// Phase that is constant for the whole simulation.
    pub fn constant(phase: Phase) -> Self {
        Self::step(phase, phase, 0)
    }

    fn width(&self, transition: &Transition) -> usize {
        match self.progressive {
            true => transition.duration,
            false => 0,
        }
    }

    /// Resolve the phase in effect on `day`.
    pub fn effective_params(&self, day: usize) -> Phase {
        let start = self.contention_transition.start;
        let width = self.width(&self.contention_transition);

        if day < start {
            return self.free;
        }

        if day < start + width {
            return self.free.interpolate(&self.contention, day - start, width);
        }

        match &self.release {
            None => self.contention,
            Some(release) => {
                let release_start = release.transition.start;
                let release_width = self.width(&release.transition);
                if day < release_start {
                    self.contention
                } else if day < release_start + release_width {
                    self.contention
                        .interpolate(&release.phase, day - release_start, release_width)
                } else {
                    release.phase
                }
            }
        }
    }

    /// All phases configured in the schedule, in order.
    pub fn phases(&self) -> Vec<&Phase> {
        let mut phases = vec![&self.free, &self.contention];
        if let Some(release) = &self.release {
            phases.push(&release.phase);
        }
        phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free() -> Phase {
        Phase::new(4., 0.1)
    }

    fn contention() -> Phase {
        Phase::new(2., 0.05)
    }

    fn released() -> Phase {
        Phase::new(3., 0.08)
    }

    fn assert_phase_eq(a: Phase, b: Phase) {
        assert!((a.contact_rate - b.contact_rate).abs() < 1e-12, "{a:?} != {b:?}");
        assert!(
            (a.transmission_probability - b.transmission_probability).abs() < 1e-12,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn instantaneous_step() {
        let schedule = Schedule::step(free(), contention(), 10);
        assert_phase_eq(schedule.effective_params(0), free());
        assert_phase_eq(schedule.effective_params(9), free());
        assert_phase_eq(schedule.effective_params(10), contention());
        assert_phase_eq(schedule.effective_params(100), contention());
    }

    #[test]
    fn duration_is_ignored_when_not_progressive() {
        let mut schedule = Schedule::step(free(), contention(), 10);
        schedule.contention_transition.duration = 5;
        assert_phase_eq(schedule.effective_params(10), contention());
        assert_phase_eq(schedule.effective_params(12), contention());
    }

    #[test]
    fn progressive_ramp() {
        let mut schedule = Schedule::step(free(), contention(), 10);
        schedule.progressive = true;
        schedule.contention_transition.duration = 4;

        assert_phase_eq(schedule.effective_params(9), free());
        assert_phase_eq(schedule.effective_params(10), free());
        assert_phase_eq(schedule.effective_params(12), Phase::new(3., 0.075));
        assert_phase_eq(schedule.effective_params(13), Phase::new(2.5, 0.0625));
        assert_phase_eq(schedule.effective_params(14), contention());
    }

    #[test]
    fn progressive_without_duration_is_a_step() {
        let mut schedule = Schedule::step(free(), contention(), 10);
        schedule.progressive = true;
        assert_phase_eq(schedule.effective_params(9), free());
        assert_phase_eq(schedule.effective_params(10), contention());
    }

    #[test]
    fn release_after_contention() {
        let schedule = Schedule {
            free: free(),
            contention: contention(),
            contention_transition: Transition::new(10, 4),
            release: Some(Release {
                phase: released(),
                transition: Transition::new(20, 10),
            }),
            progressive: true,
        };

        assert_phase_eq(schedule.effective_params(5), free());
        assert_phase_eq(schedule.effective_params(14), contention());
        assert_phase_eq(schedule.effective_params(19), contention());
        assert_phase_eq(schedule.effective_params(20), contention());
        assert_phase_eq(schedule.effective_params(25), Phase::new(2.5, 0.065));
        assert_phase_eq(schedule.effective_params(30), released());
        assert_phase_eq(schedule.effective_params(90), released());
    }

    #[test]
    fn release_step() {
        let schedule = Schedule {
            free: free(),
            contention: contention(),
            contention_transition: Transition::new(10, 0),
            release: Some(Release {
                phase: released(),
                transition: Transition::new(20, 0),
            }),
            progressive: false,
        };
        assert_phase_eq(schedule.effective_params(19), contention());
        assert_phase_eq(schedule.effective_params(20), released());
        assert_eq!(schedule.phases().len(), 3);
    }

    #[test]
    fn constant() {
        let schedule = Schedule::constant(free());
        for day in 0..50 {
            assert_phase_eq(schedule.effective_params(day), free());
        }
    }

    #[test]
    fn reproduction_number() {
        assert!((free().beta() - 0.4).abs() < 1e-12);
        assert!((free().reproduction_number(15) - 6.).abs() < 1e-12);
    }
}
