//! Key figures of a simulation result in YAML format.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::core::OutflowKernel;
use crate::dataset::{Peak, SimulationResult, Totals};
use crate::errors::Result;
use crate::stats::{herd_immunity_threshold, EpidemicIndicators};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub kernel: OutflowKernel,
    pub days: usize,
    pub r0: f64,

    /// Immune share in percent at which `r0` stops growth.
    pub herd_immunity_threshold: f64,

    /// Transmissions in percent of the population.
    pub attack_rate: f64,
    pub peak: Peak,
    pub totals: Totals,
    pub final_active: f64,
    pub final_immune: f64,
}

impl Summary {
    pub fn new(result: &SimulationResult) -> Self {
        Self {
            kernel: result.kernel,
            days: result.len().saturating_sub(1),
            r0: result.r0,
            herd_immunity_threshold: herd_immunity_threshold(result.r0),
            attack_rate: result.attack_rate(),
            peak: result.peak,
            totals: result.totals.clone(),
            final_active: result.active.latest(),
            final_immune: result.immune.latest(),
        }
    }

    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<()> {
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn write_to_file(&self, filename: &str) -> Result<()> {
        log::info!("Writing summary to {filename}");
        let mut file = fs::File::create(filename)?;
        self.write(&mut file)
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        let yaml = String::from_utf8(output).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", yaml)
    }
}
