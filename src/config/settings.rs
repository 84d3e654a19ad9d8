//! Settings module.

use super::parameters::Parameters;
use super::schedule::{Phase, Release, Schedule, Transition};
use crate::core::OutflowKernel;
use crate::errors::{Result, ViralyError};

use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

/// Complete and immutable description of one simulation run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub parameters: Parameters,
    pub schedule: Schedule,

    /// Kernel whose results are reported. Derived from the infectious period spread if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<OutflowKernel>,

    /// Window in days of the incidence indicator.
    #[serde(default = "default_incidence_period")]
    pub incidence_period: usize,
}

fn default_incidence_period() -> usize {
    14
}

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
    ParseError(String),
}

impl std::error::Error for SettingsError {}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(formatter, "IO error: {}", error),
            SettingsError::YamlError(error) => write!(formatter, "YAML error: {}", error),
            SettingsError::ParseError(message) => write!(formatter, "Parse error: {}", message),
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        let yaml = String::from_utf8(output).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", yaml)
    }
}

impl Settings {
    pub fn new(parameters: Parameters, schedule: Schedule) -> Self {
        Self {
            parameters,
            schedule,
            kernel: None,
            incidence_period: default_incidence_period(),
        }
    }

    /// Kernel that provides the reported series.
    pub fn preferred_kernel(&self) -> OutflowKernel {
        self.kernel.unwrap_or_else(|| {
            OutflowKernel::from_spread(self.parameters.infectious_period_stdev)
        })
    }

    /// Check all invariants a simulation relies on.
    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;

        for phase in self.schedule.phases() {
            if !(phase.contact_rate.is_finite() && phase.contact_rate >= 0.) {
                return Err(ViralyError::ConfigurationError(format!(
                    "contact rate must not be negative, got {}",
                    phase.contact_rate
                )));
            }
            if !(0. ..=1.).contains(&phase.transmission_probability) {
                return Err(ViralyError::ConfigurationError(format!(
                    "transmission probability must be between 0 and 1, got {}",
                    phase.transmission_probability
                )));
            }
        }

        let days = self.parameters.days;
        let contention = &self.schedule.contention_transition;
        if contention.start > days {
            return Err(ViralyError::ConfigurationError(format!(
                "tint must not exceed {days}, got {}",
                contention.start
            )));
        }

        if let Some(release) = &self.schedule.release {
            if release.transition.start > days {
                return Err(ViralyError::ConfigurationError(format!(
                    "tint2 must not exceed {days}, got {}",
                    release.transition.start
                )));
            }
            if release.transition.start < contention.start + contention.duration {
                return Err(ViralyError::ConfigurationError(format!(
                    "tint2 must be at least {} + {}, got {}",
                    contention.start, contention.duration, release.transition.start
                )));
            }
        }

        if self.incidence_period == 0 {
            return Err(ViralyError::ConfigurationError(
                "incidence period must be at least one day".to_string(),
            ));
        }

        Ok(())
    }

    pub fn write(&self, writer: &mut dyn std::io::Write) -> std::result::Result<(), SettingsError> {
        serde_yaml::to_writer(writer, self).map_err(SettingsError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> std::result::Result<Settings, SettingsError> {
        serde_yaml::from_reader(reader).map_err(SettingsError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> std::result::Result<(), SettingsError> {
        let file = fs::File::create(filename).map_err(SettingsError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> std::result::Result<Settings, SettingsError> {
        let file = fs::File::open(filename).map_err(SettingsError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }
}

/// Parse the compact command line form
/// `h,p,T,L,I,h2,p2,tint,tmax,M,N0,DR[,progressive,ttime[,h3,p3,tint2,ttime2[,auto[,I0]]]]`.
///
/// The release block is only read when all four of its fields are present, and `tint2 = 0`
/// disables it. Up to 18 fields the fixed kernel is reported; a 19th field, whatever its value,
/// selects the kernel from `L`. The 20th field is the pre-immune population.
impl FromStr for Settings {
    type Err = SettingsError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let fields: Vec<&str> = input.split(',').map(str::trim).collect();
        if fields.len() < 12 {
            return Err(SettingsError::ParseError(format!(
                "expected at least 12 comma separated values, got {}",
                fields.len()
            )));
        }

        let free = Phase::new(parse_field(&fields, 0, "h")?, parse_field(&fields, 1, "p")?);
        let contention = Phase::new(parse_field(&fields, 5, "h2")?, parse_field(&fields, 6, "p2")?);

        let progressive = match fields.get(12) {
            Some(field) => parse_bool(field)?,
            None => false,
        };
        let duration = match fields.get(13) {
            Some(_) => parse_field(&fields, 13, "ttime")?,
            None => 0,
        };

        let release = if fields.len() > 17 {
            let phase = Phase::new(
                parse_field(&fields, 14, "h3")?,
                parse_field(&fields, 15, "p3")?,
            );
            let start: usize = parse_field(&fields, 16, "tint2")?;
            let duration: usize = parse_field(&fields, 17, "ttime2")?;
            match start {
                0 => None,
                _ => Some(Release {
                    phase,
                    transition: Transition::new(start, duration),
                }),
            }
        } else {
            None
        };

        let kernel = match fields.len() > 18 {
            true => None,
            false => Some(OutflowKernel::Fixed),
        };

        let pre_immune = match fields.get(19) {
            Some(_) => parse_field(&fields, 19, "I0")?,
            None => 0.,
        };

        let parameters = Parameters {
            infectious_period: parse_field(&fields, 2, "T")?,
            infectious_period_stdev: parse_field(&fields, 3, "L")?,
            incubation_period: parse_field(&fields, 4, "I")?,
            population: parse_field(&fields, 9, "M")?,
            initial_infections: parse_field(&fields, 10, "N0")?,
            pre_immune,
            death_rate: parse_field(&fields, 11, "DR")?,
            days: parse_field(&fields, 8, "tmax")?,
        };

        let schedule = Schedule {
            free,
            contention,
            contention_transition: Transition::new(parse_field(&fields, 7, "tint")?, duration),
            release,
            progressive,
        };

        Ok(Settings {
            parameters,
            schedule,
            kernel,
            incidence_period: default_incidence_period(),
        })
    }
}

fn parse_field<T: FromStr>(
    fields: &[&str],
    index: usize,
    name: &str,
) -> std::result::Result<T, SettingsError> {
    let field = fields
        .get(index)
        .ok_or_else(|| SettingsError::ParseError(format!("missing value for {name}")))?;
    field
        .parse()
        .map_err(|_| SettingsError::ParseError(format!("invalid value for {name}: `{field}`")))
}

fn parse_bool(field: &str) -> std::result::Result<bool, SettingsError> {
    match field.to_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        _ => Err(SettingsError::ParseError(format!(
            "invalid truth value `{field}`"
        ))),
    }
}
