use anyhow::{anyhow, Result};

use indicatif::{ProgressBar, ProgressStyle};
use std::io;

use crate::args::{Args, KernelChoice};
use crate::config::Settings;
use crate::core::OutflowKernel;
use crate::dataset::SimulationResult;
use crate::readwrite::{write_dataset, write_dataset_to_file, Summary};
use crate::simulation::Simulation;

pub struct Runner {
    args: Args,
    settings: Settings,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args);

        let mut settings = Self::load_settings(&args)?;
        Self::apply_overrides(&args, &mut settings);
        settings.validate()?;

        if let Some(path) = &args.save_settings {
            log::info!("Storing settings to {path}");
            settings.write_to_file(path)?;
        }

        Ok(Self { args, settings })
    }

    pub fn start(&mut self) -> Result<()> {
        let result = self.run()?;
        self.finish(&result)
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        match &args.log_file {
            Some(log_file) => {
                simple_logging::log_to_file(log_file.as_str(), log_level).unwrap_or_else(|_| {
                    eprintln!("Unable to open log file.");
                    std::process::exit(1);
                })
            }
            None => simple_logging::log_to_stderr(log_level),
        }
    }

    /// Load settings from file or from the compact parameter list
    fn load_settings(args: &Args) -> Result<Settings> {
        let settings: Settings = match (&args.settings, &args.parameters) {
            (Some(path), _) => Settings::read_from_file(path)?,
            (None, Some(parameters)) => parameters.parse()?,
            (None, None) => return Err(anyhow!("Either parameters or settings are required.")),
        };
        log::info!("Loaded settings\n{}", settings);
        Ok(settings)
    }

    fn apply_overrides(args: &Args, settings: &mut Settings) {
        if let Some(kernel) = args.kernel {
            settings.kernel = Some(match kernel {
                KernelChoice::Fixed => OutflowKernel::Fixed,
                KernelChoice::Gaussian => OutflowKernel::Gaussian,
            });
        }
        if let Some(incidence_period) = args.incidence_period {
            settings.incidence_period = incidence_period;
        }
    }

    fn run(&mut self) -> Result<SimulationResult> {
        let days = self.settings.parameters.days;
        let bar = match self.args.disable_progress_bar {
            true => None,
            false => {
                let bar = ProgressBar::new(days as u64);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{bar:40}] {pos:>7}/{len:7} [{elapsed_precise} / {duration_precise}] {msg}",
                        )?
                        .progress_chars("=> "),
                );
                Some(bar)
            }
        };

        let mut simulation = Simulation::new(self.settings.clone())?;
        let kernel = simulation.get_settings().preferred_kernel();

        while !simulation.is_finished() {
            simulation.step();

            if let Some(bar) = bar.as_ref() {
                let active = simulation.get_compartment(kernel).get_active();
                bar.set_position(simulation.get_day() as u64);
                bar.set_message(format!("active={active:.0}"));
            }
        }

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }

        Ok(simulation.finish())
    }

    fn finish(&self, result: &SimulationResult) -> Result<()> {
        let delimiter = delimiter_byte(self.args.delimiter)?;
        let incidence_period = self.settings.incidence_period;

        match &self.args.output {
            Some(path) => write_dataset_to_file(
                result,
                path,
                delimiter,
                self.args.all_models,
                incidence_period,
            )?,
            None => write_dataset(
                result,
                io::stdout().lock(),
                delimiter,
                self.args.all_models,
                incidence_period,
            )?,
        }

        let summary = Summary::new(result);
        if let Some(path) = &self.args.summary {
            summary.write_to_file(path)?;
        }

        eprintln!(
            "Maximum value: {:.0} active cases on day {}",
            result.peak.active, result.peak.day
        );
        eprintln!(
            "Totals: {:.0} infections, {:.0} recoveries, {:.0} deaths",
            result.totals.infections, result.totals.recoveries, result.totals.deaths
        );
        eprintln!(
            "R0: {:.2}, herd immunity threshold: {:.1}%, attack rate: {:.2}%",
            summary.r0, summary.herd_immunity_threshold, summary.attack_rate
        );
        Ok(())
    }
}

/// CSV field delimiter, restricted to ASCII so the output stays valid UTF-8.
fn delimiter_byte(delimiter: char) -> Result<u8> {
    match delimiter.is_ascii() {
        true => Ok(delimiter as u8),
        false => Err(anyhow!("Delimiter must be an ASCII character, got `{delimiter}`.")),
    }
}
