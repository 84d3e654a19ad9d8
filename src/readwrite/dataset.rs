//! Daily table of a simulation result in CSV format.

use itertools::Itertools;
use std::io;

use crate::core::Series;
use crate::dataset::SimulationResult;
use crate::errors::Result;
use crate::stats::EpidemicIndicators;

/// Columns of the daily table in output order, without the leading `day` column.
fn columns(
    result: &SimulationResult,
    all_models: bool,
    incidence_period: usize,
) -> Vec<(String, Series)> {
    let mut columns = vec![
        ("active".to_string(), result.active.clone()),
        ("new_cases".to_string(), result.new_cases.clone()),
        ("removed".to_string(), result.removed.clone()),
        ("recoveries".to_string(), result.recoveries.clone()),
        ("deaths".to_string(), result.deaths.clone()),
        ("available".to_string(), result.available.clone()),
        ("exposed".to_string(), result.exposed.clone()),
        ("cumulative_cases".to_string(), result.cumulative_cases.clone()),
        (
            "cumulative_recoveries".to_string(),
            result.cumulative_recoveries.clone(),
        ),
        ("cumulative_deaths".to_string(), result.cumulative_deaths.clone()),
        ("immune".to_string(), result.immune.clone()),
        ("rt".to_string(), result.rt.clone()),
        (
            format!("incidence_{incidence_period}"),
            result.incidence(incidence_period),
        ),
        ("prevalence".to_string(), result.prevalence()),
        ("immunity_share".to_string(), result.immunity_share()),
        ("recovered_share".to_string(), result.recovered_share()),
    ];

    if all_models {
        let comparison = &result.comparison;
        columns.extend([
            ("fixed_active".to_string(), comparison.fixed.active.clone()),
            ("fixed_removed".to_string(), comparison.fixed.outflow.clone()),
            ("gaussian_active".to_string(), comparison.gaussian.active.clone()),
            (
                "gaussian_removed".to_string(),
                comparison.gaussian.outflow.clone(),
            ),
            ("exponential".to_string(), comparison.exponential.clone()),
            ("logistic".to_string(), comparison.logistic.clone()),
        ]);
    }

    columns
}

/// Write one row per day, including day 0, to `writer`.
///
/// With `all_models` the histories of both reference models and both baselines are appended.
pub fn write_dataset<W: io::Write>(
    result: &SimulationResult,
    writer: W,
    delimiter: u8,
    all_models: bool,
    incidence_period: usize,
) -> Result<()> {
    let columns = columns(result, all_models, incidence_period);
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let header = std::iter::once("day")
        .chain(columns.iter().map(|(name, _)| name.as_str()))
        .collect_vec();
    csv_writer.write_record(&header)?;

    for day in 0..result.len() {
        let record = std::iter::once(day.to_string())
            .chain(columns.iter().map(|(_, series)| series[day].to_string()))
            .collect_vec();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the daily table to the file at `path`.
pub fn write_dataset_to_file(
    result: &SimulationResult,
    path: &str,
    delimiter: u8,
    all_models: bool,
    incidence_period: usize,
) -> Result<()> {
    log::info!("Writing dataset to {path}");
    let file = std::fs::File::create(path)?;
    write_dataset(
        result,
        io::BufWriter::new(file),
        delimiter,
        all_models,
        incidence_period,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Parameters, Phase, Schedule, Settings};
    use crate::simulation::run_simulation;

    fn result() -> SimulationResult {
        let parameters = Parameters {
            infectious_period: 5,
            infectious_period_stdev: 0.,
            incubation_period: 1,
            population: 1000.,
            initial_infections: 10.,
            pre_immune: 0.,
            death_rate: 0.,
            days: 10,
        };
        let schedule = Schedule::constant(Phase::new(0., 0.));
        run_simulation(&Settings::new(parameters, schedule)).unwrap()
    }

    fn render(all_models: bool, delimiter: u8) -> String {
        let mut buffer = Vec::new();
        write_dataset(&result(), &mut buffer, delimiter, all_models, 7).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn header_and_rows() {
        let output = render(false, b',');
        let lines = output.lines().collect_vec();
        assert_eq!(lines.len(), 12);
        assert_eq!(
            lines[0],
            "day,active,new_cases,removed,recoveries,deaths,available,exposed,\
             cumulative_cases,cumulative_recoveries,cumulative_deaths,immune,rt,\
             incidence_7,prevalence,immunity_share,recovered_share"
        );
        assert_eq!(lines[1], "0,10,10,0,0,0,990,0,10,0,0,0,0,0,1,0,0");
        assert_eq!(lines[6], "5,0,0,10,10,0,990,0,10,10,0,10,0,0,0,1,1");
    }

    #[test]
    fn all_models_append_columns() {
        let output = render(true, b',');
        let header = output.lines().next().unwrap();
        assert!(header.ends_with(
            "fixed_active,fixed_removed,gaussian_active,gaussian_removed,exponential,logistic"
        ));
        let fields = output.lines().nth(1).unwrap().split(',').count();
        assert_eq!(fields, header.split(',').count());
    }

    #[test]
    fn custom_delimiter() {
        let output = render(false, b'\t');
        assert!(output.starts_with("day\tactive\tnew_cases\t"));
    }

    #[test]
    fn write_to_file() {
        let path = std::env::temp_dir().join("viraly_dataset_test.csv");
        let path = path.to_str().unwrap();
        write_dataset_to_file(&result(), path, b',', false, 14).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 12);
        std::fs::remove_file(path).unwrap();
    }
}
