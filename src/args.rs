use clap::{ArgGroup, Parser, ValueEnum};

/// Outflow kernel selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KernelChoice {
    Fixed,
    Gaussian,
}

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = None,
    name = "viraly",
    group(ArgGroup::new("input").required(true).args(["parameters", "settings"])),
)]
pub struct Args {
    /// Compact parameter list
    /// `h,p,T,L,I,h2,p2,tint,tmax,M,N0,DR[,progressive,ttime[,h3,p3,tint2,ttime2[,auto[,I0]]]]`.
    pub parameters: Option<String>,

    /// Path to settings (yaml file).
    #[clap(long)]
    pub settings: Option<String>,

    /// Path to output (csv file). Written to stdout if omitted.
    #[clap(long, short)]
    pub output: Option<String>,

    /// Field delimiter of the output table.
    #[clap(long, default_value_t = ',')]
    pub delimiter: char,

    /// Path to summary of key figures (yaml file).
    #[clap(long)]
    pub summary: Option<String>,

    /// Store the resolved settings (yaml file).
    #[clap(long)]
    pub save_settings: Option<String>,

    /// Append the histories of every model to the output table.
    #[clap(long, default_value_t = false)]
    pub all_models: bool,

    /// Outflow kernel of the reported series. Derived from the settings if omitted.
    #[clap(long, value_enum)]
    pub kernel: Option<KernelChoice>,

    /// Window in days of the incidence indicator.
    #[clap(long)]
    pub incidence_period: Option<usize>,

    /// Path to log file. Logs to stderr if omitted.
    #[clap(long)]
    pub log_file: Option<String>,

    /// Verbosity level.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bar.
    #[clap(long, default_value_t = false)]
    pub disable_progress_bar: bool,
}
