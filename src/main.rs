use clap::Parser;

use viraly::args::Args;
use viraly::runner::Runner;

fn main() {
    let args = Args::parse();

    let mut runner = Runner::new(args).unwrap_or_else(|err| {
        eprintln!("Unable to set up simulation: {err:#}");
        std::process::exit(1);
    });

    if let Err(err) = runner.start() {
        eprintln!("Simulation failed: {err:#}");
        std::process::exit(1);
    }
}
