//! Configuration data structures for simulation setups.

mod parameters;
mod schedule;
mod settings;

pub use parameters::Parameters;
pub use schedule::{Phase, Release, Schedule, Transition};
pub use settings::{Settings, SettingsError};
