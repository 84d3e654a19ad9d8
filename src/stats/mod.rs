//! Statistics and indicator trait implementations

pub mod indicators;

pub use indicators::herd_immunity_threshold;
pub use indicators::EpidemicIndicators;
