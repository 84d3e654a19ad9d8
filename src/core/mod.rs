//! This module contains the core datatypes and recurrences of the library.

mod baseline;
mod compartment;
mod incubation;
mod outflow;
mod series;

pub use baseline::Baseline;
pub use compartment::{Compartment, CompartmentHistory, Transmission, transmission_step};
pub use incubation::IncubationQueue;
pub use outflow::{OutflowKernel, fixed_outflow, gaussian_outflow, interval_mass, normal_cdf};
pub use series::Series;
