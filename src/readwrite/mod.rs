//! Writers for simulation results.

mod dataset;
mod summary;

pub use dataset::{write_dataset, write_dataset_to_file};
pub use summary::Summary;
