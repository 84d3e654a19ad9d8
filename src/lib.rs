pub mod args;
pub mod config;
pub mod core;
pub mod dataset;
pub mod errors;
pub mod readwrite;
pub mod runner;
pub mod simulation;
pub mod stats;
