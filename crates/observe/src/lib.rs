//! Initialization logic for logging and logging helper functions that are
//! shared between the binaries of this workspace.
pub mod config;
pub mod tracing;

pub use config::Config;
