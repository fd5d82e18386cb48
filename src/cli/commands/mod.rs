//! CLI command implementations

pub mod completions;
pub mod config;
pub mod econ;
pub mod init;
pub mod models;
pub mod stats;
pub mod sweep;
