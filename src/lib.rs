//! Fabyield: semiconductor wafer yield and die-cost engine
//!
//! Computes gross dies per wafer, defect-limited yield (Poisson, Murphy,
//! negative binomial), repair-adjusted yield and cost per good die from an
//! immutable parameter set. The `fabyield` binary wraps the engine in a CLI.

pub mod cli;
pub mod core;
pub mod yaml;
