//! Core module - yield models, geometry, economics and the derivation pipeline

pub mod config;
pub mod economics;
pub mod error;
pub mod geometry;
pub mod params;
pub mod pipeline;
pub mod redundancy;
pub mod yield_model;

pub use config::{Config, ConfigError, ConfigSource};
pub use error::{Error, Result};
pub use params::{EconomicsInputs, EconomicsSettings, ProcessParameters, ProcessSettings};
pub use pipeline::{
    derive_economics, derive_stats, sweep_cost_curve, CostCurvePoint, DerivedStats,
    EconomicsResult, SweepAxis, SweepSpec,
};
pub use yield_model::YieldModel;
