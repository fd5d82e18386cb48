//! Shared helper functions for CLI commands
//!
//! Config loading and number formatting used across command modules.

use miette::{IntoDiagnostic, Result};

use crate::cli::{EconomicsArgs, GlobalOpts, ProcessArgs};
use crate::core::{Config, ConfigSource, EconomicsInputs, ProcessParameters};

/// Load the active config for this invocation
pub fn load_config(global: &GlobalOpts) -> Result<(Config, ConfigSource)> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    Ok(Config::load(global.config.as_deref(), &cwd)?)
}

/// Config defaults overlaid with command line flags, validated
pub fn resolve_process(config: &Config, args: &ProcessArgs) -> Result<ProcessParameters> {
    Ok(args.apply(config.process).build()?)
}

pub fn resolve_economics(config: &Config, args: &EconomicsArgs) -> Result<EconomicsInputs> {
    Ok(args.apply(config.economics).build()?)
}

/// Format a fraction as a percentage with `decimals` places
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Format a currency amount; infinite amounts have no meaningful value
pub fn format_currency(amount: f64) -> String {
    if amount.is_finite() {
        format!("${:.2}", amount)
    } else {
        "N/A".to_string()
    }
}

/// Format a value, rounding to a sensible number of decimals for its size
pub fn smart_round(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let magnitude = value.abs();
    let decimals = if magnitude >= 100.0 {
        1
    } else if magnitude >= 1.0 {
        2
    } else {
        4
    };
    format!("{:.*}", decimals, value)
}
