//! Error type for the yield engine
//!
//! Every failure the engine can report is an out-of-domain input. Arithmetic
//! edge cases (zero good dies, zero defect density) are ordinary results.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the computation core
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum Error {
    #[error("{field} must be {constraint}, got {value}")]
    #[diagnostic(
        code(fabyield::invalid_parameter),
        help("check the value passed on the command line or in the config file")
    )]
    InvalidParameter {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable domain the field must satisfy
        constraint: &'static str,
        /// The rejected value
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            Error::InvalidParameter { field, .. } => field,
        }
    }
}

/// Reject `value` unless `ok` holds (NaN always fails)
pub(crate) fn ensure(
    ok: bool,
    field: &'static str,
    constraint: &'static str,
    value: f64,
) -> Result<()> {
    if ok && !value.is_nan() {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            field,
            constraint,
            value,
        })
    }
}

/// `value` must be finite and `>= 0`
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    ensure(
        value.is_finite() && value >= 0.0,
        field,
        "a finite value >= 0",
        value,
    )
}

/// `value` must lie in the closed unit interval
pub(crate) fn ensure_unit_interval(field: &'static str, value: f64) -> Result<()> {
    ensure((0.0..=1.0).contains(&value), field, "in [0, 1]", value)
}
