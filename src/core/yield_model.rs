//! Closed-form defect-limited yield models
//!
//! All three models take the critical-area defect exposure
//! `λ = D0 · A · pattern_density` (A in cm²) and return the probability that a
//! die carries no fatal defect. The systematic yield cap (process maturity) is
//! applied on top as a multiplicative ceiling.

use serde::{Deserialize, Serialize};

use crate::core::error::{ensure, ensure_non_negative, ensure_unit_interval, Result};

/// mm² per cm²
pub const MM2_PER_CM2: f64 = 100.0;

/// Statistical yield model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum YieldModel {
    /// Independent, uniformly distributed defects
    #[default]
    #[serde(rename = "poisson")]
    Poisson,
    /// Murphy's triangular defect-density approximation
    #[serde(rename = "murphy")]
    Murphy,
    /// Clustered defects (gamma-mixed Poisson)
    #[serde(
        rename = "nb",
        alias = "negative-binomial",
        alias = "negative_binomial"
    )]
    NegativeBinomial,
}

impl YieldModel {
    /// Every model, in display order
    pub const ALL: [YieldModel; 3] = [
        YieldModel::Poisson,
        YieldModel::Murphy,
        YieldModel::NegativeBinomial,
    ];

    /// Short identifier used in config files and on the command line
    pub fn id(self) -> &'static str {
        match self {
            YieldModel::Poisson => "poisson",
            YieldModel::Murphy => "murphy",
            YieldModel::NegativeBinomial => "nb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            YieldModel::Poisson => "Poisson",
            YieldModel::Murphy => "Murphy",
            YieldModel::NegativeBinomial => "Neg. Binomial",
        }
    }

    /// One-line guidance on when the model applies
    pub fn description(self) -> &'static str {
        match self {
            YieldModel::Poisson => {
                "Assumes defects are distributed randomly. Best for low defect densities."
            }
            YieldModel::Murphy => {
                "Accounts for variable defect density using an approximate mathematical model."
            }
            YieldModel::NegativeBinomial => {
                "Handles defect clustering (alpha), common in modern fabs."
            }
        }
    }

    /// Only the negative binomial model reads the cluster factor
    pub fn uses_cluster_factor(self) -> bool {
        matches!(self, YieldModel::NegativeBinomial)
    }

    /// Defect-limited yield for an exposure `lambda`
    ///
    /// `lambda` must be non-negative and `alpha` positive; callers going
    /// through [`raw_yield`] get that checked. An infinite exposure returns
    /// 0.0, the limit of every model. `lambda == 0` returns
    /// exactly 1.0 for every model.
    pub fn raw_yield(self, lambda: f64, alpha: f64) -> f64 {
        if lambda == 0.0 {
            return 1.0;
        }
        if lambda.is_infinite() {
            return 0.0;
        }
        match self {
            YieldModel::Poisson => (-lambda).exp(),
            YieldModel::Murphy => {
                // (1 - e^-λ) / λ, via exp_m1 to keep precision for small λ
                let term = -(-lambda).exp_m1() / lambda;
                term * term
            }
            YieldModel::NegativeBinomial => (-alpha * (lambda / alpha).ln_1p()).exp(),
        }
    }
}

impl std::fmt::Display for YieldModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Critical-area defect exposure `λ = d0 · (A / 100) · pattern_density`
pub fn critical_area_exposure(
    defect_density_per_cm2: f64,
    die_area_mm2: f64,
    pattern_density: f64,
) -> Result<f64> {
    ensure_non_negative("defect_density_per_cm2", defect_density_per_cm2)?;
    ensure(
        die_area_mm2.is_finite() && die_area_mm2 > 0.0,
        "die_area_mm2",
        "a finite value > 0",
        die_area_mm2,
    )?;
    ensure_unit_interval("pattern_density", pattern_density)?;

    // inf · 0 would be NaN; a zero factor means no exposure at all
    if defect_density_per_cm2 == 0.0 || pattern_density == 0.0 {
        return Ok(0.0);
    }
    // May overflow to +inf for extreme but valid inputs
    Ok(defect_density_per_cm2 * (die_area_mm2 / MM2_PER_CM2) * pattern_density)
}

/// Raw (uncapped) yield for a model and its physical inputs
pub fn raw_yield(
    model: YieldModel,
    defect_density_per_cm2: f64,
    die_area_mm2: f64,
    cluster_factor: f64,
    pattern_density: f64,
) -> Result<f64> {
    ensure(
        cluster_factor.is_finite() && cluster_factor > 0.0,
        "cluster_factor",
        "a finite value > 0",
        cluster_factor,
    )?;
    let lambda = critical_area_exposure(defect_density_per_cm2, die_area_mm2, pattern_density)?;
    Ok(model.raw_yield(lambda, cluster_factor))
}

/// Apply the systematic (process maturity) ceiling to a raw yield
pub fn apply_systematic_cap(raw_yield: f64, process_maturity: f64) -> Result<f64> {
    ensure_unit_interval("raw_yield", raw_yield)?;
    ensure_unit_interval("process_maturity", process_maturity)?;
    Ok(raw_yield * process_maturity)
}

/// Capped yield: `raw_yield · process_maturity`
pub fn yield_rate(
    model: YieldModel,
    defect_density_per_cm2: f64,
    die_area_mm2: f64,
    cluster_factor: f64,
    pattern_density: f64,
    process_maturity: f64,
) -> Result<f64> {
    let raw = raw_yield(
        model,
        defect_density_per_cm2,
        die_area_mm2,
        cluster_factor,
        pattern_density,
    )?;
    apply_systematic_cap(raw, process_maturity)
}

/// Expected number of good dies; fractional on purpose
pub fn good_dies(total_dies: u64, yield_rate: f64) -> Result<f64> {
    ensure_unit_interval("yield_rate", yield_rate)?;
    Ok(total_dies as f64 * yield_rate)
}
