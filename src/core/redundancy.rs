//! Redundancy / repair adjusted yield
//!
//! Defects landing only in repairable regions no longer kill the die, so
//! redundancy shrinks the critical area the yield model sees. The systematic
//! cap still applies afterwards, which keeps the effective yield in [0, 1].

use crate::core::error::{ensure, Result};
use crate::core::params::{ProcessParameters, MAX_REPAIRABLE_FRACTION};
use crate::core::yield_model;

/// Yield after on-die repair recovers defects in the repairable area
pub fn effective_yield(params: &ProcessParameters, repairable_area_fraction: f64) -> Result<f64> {
    ensure(
        (0.0..=MAX_REPAIRABLE_FRACTION).contains(&repairable_area_fraction),
        "repairable_area_fraction",
        "in [0, 0.5]",
        repairable_area_fraction,
    )?;

    let critical_density = params.pattern_density() * (1.0 - repairable_area_fraction);
    yield_model::yield_rate(
        params.model(),
        params.defect_density_per_cm2(),
        params.die_area_mm2(),
        params.cluster_factor(),
        critical_density,
        params.process_maturity(),
    )
}
