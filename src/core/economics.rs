//! Unit economics - cost per good die and revenue
//!
//! A wafer that yields no good dies has an infinite unit cost. That is a
//! result, not an error; callers render it as "N/A".

use crate::core::error::{ensure, ensure_non_negative, Result};

/// Wafer cost amortized over the chargeable good dies
///
/// `wafer_cost / (good_dies · fab_utilization)`, or `f64::INFINITY` when the
/// denominator is zero.
pub fn cost_per_good_die(wafer_cost: f64, good_dies: f64, fab_utilization: f64) -> Result<f64> {
    ensure_non_negative("wafer_cost", wafer_cost)?;
    ensure_non_negative("good_dies", good_dies)?;
    ensure(
        fab_utilization > 0.0 && fab_utilization <= 1.0,
        "fab_utilization",
        "in (0, 1]",
        fab_utilization,
    )?;

    let chargeable = good_dies * fab_utilization;
    if chargeable == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(wafer_cost / chargeable)
}

/// Revenue from selling the good dies at `cost · markup`
///
/// Zero dies sell for zero even when the unit cost is infinite.
pub fn revenue(good_dies: f64, cost_per_good_die: f64, markup: f64) -> Result<f64> {
    ensure_non_negative("good_dies", good_dies)?;
    ensure(
        cost_per_good_die >= 0.0,
        "cost_per_good_die",
        "a value >= 0 (or infinite)",
        cost_per_good_die,
    )?;
    ensure_non_negative("markup", markup)?;

    // 0 · ∞ would be NaN
    if good_dies == 0.0 || markup == 0.0 {
        return Ok(0.0);
    }
    Ok(good_dies * cost_per_good_die * markup)
}
