//! Wafer geometry - gross die count and area utilization
//!
//! Uses the standard large-area approximation: usable disk area over die
//! area, minus an edge-row loss term for dies straddling the boundary.

use std::f64::consts::PI;

use crate::core::error::{ensure, ensure_non_negative, Result};

fn check_die_area(die_area_mm2: f64) -> Result<()> {
    ensure(
        die_area_mm2.is_finite() && die_area_mm2 > 0.0,
        "die_area_mm2",
        "a finite value > 0",
        die_area_mm2,
    )
}

/// Radius of the usable disk after removing the edge-exclusion ring
///
/// Never negative: an exclusion ring wider than the wafer radius leaves 0.
pub fn usable_radius_mm(diameter_mm: f64, edge_exclusion_mm: f64) -> f64 {
    (diameter_mm / 2.0 - edge_exclusion_mm).max(0.0)
}

/// Number of whole dies that fit on the usable area of a wafer
///
/// `N = floor(π·r² / A − π·2r / sqrt(2·A))`, with `r` the usable radius.
/// Returns 0 when the edge exclusion consumes the whole wafer. A die so small
/// that the count does not fit in a `u64` is rejected.
pub fn gross_die_count(diameter_mm: f64, die_area_mm2: f64, edge_exclusion_mm: f64) -> Result<u64> {
    ensure_non_negative("wafer_diameter_mm", diameter_mm)?;
    check_die_area(die_area_mm2)?;
    ensure_non_negative("edge_exclusion_mm", edge_exclusion_mm)?;

    let r = usable_radius_mm(diameter_mm, edge_exclusion_mm);
    if r <= 0.0 {
        return Ok(0);
    }

    let area_term = PI * r * r / die_area_mm2;
    let edge_loss = PI * (2.0 * r) / (2.0 * die_area_mm2).sqrt();
    let n = (area_term - edge_loss).floor();
    ensure(
        n < u64::MAX as f64,
        "die_area_mm2",
        "large enough for a representable die count",
        die_area_mm2,
    )?;

    Ok(if n > 0.0 { n as u64 } else { 0 })
}

/// Fraction of the full wafer area covered by dies
///
/// `(N·A) / (π·(d/2)²)`. The edge exclusion is validated but does not enter
/// the ratio: efficiency is measured against the full wafer. A result above 1
/// can only come from inconsistent inputs; it is clamped and logged.
pub fn efficiency(
    total_dies: u64,
    die_area_mm2: f64,
    diameter_mm: f64,
    edge_exclusion_mm: f64,
) -> Result<f64> {
    check_die_area(die_area_mm2)?;
    ensure_non_negative("wafer_diameter_mm", diameter_mm)?;
    ensure_non_negative("edge_exclusion_mm", edge_exclusion_mm)?;

    if total_dies == 0 || diameter_mm == 0.0 {
        return Ok(0.0);
    }

    let radius = diameter_mm / 2.0;
    let wafer_area = PI * radius * radius;
    let ratio = total_dies as f64 * die_area_mm2 / wafer_area;

    if ratio > 1.0 {
        tracing::warn!(
            total_dies,
            die_area_mm2,
            diameter_mm,
            ratio,
            "die-covered area exceeds wafer area; clamping efficiency to 1"
        );
        return Ok(1.0);
    }
    Ok(ratio)
}
