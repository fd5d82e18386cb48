//! Derivation pipeline - parameter set in, result set out
//!
//! The single place where geometry, yield, repair and economics are chained.
//! Every function here is pure: identical inputs give bit-identical outputs.

use serde::{Deserialize, Serialize};

use crate::core::economics;
use crate::core::error::{ensure, Result};
use crate::core::geometry;
use crate::core::params::{EconomicsInputs, ProcessParameters};
use crate::core::redundancy;
use crate::core::yield_model;

/// Hard limit on the number of samples in one sweep
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Default display ceiling for swept costs, in currency units
pub const DEFAULT_COST_CEILING: f64 = 1000.0;

/// Relative tolerance (in steps) for reaching the upper sweep bound
const SWEEP_TOLERANCE: f64 = 1e-9;

/// Wafer-level statistics derived from process parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// Capped yield fraction
    pub yield_rate: f64,

    /// Gross dies per wafer
    pub total_dies: u64,

    /// Expected good dies per wafer (fractional)
    pub good_dies: f64,

    /// Die-covered share of the wafer area
    pub efficiency: f64,
}

/// Economics derived from process parameters and economics inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicsResult {
    /// Yield after repair and the systematic cap
    pub effective_yield: f64,

    /// Expected good dies per wafer after repair
    pub good_dies: f64,

    /// Cost per good die; infinite when no die is good
    pub cost_per_good_die: f64,

    /// Revenue at the configured markup
    pub revenue: f64,
}

/// Parameter swept along the x axis of a cost curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum SweepAxis {
    #[default]
    DefectDensity,
}

impl std::fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepAxis::DefectDensity => write!(f, "defect_density"),
        }
    }
}

/// Range and resolution of a cost-curve sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSpec {
    pub axis: SweepAxis,

    /// First sample (inclusive)
    pub low: f64,

    /// Upper bound (inclusive, up to floating tolerance)
    pub high: f64,

    /// Distance between samples
    pub step: f64,

    /// Display ceiling applied to each point's cost
    pub cost_ceiling: f64,
}

impl Default for SweepSpec {
    fn default() -> Self {
        Self {
            axis: SweepAxis::DefectDensity,
            low: 0.1,
            high: 2.0,
            step: 0.2,
            cost_ceiling: DEFAULT_COST_CEILING,
        }
    }
}

impl SweepSpec {
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.low.is_finite() && self.low >= 0.0,
            "sweep.low",
            "a finite value >= 0",
            self.low,
        )?;
        ensure(
            self.high.is_finite() && self.high >= self.low,
            "sweep.high",
            "a finite value >= sweep.low",
            self.high,
        )?;
        ensure(
            self.step.is_finite() && self.step > 0.0,
            "sweep.step",
            "a finite value > 0",
            self.step,
        )?;
        ensure(
            self.cost_ceiling.is_finite() && self.cost_ceiling > 0.0,
            "sweep.cost_ceiling",
            "a finite value > 0",
            self.cost_ceiling,
        )?;

        let intervals = self.intervals();
        ensure(
            intervals < MAX_SWEEP_POINTS as f64,
            "sweep.step",
            "large enough for at most 10000 points",
            self.step,
        )
    }

    fn intervals(&self) -> f64 {
        ((self.high - self.low) / self.step + SWEEP_TOLERANCE).floor()
    }

    /// Number of samples the sweep produces
    pub fn point_count(&self) -> Result<usize> {
        self.validate()?;
        Ok(self.intervals() as usize + 1)
    }

    /// The sampled x values, in increasing order
    pub fn sample_points(&self) -> Result<Vec<f64>> {
        let count = self.point_count()?;
        let last = count - 1;

        Ok((0..count)
            .map(|i| {
                let x = self.low + i as f64 * self.step;
                if i == last && (x - self.high).abs() <= SWEEP_TOLERANCE * self.step {
                    self.high
                } else {
                    x
                }
            })
            .collect())
    }
}

/// One sample of a cost curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostCurvePoint {
    /// D0 at this sample, defects per cm²
    pub defect_density: f64,

    /// Effective yield in percent
    pub yield_pct: f64,

    /// Cost per good die, clamped to the sweep's display ceiling
    pub cost_per_good_die: f64,
}

/// Die count, yield, good dies and efficiency for one parameter set
pub fn derive_stats(params: &ProcessParameters) -> Result<DerivedStats> {
    let total_dies = geometry::gross_die_count(
        params.wafer_diameter_mm(),
        params.die_area_mm2(),
        params.edge_exclusion_mm(),
    )?;
    let efficiency = geometry::efficiency(
        total_dies,
        params.die_area_mm2(),
        params.wafer_diameter_mm(),
        params.edge_exclusion_mm(),
    )?;

    let yield_rate = yield_model::yield_rate(
        params.model(),
        params.defect_density_per_cm2(),
        params.die_area_mm2(),
        params.cluster_factor(),
        params.pattern_density(),
        params.process_maturity(),
    )?;
    let good_dies = yield_model::good_dies(total_dies, yield_rate)?;

    tracing::debug!(
        model = %params.model(),
        total_dies,
        yield_rate,
        good_dies,
        efficiency,
        "derived wafer stats"
    );

    Ok(DerivedStats {
        yield_rate,
        total_dies,
        good_dies,
        efficiency,
    })
}

/// Repair-adjusted yield, good dies, cost per good die and revenue
pub fn derive_economics(
    params: &ProcessParameters,
    econ: &EconomicsInputs,
) -> Result<EconomicsResult> {
    let total_dies = geometry::gross_die_count(
        params.wafer_diameter_mm(),
        params.die_area_mm2(),
        params.edge_exclusion_mm(),
    )?;
    let effective_yield = redundancy::effective_yield(params, econ.repairable_area_fraction())?;
    let good_dies = yield_model::good_dies(total_dies, effective_yield)?;

    let fab_utilization = econ.effective_fab_utilization(params);
    let cost_per_good_die =
        economics::cost_per_good_die(econ.wafer_cost(), good_dies, fab_utilization)?;
    let revenue = economics::revenue(good_dies, cost_per_good_die, econ.markup())?;

    tracing::debug!(
        effective_yield,
        good_dies,
        fab_utilization,
        cost_per_good_die,
        revenue,
        "derived economics"
    );

    Ok(EconomicsResult {
        effective_yield,
        good_dies,
        cost_per_good_die,
        revenue,
    })
}

/// Cost per good die and yield across a range of defect densities
///
/// Each sample substitutes its D0 into a fresh copy of `params` and runs the
/// full economics derivation. Only the returned cost is clamped.
pub fn sweep_cost_curve(
    params: &ProcessParameters,
    econ: &EconomicsInputs,
    spec: &SweepSpec,
) -> Result<Vec<CostCurvePoint>> {
    let samples = spec.sample_points()?;
    tracing::debug!(
        axis = %spec.axis,
        points = samples.len(),
        low = spec.low,
        high = spec.high,
        "sweeping cost curve"
    );

    samples
        .into_iter()
        .map(|x| {
            let point_params = match spec.axis {
                SweepAxis::DefectDensity => params.with_defect_density(x)?,
            };
            let result = derive_economics(&point_params, econ)?;

            Ok(CostCurvePoint {
                defect_density: point_params.defect_density_per_cm2(),
                yield_pct: result.effective_yield * 100.0,
                cost_per_good_die: result.cost_per_good_die.min(spec.cost_ceiling),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{EconomicsSettings, ProcessSettings};
    use crate::core::yield_model::YieldModel;

    fn reference_params() -> ProcessParameters {
        ProcessSettings::default().build().unwrap()
    }

    fn reference_econ() -> EconomicsInputs {
        EconomicsSettings::default().build().unwrap()
    }

    #[test]
    fn test_reference_stats() {
        let stats = derive_stats(&reference_params()).unwrap();
        assert_eq!(stats.total_dies, 613);
        assert!((stats.yield_rate - 0.66945).abs() < 1e-4);
        assert!((stats.good_dies - 410.375).abs() < 1e-2);
        assert!((stats.efficiency - 0.86722).abs() < 1e-4);
    }

    #[test]
    fn test_extreme_exposure_is_a_result_not_an_error() {
        let p = ProcessSettings {
            defect_density_per_cm2: 1e307,
            die_area_mm2: 1e5,
            ..Default::default()
        }
        .build()
        .unwrap();

        let stats = derive_stats(&p).unwrap();
        assert_eq!(stats.yield_rate, 0.0);
        assert_eq!(stats.good_dies, 0.0);

        let result = derive_economics(&p, &reference_econ()).unwrap();
        assert_eq!(result.effective_yield, 0.0);
        assert_eq!(result.cost_per_good_die, f64::INFINITY);
        assert_eq!(result.revenue, 0.0);
    }

    #[test]
    fn test_zero_defects_yield_equals_maturity() {
        for model in YieldModel::ALL {
            let p = ProcessSettings {
                defect_density_per_cm2: 0.0,
                model,
                ..Default::default()
            }
            .build()
            .unwrap();
            let stats = derive_stats(&p).unwrap();
            assert_eq!(stats.yield_rate, p.process_maturity());
        }
    }

    #[test]
    fn test_reference_economics() {
        let result = derive_economics(&reference_params(), &reference_econ()).unwrap();
        let stats = derive_stats(&reference_params()).unwrap();

        // No repair configured: economics yield matches the stats yield
        assert_eq!(result.effective_yield, stats.yield_rate);
        assert_eq!(result.good_dies, stats.good_dies);
        assert!((result.cost_per_good_die - 12.825).abs() < 1e-2);
        assert!((result.revenue - 7894.74).abs() < 1e-1);
    }

    #[test]
    fn test_economics_override_takes_precedence() {
        let params = ProcessSettings {
            fab_utilization: 0.5,
            ..Default::default()
        }
        .build()
        .unwrap();

        let with_override = derive_economics(&params, &reference_econ()).unwrap();
        let without_override = derive_economics(
            &params,
            &EconomicsSettings {
                fab_utilization_pct: None,
                ..Default::default()
            }
            .build()
            .unwrap(),
        )
        .unwrap();

        // 95 % versus 50 %
        let ratio = without_override.cost_per_good_die / with_override.cost_per_good_die;
        assert!((ratio - 0.95 / 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_repair_lowers_cost() {
        let base = derive_economics(&reference_params(), &reference_econ()).unwrap();
        let repaired = derive_economics(
            &reference_params(),
            &EconomicsSettings {
                repairable_area_fraction: 0.3,
                ..Default::default()
            }
            .build()
            .unwrap(),
        )
        .unwrap();
        assert!(repaired.effective_yield > base.effective_yield);
        assert!(repaired.cost_per_good_die < base.cost_per_good_die);
    }

    #[test]
    fn test_zero_good_dies_economics() {
        let params = ProcessSettings {
            process_maturity: 0.0,
            ..Default::default()
        }
        .build()
        .unwrap();
        let result = derive_economics(&params, &reference_econ()).unwrap();
        assert_eq!(result.good_dies, 0.0);
        assert_eq!(result.cost_per_good_die, f64::INFINITY);
        assert_eq!(result.revenue, 0.0);
    }

    #[test]
    fn test_default_sweep_samples() {
        let points = SweepSpec::default().sample_points().unwrap();
        assert_eq!(points.len(), 10);
        assert!((points[0] - 0.1).abs() < 1e-12);
        assert!((points[9] - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_includes_upper_endpoint() {
        let spec = SweepSpec {
            low: 0.0,
            high: 1.0,
            step: 0.1,
            ..Default::default()
        };
        let points = spec.sample_points().unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], 0.0);
        assert_eq!(points[10], 1.0);
    }

    #[test]
    fn test_single_point_sweep() {
        let spec = SweepSpec {
            low: 0.4,
            high: 0.4,
            step: 0.1,
            ..Default::default()
        };
        assert_eq!(spec.sample_points().unwrap(), vec![0.4]);
    }

    #[test]
    fn test_sweep_validation() {
        let bad_step = SweepSpec {
            step: 0.0,
            ..Default::default()
        };
        assert_eq!(bad_step.validate().unwrap_err().field(), "sweep.step");

        let inverted = SweepSpec {
            low: 1.0,
            high: 0.5,
            ..Default::default()
        };
        assert_eq!(inverted.validate().unwrap_err().field(), "sweep.high");

        let negative = SweepSpec {
            low: -0.5,
            ..Default::default()
        };
        assert_eq!(negative.validate().unwrap_err().field(), "sweep.low");

        let unbounded = SweepSpec {
            cost_ceiling: f64::INFINITY,
            ..Default::default()
        };
        assert_eq!(unbounded.validate().unwrap_err().field(), "sweep.cost_ceiling");

        let too_fine = SweepSpec {
            low: 0.0,
            high: 10.0,
            step: 1e-4,
            ..Default::default()
        };
        assert!(too_fine.validate().is_err());
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let params = reference_params();
        let econ = reference_econ();
        let spec = SweepSpec::default();

        let first = sweep_cost_curve(&params, &econ, &spec).unwrap();
        let second = sweep_cost_curve(&params, &econ, &spec).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.defect_density.to_bits(), b.defect_density.to_bits());
            assert_eq!(a.yield_pct.to_bits(), b.yield_pct.to_bits());
            assert_eq!(a.cost_per_good_die.to_bits(), b.cost_per_good_die.to_bits());
        }
    }

    #[test]
    fn test_sweep_cost_rises_with_defect_density() {
        let points =
            sweep_cost_curve(&reference_params(), &reference_econ(), &SweepSpec::default())
                .unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].cost_per_good_die > pair[0].cost_per_good_die);
            assert!(pair[1].yield_pct < pair[0].yield_pct);
        }
    }

    #[test]
    fn test_sweep_matches_direct_derivation() {
        let params = reference_params();
        let econ = reference_econ();
        let points = sweep_cost_curve(&params, &econ, &SweepSpec::default()).unwrap();

        let at_half = points
            .iter()
            .find(|p| (p.defect_density - 0.5).abs() < 1e-9)
            .unwrap();
        let direct = derive_economics(
            &params.with_defect_density(at_half.defect_density).unwrap(),
            &econ,
        )
        .unwrap();
        assert_eq!(at_half.cost_per_good_die, direct.cost_per_good_die);
        assert_eq!(at_half.yield_pct, direct.effective_yield * 100.0);
    }

    #[test]
    fn test_sweep_clamps_only_display_cost() {
        let params = ProcessSettings {
            die_area_mm2: 200.0,
            ..Default::default()
        }
        .build()
        .unwrap();
        let spec = SweepSpec {
            low: 0.0,
            high: 20.0,
            step: 5.0,
            cost_ceiling: 50.0,
            ..Default::default()
        };
        let points = sweep_cost_curve(&params, &reference_econ(), &spec).unwrap();
        let last = points.last().unwrap();
        assert_eq!(last.cost_per_good_die, 50.0);

        // The unclamped value is still available through the pipeline
        let direct = derive_economics(&params.with_defect_density(20.0).unwrap(), &reference_econ())
            .unwrap();
        assert!(direct.cost_per_good_die > 50.0);
    }

    #[test]
    fn test_sweep_clamps_infinite_cost() {
        let params = ProcessSettings {
            process_maturity: 0.0,
            ..Default::default()
        }
        .build()
        .unwrap();
        let points = sweep_cost_curve(&params, &reference_econ(), &SweepSpec::default()).unwrap();
        assert!(points.iter().all(|p| p.cost_per_good_die == DEFAULT_COST_CEILING));
    }
}
