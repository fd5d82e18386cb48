//! Parameter sets - validated value objects and their raw settings
//!
//! `ProcessSettings` and `EconomicsSettings` are plain, serde-friendly records
//! as they come from config files or the command line. `build()` checks every
//! domain and produces the immutable `ProcessParameters` / `EconomicsInputs`
//! that the computation core accepts. Updates go through the settings again
//! and therefore always yield a freshly validated value.

use serde::{Deserialize, Serialize};

use crate::core::error::{ensure, ensure_non_negative, ensure_unit_interval, Result};
use crate::core::yield_model::YieldModel;

/// Smallest (exclusive) and largest (inclusive) supported wafer diameters
pub const MIN_WAFER_DIAMETER_MM: f64 = 200.0;
pub const MAX_WAFER_DIAMETER_MM: f64 = 450.0;

/// Largest share of the die that can be redundant logic
pub const MAX_REPAIRABLE_FRACTION: f64 = 0.5;

/// Economics-local fab utilization bounds, in percent
pub const MIN_FAB_UTILIZATION_PCT: f64 = 50.0;
pub const MAX_FAB_UTILIZATION_PCT: f64 = 100.0;

/// Default revenue markup over cost
pub const DEFAULT_MARKUP: f64 = 1.5;

/// Default cost-per-good-die target
pub const DEFAULT_TARGET_COST: f64 = 15.0;

// ===== Process =====

/// Unvalidated process settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessSettings {
    /// Wafer diameter in mm
    pub wafer_diameter_mm: f64,

    /// Die footprint in mm²
    pub die_area_mm2: f64,

    /// Fatal defect density D0, defects per cm²
    pub defect_density_per_cm2: f64,

    /// Negative binomial cluster factor (alpha)
    pub cluster_factor: f64,

    /// Yield model
    pub model: YieldModel,

    /// Unusable ring at the wafer edge, in mm
    pub edge_exclusion_mm: f64,

    /// Fraction of die area that is defect-critical
    pub pattern_density: f64,

    /// Systematic yield cap
    pub process_maturity: f64,

    /// Fraction of wafer starts that become chargeable output
    pub fab_utilization: f64,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            wafer_diameter_mm: 300.0,
            die_area_mm2: 100.0,
            defect_density_per_cm2: 0.5,
            cluster_factor: 2.0,
            model: YieldModel::Poisson,
            edge_exclusion_mm: 3.0,
            pattern_density: 0.7,
            process_maturity: 0.95,
            fab_utilization: 0.95,
        }
    }
}

impl ProcessSettings {
    /// Validate every field and freeze the result
    pub fn build(self) -> Result<ProcessParameters> {
        ensure(
            self.wafer_diameter_mm > MIN_WAFER_DIAMETER_MM
                && self.wafer_diameter_mm <= MAX_WAFER_DIAMETER_MM,
            "wafer_diameter_mm",
            "in (200, 450]",
            self.wafer_diameter_mm,
        )?;
        ensure(
            self.die_area_mm2.is_finite() && self.die_area_mm2 > 0.0,
            "die_area_mm2",
            "a finite value > 0",
            self.die_area_mm2,
        )?;
        ensure_non_negative("defect_density_per_cm2", self.defect_density_per_cm2)?;
        ensure(
            self.cluster_factor.is_finite() && self.cluster_factor > 0.0,
            "cluster_factor",
            "a finite value > 0",
            self.cluster_factor,
        )?;
        ensure(
            self.edge_exclusion_mm >= 0.0 && self.edge_exclusion_mm < self.wafer_diameter_mm / 2.0,
            "edge_exclusion_mm",
            "in [0, wafer_diameter_mm / 2)",
            self.edge_exclusion_mm,
        )?;
        ensure_unit_interval("pattern_density", self.pattern_density)?;
        ensure_unit_interval("process_maturity", self.process_maturity)?;
        ensure(
            self.fab_utilization > 0.0 && self.fab_utilization <= 1.0,
            "fab_utilization",
            "in (0, 1]",
            self.fab_utilization,
        )?;

        Ok(ProcessParameters { settings: self })
    }
}

/// Validated, immutable process parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProcessSettings", into = "ProcessSettings")]
pub struct ProcessParameters {
    settings: ProcessSettings,
}

impl TryFrom<ProcessSettings> for ProcessParameters {
    type Error = crate::core::error::Error;

    fn try_from(settings: ProcessSettings) -> Result<Self> {
        settings.build()
    }
}

impl From<ProcessParameters> for ProcessSettings {
    fn from(params: ProcessParameters) -> Self {
        params.settings
    }
}

impl ProcessParameters {
    pub fn wafer_diameter_mm(&self) -> f64 {
        self.settings.wafer_diameter_mm
    }

    pub fn die_area_mm2(&self) -> f64 {
        self.settings.die_area_mm2
    }

    pub fn defect_density_per_cm2(&self) -> f64 {
        self.settings.defect_density_per_cm2
    }

    pub fn cluster_factor(&self) -> f64 {
        self.settings.cluster_factor
    }

    pub fn model(&self) -> YieldModel {
        self.settings.model
    }

    pub fn edge_exclusion_mm(&self) -> f64 {
        self.settings.edge_exclusion_mm
    }

    pub fn pattern_density(&self) -> f64 {
        self.settings.pattern_density
    }

    pub fn process_maturity(&self) -> f64 {
        self.settings.process_maturity
    }

    pub fn fab_utilization(&self) -> f64 {
        self.settings.fab_utilization
    }

    /// The raw settings this value was built from
    pub fn to_settings(&self) -> ProcessSettings {
        self.settings
    }

    /// Copy with a different defect density
    pub fn with_defect_density(&self, defect_density_per_cm2: f64) -> Result<Self> {
        ProcessSettings {
            defect_density_per_cm2,
            ..self.settings
        }
        .build()
    }

    /// Copy with a different yield model
    pub fn with_model(&self, model: YieldModel) -> Self {
        // Model choice never affects domain validity
        Self {
            settings: ProcessSettings {
                model,
                ..self.settings
            },
        }
    }
}

// ===== Economics =====

/// Unvalidated economics settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicsSettings {
    /// Cost of one processed wafer
    pub wafer_cost: f64,

    /// Share of the critical area protected by redundancy, 0 to 0.5
    pub repairable_area_fraction: f64,

    /// Scribe line width in mm (reserved; not used by any formula yet)
    pub scribe_width_mm: f64,

    /// Fab utilization override in percent; falls back to the process value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fab_utilization_pct: Option<f64>,

    /// Revenue multiplier over cost
    pub markup: f64,

    /// Cost per good die to stay below, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_cost: Option<f64>,
}

impl Default for EconomicsSettings {
    fn default() -> Self {
        Self {
            wafer_cost: 5000.0,
            repairable_area_fraction: 0.0,
            scribe_width_mm: 0.1,
            fab_utilization_pct: Some(95.0),
            markup: DEFAULT_MARKUP,
            target_cost: Some(DEFAULT_TARGET_COST),
        }
    }
}

impl EconomicsSettings {
    pub fn build(self) -> Result<EconomicsInputs> {
        ensure_non_negative("wafer_cost", self.wafer_cost)?;
        ensure(
            (0.0..=MAX_REPAIRABLE_FRACTION).contains(&self.repairable_area_fraction),
            "repairable_area_fraction",
            "in [0, 0.5]",
            self.repairable_area_fraction,
        )?;
        ensure_non_negative("scribe_width_mm", self.scribe_width_mm)?;
        if let Some(pct) = self.fab_utilization_pct {
            ensure(
                (MIN_FAB_UTILIZATION_PCT..=MAX_FAB_UTILIZATION_PCT).contains(&pct),
                "fab_utilization_pct",
                "in [50, 100]",
                pct,
            )?;
        }
        ensure_non_negative("markup", self.markup)?;
        if let Some(target) = self.target_cost {
            ensure(
                target.is_finite() && target > 0.0,
                "target_cost",
                "a finite value > 0",
                target,
            )?;
        }

        Ok(EconomicsInputs { settings: self })
    }
}

/// Validated, immutable economics inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EconomicsSettings", into = "EconomicsSettings")]
pub struct EconomicsInputs {
    settings: EconomicsSettings,
}

impl TryFrom<EconomicsSettings> for EconomicsInputs {
    type Error = crate::core::error::Error;

    fn try_from(settings: EconomicsSettings) -> Result<Self> {
        settings.build()
    }
}

impl From<EconomicsInputs> for EconomicsSettings {
    fn from(inputs: EconomicsInputs) -> Self {
        inputs.settings
    }
}

impl EconomicsInputs {
    pub fn wafer_cost(&self) -> f64 {
        self.settings.wafer_cost
    }

    pub fn repairable_area_fraction(&self) -> f64 {
        self.settings.repairable_area_fraction
    }

    pub fn scribe_width_mm(&self) -> f64 {
        self.settings.scribe_width_mm
    }

    pub fn fab_utilization_pct(&self) -> Option<f64> {
        self.settings.fab_utilization_pct
    }

    pub fn markup(&self) -> f64 {
        self.settings.markup
    }

    pub fn target_cost(&self) -> Option<f64> {
        self.settings.target_cost
    }

    /// Whether `cost_per_good_die` beats the target; `None` without a target
    pub fn meets_target(&self, cost_per_good_die: f64) -> Option<bool> {
        self.settings
            .target_cost
            .map(|target| cost_per_good_die < target)
    }

    pub fn to_settings(&self) -> EconomicsSettings {
        self.settings
    }

    /// Utilization to charge against: the local override if set, else the process value
    pub fn effective_fab_utilization(&self, params: &ProcessParameters) -> f64 {
        match self.settings.fab_utilization_pct {
            Some(pct) => pct / 100.0,
            None => params.fab_utilization(),
        }
    }
}
