//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, econ::EconArgs, init::InitArgs,
    models::ModelsArgs, stats::StatsArgs, sweep::SweepArgs,
};
use crate::core::config::CONFIG_ENV_VAR;
use crate::core::{EconomicsSettings, ProcessSettings, YieldModel};

/// Wafer yield and cost-per-good-die calculator
#[derive(Parser, Debug)]
#[command(name = "fabyield", author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Config file (default: ./fabyield.yaml, then the user config directory)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default fabyield.yaml to the current directory
    Init(InitArgs),

    /// Die count, yield, good dies and wafer efficiency
    Stats(StatsArgs),

    /// Repair-adjusted yield, cost per good die and revenue
    Econ(EconArgs),

    /// Cost per good die and yield across a defect-density range
    Sweep(SweepArgs),

    /// Compare the Poisson, Murphy and negative binomial models
    Models(ModelsArgs),

    /// Inspect the active configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Text for single results, TSV for lists
    #[default]
    Auto,
    /// Human-readable text
    Text,
    Yaml,
    Json,
    /// Tab-separated values with a header row
    Tsv,
    /// Comma-separated values with a header row
    Csv,
    /// Box-drawn table
    Table,
}

/// Yield model names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    Poisson,
    Murphy,
    #[value(name = "nb", alias = "negative-binomial")]
    NegativeBinomial,
}

impl From<ModelArg> for YieldModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Poisson => YieldModel::Poisson,
            ModelArg::Murphy => YieldModel::Murphy,
            ModelArg::NegativeBinomial => YieldModel::NegativeBinomial,
        }
    }
}

/// Process parameter overrides
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProcessArgs {
    /// Wafer diameter in mm, (200, 450]
    #[arg(long, help_heading = "Process")]
    pub diameter: Option<f64>,

    /// Die area in mm²
    #[arg(long, help_heading = "Process")]
    pub die_area: Option<f64>,

    /// Defect density D0 in defects/cm²
    #[arg(long, help_heading = "Process")]
    pub d0: Option<f64>,

    /// Cluster factor alpha (negative binomial only)
    #[arg(long, help_heading = "Process")]
    pub alpha: Option<f64>,

    /// Yield model
    #[arg(long, short = 'm', help_heading = "Process")]
    pub model: Option<ModelArg>,

    /// Edge exclusion in mm
    #[arg(long, help_heading = "Process")]
    pub edge_exclusion: Option<f64>,

    /// Defect-critical share of the die area, 0 to 1
    #[arg(long, help_heading = "Process")]
    pub pattern_density: Option<f64>,

    /// Systematic yield cap, 0 to 1
    #[arg(long, help_heading = "Process")]
    pub process_maturity: Option<f64>,

    /// Fab line utilization, (0, 1]
    #[arg(long, help_heading = "Process")]
    pub fab_utilization: Option<f64>,
}

impl ProcessArgs {
    /// Overlay the flags that were given onto `base`
    pub fn apply(&self, base: ProcessSettings) -> ProcessSettings {
        ProcessSettings {
            wafer_diameter_mm: self.diameter.unwrap_or(base.wafer_diameter_mm),
            die_area_mm2: self.die_area.unwrap_or(base.die_area_mm2),
            defect_density_per_cm2: self.d0.unwrap_or(base.defect_density_per_cm2),
            cluster_factor: self.alpha.unwrap_or(base.cluster_factor),
            model: self.model.map(YieldModel::from).unwrap_or(base.model),
            edge_exclusion_mm: self.edge_exclusion.unwrap_or(base.edge_exclusion_mm),
            pattern_density: self.pattern_density.unwrap_or(base.pattern_density),
            process_maturity: self.process_maturity.unwrap_or(base.process_maturity),
            fab_utilization: self.fab_utilization.unwrap_or(base.fab_utilization),
        }
    }
}

/// Economics overrides
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EconomicsArgs {
    /// Cost of one processed wafer
    #[arg(long, help_heading = "Economics")]
    pub wafer_cost: Option<f64>,

    /// Repairable share of the critical area, 0 to 0.5
    #[arg(long, help_heading = "Economics")]
    pub repair: Option<f64>,

    /// Scribe line width in mm (informational)
    #[arg(long, help_heading = "Economics")]
    pub scribe_width: Option<f64>,

    /// Fab utilization override in percent, 50 to 100
    #[arg(long, help_heading = "Economics")]
    pub econ_fab_utilization: Option<f64>,

    /// Revenue markup over cost
    #[arg(long, help_heading = "Economics")]
    pub markup: Option<f64>,

    /// Cost-per-good-die target to compare against
    #[arg(long, help_heading = "Economics")]
    pub target_cost: Option<f64>,
}

impl EconomicsArgs {
    pub fn apply(&self, base: EconomicsSettings) -> EconomicsSettings {
        EconomicsSettings {
            wafer_cost: self.wafer_cost.unwrap_or(base.wafer_cost),
            repairable_area_fraction: self.repair.unwrap_or(base.repairable_area_fraction),
            scribe_width_mm: self.scribe_width.unwrap_or(base.scribe_width_mm),
            fab_utilization_pct: self.econ_fab_utilization.or(base.fab_utilization_pct),
            markup: self.markup.unwrap_or(base.markup),
            target_cost: self.target_cost.or(base.target_cost),
        }
    }
}
