//! `fabyield sweep` command - cost curve over defect density

use miette::Result;

use crate::cli::helpers::{format_currency, load_config, resolve_economics, resolve_process};
use crate::cli::output::{delimiter_for, effective_format, render_table, to_delimited, to_structured};
use crate::cli::viz;
use crate::cli::{EconomicsArgs, GlobalOpts, OutputFormat, ProcessArgs};
use crate::core::{sweep_cost_curve, CostCurvePoint, SweepSpec};

#[derive(clap::Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub process: ProcessArgs,

    #[command(flatten)]
    pub economics: EconomicsArgs,

    /// Lowest defect density to sample
    #[arg(long, help_heading = "Sweep")]
    pub low: Option<f64>,

    /// Highest defect density to sample (inclusive)
    #[arg(long, help_heading = "Sweep")]
    pub high: Option<f64>,

    /// Distance between samples
    #[arg(long, help_heading = "Sweep")]
    pub step: Option<f64>,

    /// Display ceiling for cost per good die
    #[arg(long, help_heading = "Sweep")]
    pub ceiling: Option<f64>,

    /// Draw braille charts of cost and yield instead of a listing
    #[arg(long)]
    pub chart: bool,
}

impl SweepArgs {
    fn apply(&self, base: SweepSpec) -> SweepSpec {
        SweepSpec {
            axis: base.axis,
            low: self.low.unwrap_or(base.low),
            high: self.high.unwrap_or(base.high),
            step: self.step.unwrap_or(base.step),
            cost_ceiling: self.ceiling.unwrap_or(base.cost_ceiling),
        }
    }
}

pub fn run(args: SweepArgs, global: &GlobalOpts) -> Result<()> {
    let (config, _) = load_config(global)?;
    let params = resolve_process(&config, &args.process)?;
    let econ = resolve_economics(&config, &args.economics)?;
    let spec = args.apply(config.sweep);

    let points = sweep_cost_curve(&params, &econ, &spec)?;

    if args.chart {
        println!("{}", viz::render_cost_curve(&points));
        return Ok(());
    }

    let format = effective_format(global.format, true);
    if let Some(structured) = to_structured(&points, format)? {
        println!("{}", structured.trim_end());
        return Ok(());
    }
    if let Some(delimiter) = delimiter_for(format) {
        print!("{}", to_delimited(&points, delimiter)?);
        return Ok(());
    }

    print_listing(&points, format);
    Ok(())
}

fn print_listing(points: &[CostCurvePoint], format: OutputFormat) {
    let rows = points.iter().map(|p| {
        vec![
            format!("{:.2}", p.defect_density),
            format!("{:.1}%", p.yield_pct),
            format_currency(p.cost_per_good_die),
        ]
    });
    let table = render_table(&["D0 (/cm²)", "YIELD", "COST/DIE"], rows);

    if format == OutputFormat::Text {
        println!("Cost vs. defect density ({} points)", points.len());
    }
    println!("{}", table);
}
