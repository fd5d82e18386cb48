//! `fabyield models` command - side-by-side yield model comparison

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{format_percent, load_config, resolve_process, smart_round};
use crate::cli::output::{delimiter_for, render_table, to_delimited, to_structured};
use crate::cli::{GlobalOpts, OutputFormat, ProcessArgs};
use crate::core::yield_model::raw_yield;
use crate::core::{derive_stats, ProcessParameters, YieldModel};

#[derive(clap::Args, Debug)]
pub struct ModelsArgs {
    #[command(flatten)]
    pub process: ProcessArgs,

    /// Print a short description of each model
    #[arg(long)]
    pub describe: bool,
}

/// One model evaluated on the shared parameter set
#[derive(Debug, Serialize)]
struct ModelRow {
    model: &'static str,
    raw_yield: f64,
    yield_rate: f64,
    good_dies: f64,
}

fn evaluate(params: &ProcessParameters, model: YieldModel) -> Result<ModelRow> {
    let params = params.with_model(model);
    let raw = raw_yield(
        model,
        params.defect_density_per_cm2(),
        params.die_area_mm2(),
        params.cluster_factor(),
        params.pattern_density(),
    )?;
    let stats = derive_stats(&params)?;

    Ok(ModelRow {
        model: model.id(),
        raw_yield: raw,
        yield_rate: stats.yield_rate,
        good_dies: stats.good_dies,
    })
}

pub fn run(args: ModelsArgs, global: &GlobalOpts) -> Result<()> {
    let (config, _) = load_config(global)?;
    let params = resolve_process(&config, &args.process)?;

    let rows = YieldModel::ALL
        .iter()
        .map(|&model| evaluate(&params, model))
        .collect::<Result<Vec<_>>>()?;

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Table,
        other => other,
    };
    if let Some(structured) = to_structured(&rows, format)? {
        println!("{}", structured.trim_end());
        return Ok(());
    }
    if let Some(delimiter) = delimiter_for(format) {
        print!("{}", to_delimited(&rows, delimiter)?);
        return Ok(());
    }

    let selected = params.model();
    let table_rows = YieldModel::ALL.iter().zip(&rows).map(|(model, row)| {
        let marker = if *model == selected { "*" } else { "" };
        vec![
            format!("{}{}", model.label(), marker),
            format_percent(row.raw_yield, 2),
            format_percent(row.yield_rate, 2),
            smart_round(row.good_dies),
        ]
    });
    println!(
        "{}",
        render_table(&["MODEL", "RAW YIELD", "YIELD", "GOOD DIES"], table_rows)
    );
    println!(
        "{} marks the configured model; alpha = {} applies to {} only",
        style("*").yellow(),
        params.cluster_factor(),
        YieldModel::NegativeBinomial.label()
    );

    if args.describe {
        println!();
        for model in YieldModel::ALL {
            println!("   {:<14} {}", style(model.label()).bold(), model.description());
        }
    }
    Ok(())
}
