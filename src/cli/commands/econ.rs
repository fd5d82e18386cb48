//! `fabyield econ` command - cost per good die with repair and utilization

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{
    format_currency, format_percent, load_config, resolve_economics, resolve_process, smart_round,
};
use crate::cli::output::{effective_format, print_record};
use crate::cli::{EconomicsArgs, GlobalOpts, ProcessArgs};
use crate::core::{derive_economics, derive_stats};

#[derive(clap::Args, Debug)]
pub struct EconArgs {
    #[command(flatten)]
    pub process: ProcessArgs,

    #[command(flatten)]
    pub economics: EconomicsArgs,
}

/// Economics with the unrepaired yield alongside for comparison
#[derive(Debug, Serialize)]
struct EconReport {
    base_yield: f64,
    effective_yield: f64,
    total_dies: u64,
    good_dies: f64,
    fab_utilization: f64,
    wafer_cost: f64,
    cost_per_good_die: f64,
    revenue: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meets_target: Option<bool>,
}

pub fn run(args: EconArgs, global: &GlobalOpts) -> Result<()> {
    let (config, _) = load_config(global)?;
    let params = resolve_process(&config, &args.process)?;
    let econ = resolve_economics(&config, &args.economics)?;

    let stats = derive_stats(&params)?;
    let result = derive_economics(&params, &econ)?;

    let report = EconReport {
        base_yield: stats.yield_rate,
        effective_yield: result.effective_yield,
        total_dies: stats.total_dies,
        good_dies: result.good_dies,
        fab_utilization: econ.effective_fab_utilization(&params),
        wafer_cost: econ.wafer_cost(),
        cost_per_good_die: result.cost_per_good_die,
        revenue: result.revenue,
        target_cost: econ.target_cost(),
        meets_target: econ.meets_target(result.cost_per_good_die),
    };

    let format = effective_format(global.format, false);
    if print_record(&report, format, || table_rows(&report))? {
        return Ok(());
    }

    print_text(&report, econ.repairable_area_fraction());
    Ok(())
}

fn table_rows(report: &EconReport) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Base yield".to_string(), format_percent(report.base_yield, 1)),
        (
            "Effective yield".to_string(),
            format_percent(report.effective_yield, 1),
        ),
        ("Good dies".to_string(), smart_round(report.good_dies)),
        (
            "Fab utilization".to_string(),
            format_percent(report.fab_utilization, 0),
        ),
        ("Wafer cost".to_string(), format_currency(report.wafer_cost)),
        (
            "Cost per good die".to_string(),
            format_currency(report.cost_per_good_die),
        ),
        ("Revenue".to_string(), format_currency(report.revenue)),
    ];
    if let Some(target) = report.target_cost {
        rows.push(("Target".to_string(), format!("< {}", format_currency(target))));
    }
    rows
}

fn print_text(report: &EconReport, repairable_area_fraction: f64) {
    println!(
        "{} Wafer cost {} at {} fab utilization",
        style("⚙").cyan(),
        style(format_currency(report.wafer_cost)).yellow(),
        format_percent(report.fab_utilization, 0)
    );
    println!();

    println!("   {}", style("Redundancy & Repair").bold());
    println!(
        "     Repairable area:  {}",
        format_percent(repairable_area_fraction, 0)
    );
    println!(
        "     Base yield:       {}",
        format_percent(report.base_yield, 1)
    );
    println!(
        "     Effective yield:  {}",
        style(format_percent(report.effective_yield, 1)).cyan()
    );
    println!();

    println!("   {}", style("Economics").bold());
    println!(
        "     Good dies:        {} of {}",
        smart_round(report.good_dies),
        report.total_dies
    );

    let cost = format_currency(report.cost_per_good_die);
    let on_target = report
        .meets_target
        .unwrap_or(report.cost_per_good_die.is_finite());
    let cost = if on_target {
        style(cost).green()
    } else {
        style(cost).red()
    };
    match report.target_cost {
        Some(target) => println!(
            "     CPGD:             {}  {}",
            cost,
            style(format!("(target < {})", format_currency(target))).dim()
        ),
        None => println!("     CPGD:             {}", cost),
    }
    println!("     Revenue:          {}", format_currency(report.revenue));
}
