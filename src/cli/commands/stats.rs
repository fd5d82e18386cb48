//! `fabyield stats` command - wafer-level yield statistics

use console::style;
use miette::Result;

use crate::cli::helpers::{format_percent, load_config, resolve_process, smart_round};
use crate::cli::output::{effective_format, print_record};
use crate::cli::viz::{render_percent_bar, BAR_WIDTH};
use crate::cli::{GlobalOpts, ProcessArgs};
use crate::core::{derive_stats, DerivedStats, ProcessParameters};

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub process: ProcessArgs,
}

pub fn run(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let (config, _) = load_config(global)?;
    let params = resolve_process(&config, &args.process)?;
    let stats = derive_stats(&params)?;

    let format = effective_format(global.format, false);
    if print_record(&stats, format, || table_rows(&stats))? {
        return Ok(());
    }

    print_text(&params, &stats);
    Ok(())
}

fn table_rows(stats: &DerivedStats) -> Vec<(String, String)> {
    vec![
        ("Gross dies".to_string(), stats.total_dies.to_string()),
        ("Yield".to_string(), format_percent(stats.yield_rate, 2)),
        ("Good dies".to_string(), smart_round(stats.good_dies)),
        ("Efficiency".to_string(), format_percent(stats.efficiency, 2)),
    ]
}

fn print_text(params: &ProcessParameters, stats: &DerivedStats) {
    println!(
        "{} {} model on a {} mm wafer (die {} mm², edge exclusion {} mm)",
        style("⚙").cyan(),
        style(params.model().label()).yellow(),
        params.wafer_diameter_mm(),
        params.die_area_mm2(),
        params.edge_exclusion_mm()
    );
    println!();
    println!("   Gross dies:   {}", style(stats.total_dies).bold());
    println!(
        "   Yield:        {}  {}",
        style(format_percent(stats.yield_rate, 2)).bold(),
        render_percent_bar(stats.yield_rate, BAR_WIDTH)
    );
    println!("   Good dies:    {}", style(smart_round(stats.good_dies)).bold());
    println!(
        "   Efficiency:   {}",
        style(format_percent(stats.efficiency, 2)).bold()
    );
}
