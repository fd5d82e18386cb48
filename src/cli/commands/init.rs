//! `fabyield init` command - write a default config file

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing fabyield.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let path = Config::write_default(&cwd, args.force)?;

    println!(
        "{} Created config {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    println!("   Edit it, then run {}", style("fabyield stats").yellow());
    Ok(())
}
