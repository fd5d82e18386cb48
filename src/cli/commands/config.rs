//! `fabyield config` command - inspect the active configuration

use clap::Subcommand;
use miette::Result;

use crate::cli::helpers::load_config;
use crate::cli::output::to_structured;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the path of the config file in use
    Path,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    let (config, source) = load_config(global)?;

    match cmd {
        ConfigCommands::Show => {
            let format = match global.format {
                OutputFormat::Json => OutputFormat::Json,
                _ => OutputFormat::Yaml,
            };
            if let Some(rendered) = to_structured(&config, format)? {
                println!("{}", rendered.trim_end());
            }
        }
        ConfigCommands::Path => match source.path() {
            Some(path) => println!("{}", path.display()),
            None => println!("(none, using {})", source),
        },
    }
    Ok(())
}
