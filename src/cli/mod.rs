//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;
pub mod viz;

pub use args::{Cli, Commands, EconomicsArgs, GlobalOpts, ModelArg, OutputFormat, ProcessArgs};

use miette::Result;

/// Run the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Stats(args) => commands::stats::run(args, &global),
        Commands::Econ(args) => commands::econ::run(args, &global),
        Commands::Sweep(args) => commands::sweep::run(args, &global),
        Commands::Models(args) => commands::models::run(args, &global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
