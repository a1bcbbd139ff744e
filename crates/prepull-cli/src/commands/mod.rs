//! CLI command definitions and dispatch.

pub mod collect;
pub mod expand;

use clap::{Parser, Subcommand};

/// prepull — collect the container images a compose deployment needs.
#[derive(Parser, Debug)]
#[command(name = "prepull", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect image references and write them as a JSON list.
    Collect(collect::CollectArgs),
    /// Expand `${...}` placeholders in a string against an environment file.
    Expand(expand::ExpandArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Collect(args) => collect::execute(args),
        Command::Expand(args) => expand::execute(&args),
    }
}
