//! `prepull expand` — Show how a string resolves against an environment file.

use std::path::PathBuf;

use clap::Args;
use prepull_common::constants::DEFAULT_ENV_FILE;
use prepull_compose::{expand::expand, source::load_env_file};

/// Arguments for the `expand` command.
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Path to the `KEY=VALUE` environment file.
    #[arg(long, env = "PREPULL_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    pub env: PathBuf,

    /// Text containing `${...}` placeholders.
    pub text: String,
}

/// Executes the `expand` command.
///
/// # Errors
///
/// Returns an error if the environment file cannot be read.
pub fn execute(args: &ExpandArgs) -> anyhow::Result<()> {
    let env = load_env_file(&args.env)?;
    println!("{}", expand(&args.text, &env));
    Ok(())
}
