//! `prepull collect` — Collect image references and write them as JSON.

use std::path::PathBuf;

use clap::Args;
use prepull_common::config::CollectConfig;
use prepull_common::constants::{DEFAULT_COMPOSE_FILE, DEFAULT_ENV_FILE, DEFAULT_OUTPUT_FILE};
use prepull_compose::pipeline;

/// Arguments for the `collect` command.
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Path to the `KEY=VALUE` environment file.
    #[arg(long, env = "PREPULL_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    pub env: PathBuf,

    /// Path to the main compose file.
    #[arg(long, env = "PREPULL_COMPOSE", default_value = DEFAULT_COMPOSE_FILE)]
    pub compose: PathBuf,

    /// Path to the base compose file.
    #[arg(long, env = "PREPULL_BASE")]
    pub base: Option<PathBuf>,

    /// Additional compose files to scan (repeatable).
    #[arg(long = "extra")]
    pub extra: Vec<PathBuf>,

    /// Destination of the JSON image list.
    #[arg(short, long, env = "PREPULL_OUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub out: PathBuf,

    /// Extra environment key whose value is always included (repeatable).
    #[arg(long = "include-key", value_name = "KEY")]
    pub include_keys: Vec<String>,

    /// Do not include the built-in list of image environment keys.
    #[arg(long)]
    pub no_default_keys: bool,
}

impl CollectArgs {
    /// Builds the run configuration from the parsed arguments.
    pub fn into_config(self) -> CollectConfig {
        let mut compose_files = vec![self.compose];
        compose_files.extend(self.base);
        compose_files.extend(self.extra);

        let mut always_include = if self.no_default_keys {
            Vec::new()
        } else {
            CollectConfig::default().always_include
        };
        for key in self.include_keys {
            if !always_include.contains(&key) {
                always_include.push(key);
            }
        }

        CollectConfig {
            env_file: self.env,
            compose_files,
            output: self.out,
            always_include,
        }
    }
}

/// Executes the `collect` command.
///
/// Prints one line per rejected candidate, writes the accepted references
/// to the output file, then prints the count.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the output cannot be written.
pub fn execute(args: CollectArgs) -> anyhow::Result<()> {
    let config = args.into_config();
    tracing::info!(
        env = %config.env_file.display(),
        documents = config.compose_files.len(),
        "collecting images"
    );

    let report = pipeline::run(&config)?;
    for rejection in &report.rejections {
        println!("[WARN] {rejection}");
    }

    crate::output::write_image_list(&config.output, &report.images)?;
    println!("Collected {} images", report.images.len());

    Ok(())
}
