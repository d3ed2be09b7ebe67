//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

use sitediff::constants::{APP_NAME, ENV_DIR, VERSION};

/// Resolve and check sitediff configuration files.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version = VERSION)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Print the fully resolved configuration as YAML.
    Show(ConfigArgs),

    /// Resolve the configuration and check it can drive a comparison.
    Check(CheckArgs),
}

/// Where to find the configuration.
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Config file to load. Repeat to merge several; earlier files win.
    /// Defaults to `sitediff.yaml` in `--dir`.
    #[arg(short, long = "config", value_name = "FILE")]
    pub config: Vec<PathBuf>,

    /// Directory holding the default config file.
    #[arg(short, long, default_value = ".", env = ENV_DIR)]
    pub dir: PathBuf,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: ConfigArgs,

    /// Do not require a `before` URL.
    #[arg(long, default_value_t = false)]
    pub no_before: bool,
}
