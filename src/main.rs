//! sitediff: configuration resolver CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{CheckArgs, Cli, Command, ConfigArgs};
use sitediff::config::{Config, ToolKeySet};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    match cli.command {
        Command::Show(args) => run_show(args),
        Command::Check(args) => run_check(args),
    }
}

/// Resolve the configuration named by the arguments.
fn load(args: &ConfigArgs) -> Result<Config> {
    Config::from_files(&args.config, &args.dir, &ToolKeySet::default())
        .context("failed to resolve configuration")
}

/// Print the merged configuration as YAML.
fn run_show(args: ConfigArgs) -> Result<()> {
    let config = load(&args)?;
    let yaml = config
        .to_yaml()
        .context("failed to serialize configuration")?;
    print!("{yaml}");
    Ok(())
}

/// Validate the merged configuration.
fn run_check(args: CheckArgs) -> Result<()> {
    let config = load(&args.source)?;
    config
        .validate(!args.no_before)
        .context("configuration is incomplete")?;
    cli::print_summary(&config);
    Ok(())
}
