//! CLI command definitions, logging setup and terminal output.

pub mod args;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use sitediff::Config;
use sitediff::constants::ENV_LOG;

/// Default log directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber.
///
/// `SITEDIFF_LOG` wins, then `RUST_LOG`, then the `-v` count.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print a short summary of a validated config.
pub fn print_summary(config: &Config) {
    println!(
        "  {} {}",
        "✔".green().bold(),
        "configuration is valid".bold()
    );
    for (label, side) in [("before:", config.before()), ("after:", config.after())] {
        match &side.url {
            Some(url) => println!("         {}  {}", label.cyan(), url),
            None => println!("         {}  {}", label.cyan(), "(none)".dimmed()),
        }
    }
    println!("         {}  {}", "paths:".cyan(), config.paths().len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitediff::config::NormalizedConfig;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "debug");
        assert_eq!(default_directive(5), "trace");
    }

    #[test]
    fn print_summary_without_before_url() {
        let mut config = Config::from(NormalizedConfig::default());
        config.set_paths(["/"]);
        // Should not panic when a URL is missing.
        print_summary(&config);
    }
}
