//! Command-line interface for paramfuzz
//!
//! Flags are merged on top of the layered configuration (see [`crate::config`])
//! before the dispatcher runs. Candidates go to stdout; logs and errors go to
//! stderr so the output can be piped straight into a fuzzer.

use anyhow::{Result, bail};
use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;

mod output;

pub use output::Output;

use crate::config::{CliOverrides, ConfigLoader};
use crate::parallel::Dispatcher;

/// paramfuzz - append parameters with a FUZZ marker to every URL in a list
#[derive(Parser, Debug)]
#[command(
    name = "paramfuzz",
    version,
    about = "Generate fuzz candidate URLs by appending parameters with a FUZZ marker",
    long_about = "Reads a file of URL-bearing lines and a file of parameter names and prints, \
                  for every URL found, one line per parameter: <url>?<param>=FUZZ, or \
                  <url>&<param>=FUZZ when the URL already has a query string.\n\n\
                  Note: when -u or -p is missing the tool exits successfully without output \
                  unless --strict (or `strict = true` in the config) is set."
)]
pub struct Cli {
    /// Number of concurrent workers [default: 30]
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// File containing URLs (any text; URLs are extracted from each line)
    #[arg(short = 'u', long = "urls", value_name = "FILE")]
    pub urls: Option<PathBuf>,

    /// File containing parameter names, one per line
    #[arg(short = 'p', long = "params", value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Pause before each URL line, in milliseconds; 0 disables [default: 10]
    #[arg(short = 'd', long = "delay", value_name = "MS")]
    pub delay: Option<u64>,

    /// Fail with a usage error when -u or -p is missing
    #[arg(long)]
    pub strict: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Flags given on the command line, as a config layer.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            concurrency: self.concurrency,
            delay_ms: self.delay,
            strict: self.strict.then_some(true),
            urls: self.urls.clone(),
            params: self.params.clone(),
        }
    }

    pub fn output(&self) -> Output {
        Output::new(self.verbose > 0, self.quiet)
    }

    /// Execute a full generation run
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = self.output();

        let config = ConfigLoader::load(self.config.as_deref(), Some(self.overrides()))?.extract()?;
        tracing::debug!("Effective configuration: {:?}", config);

        let Some((urls, params)) = config.input_paths() else {
            if config.strict {
                bail!("both -u <FILE> and -p <FILE> are required (see --help)");
            }
            tracing::debug!("URL or parameter file not given, nothing to do");
            return Ok(());
        };

        let stdout = BufWriter::new(io::stdout());
        let stats = Dispatcher::from_config(&config).run(urls, params, stdout)?;

        output.verbose_summary("⚡", "Candidates generated", stats.candidates);
        output.verbose_breakdown("lines processed", stats.lines);
        output.verbose_breakdown("URLs extracted", stats.urls);
        if stats.skipped > 0 {
            output.warning(&format!("{} malformed URL(s) skipped", stats.skipped));
        }
        Ok(())
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::throttle_for;
    use clap::CommandFactory;
    use figment::Jail;
    use std::time::Duration;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags_map_to_overrides() {
        let cli = Cli::parse_from(["paramfuzz", "-c", "5", "-u", "urls.txt", "-p", "params.txt"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.concurrency, Some(5));
        assert_eq!(overrides.urls, Some(PathBuf::from("urls.txt")));
        assert_eq!(overrides.params, Some(PathBuf::from("params.txt")));
        assert_eq!(overrides.delay_ms, None);
        assert_eq!(overrides.strict, None);
    }

    #[test]
    fn test_strict_and_delay_flags() {
        let cli = Cli::parse_from(["paramfuzz", "--strict", "-d", "0", "-vv"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.strict, Some(true));
        assert_eq!(overrides.delay_ms, Some(0));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_delay_flag_reaches_throttle() {
        Jail::expect_with(|_jail| {
            let cli = Cli::parse_from(["paramfuzz", "-d", "25"]);
            let config = ConfigLoader::load(None, Some(cli.overrides()))
                .unwrap()
                .extract()
                .unwrap();
            assert_eq!(throttle_for(config.delay()).interval(), Duration::from_millis(25));

            let cli = Cli::parse_from(["paramfuzz", "-d", "0"]);
            let config = ConfigLoader::load(None, Some(cli.overrides()))
                .unwrap()
                .extract()
                .unwrap();
            assert_eq!(throttle_for(config.delay()).interval(), Duration::ZERO);
            Ok(())
        });
    }
}
