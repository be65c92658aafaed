//! Progressfeed - JSON progress stream renderer
//!
//! CLI entry point: reads newline-delimited JSON messages and renders them
//! to stdout.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use progressfeed::{DisplayError, FeedConfig, StreamDisplay, StreamError, TerminalMode};

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "progressfeed.toml";

/// Render a JSON progress stream
///
/// Reads one JSON message per line and prints status lines, redrawing
/// progress bars in place when writing to a terminal.
#[derive(Parser, Debug)]
#[command(name = "progressfeed", version, about)]
struct Cli {
    /// Read messages from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Terminal width used for progress layout
    #[arg(long)]
    width: Option<u16>,

    /// Whether to treat stdout as an interactive terminal
    #[arg(long, value_enum)]
    terminal: Option<TerminalMode>,

    /// Skip the elapsed-time trailer
    #[arg(long)]
    no_summary: bool,
}

/// Load the explicit config, or the default one if present.
fn load_config(path: Option<&PathBuf>) -> Result<FeedConfig> {
    match path {
        Some(path) => FeedConfig::from_path(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display())),
        None => FeedConfig::from_optional_path(DEFAULT_CONFIG),
    }
}

/// Epoch seconds to measure the trailer from, or 0 to disable it.
fn summary_start(config: &FeedConfig, no_summary: bool) -> i64 {
    if config.display.summary && !no_summary {
        chrono::Utc::now().timestamp()
    } else {
        0
    }
}

/// Format an upstream failure for stderr.
fn error_line(err: &StreamError) -> String {
    format!("{} {err}", "error:".red().bold())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let stdout = io::stdout();
    let is_terminal = cli
        .terminal
        .unwrap_or(config.display.terminal)
        .resolve(stdout.is_terminal());
    let width = config.resolve_width(cli.width, std::env::var("COLUMNS").ok().as_deref());
    tracing::debug!(is_terminal, width, "starting display");

    let mut display = StreamDisplay::new(stdout.lock(), is_terminal)
        .width(width)
        .start_timestamp(summary_start(&config, cli.no_summary));

    let result = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input: {}", path.display()))?;
            display.display_reader(BufReader::new(file))
        }
        None => display.display_reader(io::stdin().lock()),
    };
    drop(display);

    match result {
        Ok(()) => Ok(()),
        Err(DisplayError::Stream(err)) => {
            if is_terminal {
                println!();
            }
            eprintln!("{}", error_line(&err));
            std::process::exit(1);
        }
        Err(err) => Err(err).context("Failed to display message stream"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["progressfeed"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.config.is_none());
        assert!(cli.width.is_none());
        assert!(cli.terminal.is_none());
        assert!(!cli.no_summary);
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::try_parse_from([
            "progressfeed",
            "--input",
            "pull.jsonl",
            "--width",
            "200",
            "--terminal",
            "always",
            "--no-summary",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("pull.jsonl")));
        assert_eq!(cli.width, Some(200));
        assert_eq!(cli.terminal, Some(TerminalMode::Always));
        assert!(cli.no_summary);
    }

    #[test]
    fn test_cli_rejects_unknown_terminal_mode() {
        assert!(Cli::try_parse_from(["progressfeed", "--terminal", "maybe"]).is_err());
    }

    #[test]
    fn test_load_explicit_missing_config_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("feed.toml");
        std::fs::write(&path, "[display]\nwidth = 132\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().display.width, 132);
    }

    #[test]
    fn test_summary_start_disabled() {
        let mut config = FeedConfig::default();
        assert_eq!(summary_start(&config, true), 0);
        config.display.summary = false;
        assert_eq!(summary_start(&config, false), 0);
    }

    #[test]
    fn test_summary_start_enabled() {
        assert!(summary_start(&FeedConfig::default(), false) > 0);
    }

    #[test]
    fn test_error_line_carries_message() {
        let line = error_line(&StreamError::new(404, "Can't find it"));
        assert!(line.contains("Can't find it"));
        assert!(!line.contains("404"));
    }
}
