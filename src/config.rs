//! Display configuration parser
//!
//! Parses `progressfeed.toml` into display settings for the CLI. The
//! rendering core never reads this; the CLI resolves it into plain values.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::render::DEFAULT_WIDTH;

/// Whether output is treated as an interactive terminal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TerminalMode {
    /// Detect from the output handle
    #[default]
    Auto,
    /// Always redraw progress in place
    Always,
    /// Plain append-only output
    Never,
}

impl TerminalMode {
    /// Resolve against what detection reported
    #[must_use]
    pub const fn resolve(self, detected: bool) -> bool {
        match self {
            Self::Auto => detected,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Settings under `[display]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Fallback terminal width (default: 80)
    #[serde(default = "default_width")]
    pub width: u16,
    /// Terminal mode (default: auto)
    #[serde(default)]
    pub terminal: TerminalMode,
    /// Print an elapsed-time trailer after the stream (default: true)
    #[serde(default = "default_summary")]
    pub summary: bool,
}

const fn default_width() -> u16 {
    DEFAULT_WIDTH
}

const fn default_summary() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            terminal: TerminalMode::default(),
            summary: default_summary(),
        }
    }
}

/// Top-level configuration parsed from progressfeed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl FeedConfig {
    /// Parse a config file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse a config file if it exists, otherwise use defaults
    pub fn from_optional_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_path(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse config content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse progressfeed.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Pick the width: explicit flag, then `COLUMNS`, then config.
    #[must_use]
    pub fn resolve_width(&self, flag: Option<u16>, columns: Option<&str>) -> u16 {
        flag.filter(|w| *w > 0)
            .or_else(|| {
                columns
                    .and_then(|c| c.trim().parse::<u16>().ok())
                    .filter(|w| *w > 0)
            })
            .unwrap_or(self.display.width)
    }

    fn validate(&self) -> Result<()> {
        if self.display.width == 0 {
            bail!("display.width must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID_CONFIG: &str = r#"
[display]
width = 120
terminal = "never"
summary = false
"#;

    #[test]
    fn test_parse_valid_config() {
        let config = FeedConfig::parse(VALID_CONFIG).unwrap();
        assert_eq!(config.display.width, 120);
        assert_eq!(config.display.terminal, TerminalMode::Never);
        assert!(!config.display.summary);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = FeedConfig::parse("").unwrap();
        assert_eq!(config, FeedConfig::default());
        assert_eq!(config.display.width, 80);
        assert_eq!(config.display.terminal, TerminalMode::Auto);
        assert!(config.display.summary);
    }

    #[test]
    fn test_parse_rejects_zero_width() {
        let err = FeedConfig::parse("[display]\nwidth = 0\n").unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn test_parse_rejects_unknown_terminal_mode() {
        assert!(FeedConfig::parse("[display]\nterminal = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("progressfeed.toml");
        std::fs::write(&path, VALID_CONFIG).unwrap();

        let config = FeedConfig::from_path(&path).unwrap();
        assert_eq!(config.display.width, 120);
    }

    #[test]
    fn test_from_path_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(FeedConfig::from_path(tmp.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_from_optional_path_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = FeedConfig::from_optional_path(tmp.path().join("missing.toml")).unwrap();
        assert_eq!(config, FeedConfig::default());
    }

    #[test]
    fn test_resolve_width_precedence() {
        let config = FeedConfig::parse(VALID_CONFIG).unwrap();
        assert_eq!(config.resolve_width(Some(200), Some("150")), 200);
        assert_eq!(config.resolve_width(None, Some("150")), 150);
        assert_eq!(config.resolve_width(None, Some("wide")), 120);
        assert_eq!(config.resolve_width(Some(0), None), 120);
        assert_eq!(config.resolve_width(None, None), 120);
    }

    #[test]
    fn test_terminal_mode_resolve() {
        assert!(TerminalMode::Auto.resolve(true));
        assert!(!TerminalMode::Auto.resolve(false));
        assert!(TerminalMode::Always.resolve(false));
        assert!(!TerminalMode::Never.resolve(true));
    }
}
