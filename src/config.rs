//! Configuration for the task list.
//!
//! Layered with the following priority (highest first):
//! 1. CLI arguments
//! 2. TOML config file (`<config_dir>/tasklist/config.toml`)
//! 3. Compiled defaults
//!
//! A missing default config file is not an error. An explicit `--config`
//! path that can't be read is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::Cli;
use crate::fields::Filter;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Top-level TOML config file structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    ui: UiFileConfig,
    log: LogFileConfig,
}

/// `[ui]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    default_filter: Option<Filter>,
}

/// `[log]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogFileConfig {
    level: Option<String>,
    file: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long the TUI waits for an input event before redrawing.
    pub poll_timeout: Duration,
    /// Filter both the TUI and the script runner start with.
    pub default_filter: Filter,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(50),
            default_filter: Filter::All,
            log_level: "info".to_string(),
            log_file: std::env::temp_dir().join("tasklist.log"),
        }
    }
}

impl Config {
    /// Load the config file named by `--config` (or the default path) and
    /// merge it with the command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    fn resolve(cli: &Cli, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            default_filter: file.ui.default_filter.unwrap_or(defaults.default_filter),
            log_level: cli
                .log_level
                .clone()
                .or_else(|| file.log.level.clone())
                .unwrap_or(defaults.log_level),
            log_file: cli
                .log_file
                .clone()
                .or_else(|| file.log.file.clone())
                .unwrap_or(defaults.log_file),
        }
    }
}

/// Default config file location, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tasklist").join("config.toml"))
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(path) = default_config_path() else {
        return Ok(ConfigFile::default());
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("todo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.poll_timeout, Duration::from_millis(50));
        assert_eq!(config.default_filter, Filter::All);
        assert_eq!(config.log_level, "info");
        assert!(config.log_file.ends_with("tasklist.log"));
    }

    #[test]
    fn test_toml_full() {
        let toml_str = r#"
[ui]
poll_timeout_ms = 200
default_filter = "incomplete"

[log]
level = "debug"
file = "/var/log/tasklist.log"
"#;
        let file: ConfigFile = toml::from_str(toml_str).unwrap();
        let config = Config::resolve(&cli(&[]), &file);
        assert_eq!(config.poll_timeout, Duration::from_millis(200));
        assert_eq!(config.default_filter, Filter::Incomplete);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, PathBuf::from("/var/log/tasklist.log"));
    }

    #[test]
    fn test_toml_partial_and_empty() {
        let file: ConfigFile = toml::from_str("[ui]\ndefault_filter = \"completed\"\n").unwrap();
        let config = Config::resolve(&cli(&[]), &file);
        assert_eq!(config.default_filter, Filter::Completed);
        assert_eq!(config.poll_timeout, Duration::from_millis(50));

        let file: ConfigFile = toml::from_str("").unwrap();
        let config = Config::resolve(&cli(&[]), &file);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_toml_rejects_unknown_filter() {
        let res: Result<ConfigFile, _> = toml::from_str("[ui]\ndefault_filter = \"someday\"\n");
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: ConfigFile = toml::from_str("[log]\nlevel = \"warn\"\nfile = \"/a.log\"\n").unwrap();
        let cli = cli(&["--log-level", "trace", "--log-file", "/b.log", "run"]);
        let config = Config::resolve(&cli, &file);
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.log_file, PathBuf::from("/b.log"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = std::env::temp_dir().join("tasklist-no-such-config.toml");
        let err = load_config_file(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
