//! Settings for the `collision_report` binary.
//!
//! Layers, lowest to highest precedence:
//!
//! 1. [`ReportConfig::default`]
//! 2. A TOML file passed as `--config <path>`
//! 3. `NEXUS_BUCKETS_*` environment variables
//! 4. A positional names-file path
//!
//! ```toml
//! names_path = "data/female_names.txt"
//! bucket_count = 5000
//! probe_keys = ["Alice", "Emma", "Olivia"]
//! format = "json"
//! latency_rounds = 1000
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Format;

/// Names file path override.
pub const ENV_NAMES: &str = "NEXUS_BUCKETS_NAMES";
/// Bucket count override.
pub const ENV_BUCKETS: &str = "NEXUS_BUCKETS_BUCKETS";
/// Comma-separated probe keys override.
pub const ENV_PROBES: &str = "NEXUS_BUCKETS_PROBES";
/// Output format override (`text` or `json`).
pub const ENV_FORMAT: &str = "NEXUS_BUCKETS_FORMAT";
/// Latency rounds override.
pub const ENV_LATENCY_ROUNDS: &str = "NEXUS_BUCKETS_LATENCY_ROUNDS";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid TOML for [`ReportConfig`].
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Environment variable error: {0}")]
    Environment(String),

    /// Command-line arguments could not be parsed.
    #[error("Argument error: {0}")]
    Arguments(String),

    /// A setting is out of range.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Report harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// File with one key per line.
    pub names_path: PathBuf,
    /// Buckets per table.
    pub bucket_count: usize,
    /// Keys inserted and looked up by the timing pass.
    pub probe_keys: Vec<String>,
    /// Output format.
    pub format: Format,
    /// Rounds of repeated lookups for the latency histogram; `0` skips it.
    pub latency_rounds: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            names_path: PathBuf::from("female_names.txt"),
            bucket_count: 5000,
            probe_keys: vec!["Alice".into(), "Emma".into(), "Olivia".into()],
            format: Format::Text,
            latency_rounds: 0,
        }
    }
}

impl ReportConfig {
    /// Parses a TOML document. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input or unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Toml`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Applies `NEXUS_BUCKETS_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] if a numeric or format override
    /// does not parse.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|name| env::var(name).ok())
    }

    /// Applies overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] if a numeric or format override
    /// does not parse.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_NAMES) {
            self.names_path = PathBuf::from(path);
        }
        if let Some(buckets) = lookup(ENV_BUCKETS) {
            self.bucket_count = buckets
                .trim()
                .parse()
                .map_err(|_| ConfigError::Environment(format!("Invalid {ENV_BUCKETS}")))?;
        }
        if let Some(probes) = lookup(ENV_PROBES) {
            self.probe_keys = probes
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format
                .parse()
                .map_err(|e| ConfigError::Environment(format!("Invalid {ENV_FORMAT}: {e}")))?;
        }
        if let Some(rounds) = lookup(ENV_LATENCY_ROUNDS) {
            self.latency_rounds = rounds
                .trim()
                .parse()
                .map_err(|_| ConfigError::Environment(format!("Invalid {ENV_LATENCY_ROUNDS}")))?;
        }
        Ok(self)
    }

    /// Checks settings that would make the tables unusable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `bucket_count` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(ConfigError::Validation(
                "bucket_count must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the full configuration from command-line arguments (program
    /// name excluded) and the process environment.
    ///
    /// # Errors
    ///
    /// Propagates any layer's error, then validation.
    pub fn load<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        Self::load_with(args, |name| env::var(name).ok())
    }

    /// [`load`](Self::load) with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Propagates any layer's error, then validation.
    pub fn load_with<I, F>(args: I, lookup: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let args = Args::parse(args)?;

        let config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let mut config = config.apply_env_from(lookup)?;
        if let Some(path) = args.names_path {
            config.names_path = path;
        }

        config.validate()?;
        tracing::debug!(?config, "resolved report config");
        Ok(config)
    }
}

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    names_path: Option<PathBuf>,
}

impl Args {
    fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            if arg == "--config" || arg == "-c" {
                let path = args
                    .next()
                    .ok_or_else(|| ConfigError::Arguments(format!("{arg} needs a path")))?;
                parsed.config = Some(PathBuf::from(path));
            } else if let Some(path) = arg.strip_prefix("--config=") {
                parsed.config = Some(PathBuf::from(path));
            } else if arg.starts_with('-') && arg.len() > 1 {
                return Err(ConfigError::Arguments(format!("unknown option '{arg}'")));
            } else if parsed.names_path.is_none() {
                parsed.names_path = Some(PathBuf::from(arg));
            } else {
                return Err(ConfigError::Arguments(format!("unexpected argument '{arg}'")));
            }
        }

        Ok(parsed)
    }
}
