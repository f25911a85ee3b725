//! Report configuration
//!
//! Settings are read from the `[report]` section of `config/config.toml`
//! (optional) and from environment variables such as
//! `MIGREPORT__REPORT__COLOR=never`. Command line flags take precedence over
//! both; that layering is left to the binary.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config/config.toml";

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "MIGREPORT";

/// When to emit ANSI styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Style when the terminal supports it
    #[default]
    Auto,
    Always,
    Never,
}

/// Which presentation to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    #[serde(default)]
    pub color: ColorChoice,
    #[serde(default)]
    pub format: OutputFormat,
    /// Snapshot file, `-` for stdin
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Verify batch coherence before rendering
    #[serde(default)]
    pub check_coherence: bool,
}

impl ReportConfig {
    /// Load the report configuration from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(Some(Path::new(DEFAULT_CONFIG_FILE)), ENV_PREFIX)
    }

    /// Load from an optional TOML file layered under environment variables with `env_prefix`
    pub fn from_sources(file: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        Self::from_layers(file, Environment::with_prefix(env_prefix).separator("__"))
    }

    fn from_layers(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(File::from(file).required(false));
        }

        let settings = match builder.add_source(env.clone()).build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // A present but broken file should not block env-only configuration
                if file.is_some_and(Path::exists) {
                    log::warn!("failed to load config file, falling back to env: {err}");
                }
                Config::builder().add_source(env).build().map_err(|env_err| {
                    ConfigError::Message(format!(
                        "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                    ))
                })?
            }
        };

        match settings.get::<ReportConfig>("report") {
            Ok(report) => Ok(report),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Report configuration could not be loaded from file or environment: {e}"
            ))),
        }
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!(
                "invalid color choice '{other}', expected auto, always or never"
            )),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" => Ok(Self::Terminal),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "invalid output format '{other}', expected terminal or json"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Terminal => "terminal",
            Self::Json => "json",
        })
    }
}
