use std::path::Path;

use miette::{Context, Diagnostic, IntoDiagnostic};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::render::OutputFormat;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("can't read detectai config file {path}")]
    #[diagnostic(code(detectai::config::read))]
    CantRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid detectai config file {path}")]
    #[diagnostic(
        code(detectai::config::invalid),
        help("Fix the file by hand or run `detectai config reset`")
    )]
    Invalid {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackendConfig {
    pub url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::CantRead {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> miette::Result<()> {
        let contents = toml::to_string_pretty(self).into_diagnostic()?;

        std::fs::write(path, contents)
            .into_diagnostic()
            .with_context(|| format!("saving detectai config to {}", path.display()))
    }
}

pub fn ensure_global_config() -> miette::Result<()> {
    let path = crate::home::config_path()?;

    if !path.exists() {
        Config::default().save(&path)?;
        debug!(path = %path.display(), "created default global config");
    }

    Ok(())
}

pub fn read_config() -> miette::Result<Config> {
    let path = crate::home::config_path()?;
    Ok(Config::load(&path)?)
}

pub fn save_config(config: &Config) -> miette::Result<()> {
    let path = crate::home::config_path()?;
    config.save(&path)
}
