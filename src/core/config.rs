//! Configuration file handling
//!
//! A config file is YAML with three optional sections (`process`,
//! `economics`, `sweep`). Missing fields take the built-in defaults; command
//! line flags override whatever the file says.
//!
//! Lookup order:
//! 1. an explicit path (`--config` or `FABYIELD_CONFIG`)
//! 2. `fabyield.yaml` in the working directory
//! 3. `config.yaml` in the user config directory
//! 4. built-in defaults

use directories::ProjectDirs;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::error::Error as ParameterError;
use crate::core::params::{
    EconomicsInputs, EconomicsSettings, ProcessParameters, ProcessSettings,
};
use crate::core::pipeline::SweepSpec;
use crate::yaml::{parse_yaml_file, YamlError};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "fabyield.yaml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "FABYIELD_CONFIG";

const HEADER: &str = "\
# fabyield configuration
#
# process:   wafer geometry, defect statistics and yield model
# economics: wafer cost, repair and utilization
# sweep:     defect-density range for `fabyield sweep`
#
# Any field may be removed; command line flags override these values.
";

/// Errors that can occur while loading or writing configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("Invalid value in {path}: {source}")]
    Invalid {
        path: String,
        #[source]
        source: ParameterError,
    },

    #[error("Config file already exists: {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    WorkingDir(PathBuf),
    User(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::WorkingDir(p) | ConfigSource::User(p) => {
                Some(p)
            }
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "built-in defaults"),
        }
    }
}

/// Default settings for every command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub process: ProcessSettings,
    pub economics: EconomicsSettings,
    pub sweep: SweepSpec,
}

impl Config {
    /// Path of the per-user config file, if the platform has a config dir
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "fabyield").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Pick the config file to use without reading it
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        let local = working_dir.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return ConfigSource::WorkingDir(local);
        }

        match Self::user_config_path() {
            Some(user) if user.is_file() => ConfigSource::User(user),
            _ => ConfigSource::Defaults,
        }
    }

    /// Discover and load the configuration
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let source = Self::discover(explicit, working_dir);
        let config = match source.path() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        tracing::info!(source = %source, "loaded configuration");
        Ok((config, source))
    }

    /// Read and validate one config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: Config = parse_yaml_file(path)?;
        config.validate().map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// Check every section against its domain
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.process.build()?;
        self.economics.build()?;
        self.sweep.validate()
    }

    pub fn process_parameters(&self) -> Result<ProcessParameters, ParameterError> {
        self.process.build()
    }

    pub fn economics_inputs(&self) -> Result<EconomicsInputs, ParameterError> {
        self.economics.build()
    }

    /// YAML rendering of the configuration (no header)
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Write a commented default config file into `dir`
    pub fn write_default(dir: &Path, force: bool) -> Result<PathBuf, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists(path));
        }

        let body = Self::default().to_yaml()?;
        std::fs::write(&path, format!("{HEADER}\n{body}"))?;
        tracing::info!(path = %path.display(), "wrote default configuration");
        Ok(path)
    }
}
