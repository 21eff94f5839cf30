//! Settings and configuration structures.

use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use pathgen_core::SimulationConfig;
use pathgen_models::{GbmParams, HestonParams};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Prefix of environment overrides, e.g. `PATHGEN__SIMULATION__N_PATHS`.
pub const ENV_PREFIX: &str = "PATHGEN";

/// Environment variable selecting the profile file under `config/`.
pub const ENV_SELECTOR: &str = "PATHGEN_ENV";

/// Main simulation settings.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Time grid, path count and seed
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// GBM model parameters
    #[serde(default)]
    pub gbm: GbmParams,
    /// Heston model parameters
    #[serde(default)]
    pub heston: HestonParams,
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `PATHGEN_ENV`)
    /// 3. Environment variables prefixed with `PATHGEN__`
    ///
    /// The `config/` directory is resolved against the current working
    /// directory of the process; missing files are skipped. Use
    /// [`Settings::load_from`] to read another directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Same layering as [`Settings::load`], reading files from `config_dir`.
    pub fn load_from(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = config_dir.as_ref();
        let env = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".into());
        let default_file = dir.join("default");
        let profile_file = dir.join(&env);

        let config = Config::builder()
            .add_source(File::from(default_file).required(false))
            .add_source(File::from(profile_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        debug!(dir = %dir.display(), profile = %env, ?settings, "settings loaded");
        Ok(settings)
    }

    /// Parse settings from a TOML document; missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation
            .validate()
            .map_err(|source| ConfigError::InvalidSection {
                section: "simulation",
                source,
            })?;
        self.gbm
            .validate()
            .map_err(|source| ConfigError::InvalidSection {
                section: "gbm",
                source,
            })?;
        self.heston
            .validate()
            .map_err(|source| ConfigError::InvalidSection {
                section: "heston",
                source,
            })?;
        Ok(())
    }
}
