//! Configuration errors.

use pathgen_core::SimulationError;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A loaded section failed validation
    #[error("Invalid '{section}' configuration: {source}")]
    InvalidSection {
        /// Section name (`simulation`, `gbm` or `heston`)
        section: &'static str,
        /// Validation failure
        #[source]
        source: SimulationError,
    },

    /// Underlying config crate error
    #[error("Configuration error: {0}")]
    ConfigCrateError(#[from] config::ConfigError),
}
