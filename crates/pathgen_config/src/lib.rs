//! # pathgen_config
//!
//! Runtime configuration for path simulations.
//!
//! Loads the shared simulation grid and the GBM and Heston model parameters
//! from TOML files and environment variables, and validates every section
//! before handing it to the generators.
//!
//! ## Architecture Position
//!
//! Part of the **I**nfra layer. Depends on the path layer only for the
//! parameter types it deserialises.
//!
//! ## Example
//!
//! ```rust
//! use pathgen_config::Settings;
//!
//! let settings = Settings::from_toml_str(
//!     r#"
//!     [simulation]
//!     n_paths = 500
//!     seed = 7
//!
//!     [heston]
//!     rho = -0.5
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.simulation.n_paths, 500);
//! assert_eq!(settings.heston.rho, -0.5);
//! assert_eq!(settings.gbm.volatility, 0.2);
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{Settings, ENV_PREFIX, ENV_SELECTOR};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ConfigError, Settings};
}
