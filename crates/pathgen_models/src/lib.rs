//! # Pathgen Models (Path Layer: Generators)
//!
//! Synthetic asset-price path generators:
//!
//! - [`gbm`]: Geometric Brownian Motion via the exact lognormal update
//! - [`heston`]: Heston stochastic volatility via full-truncation
//!   Euler-Maruyama with Cholesky-correlated shocks
//!
//! Both generators take model parameters plus a shared
//! [`SimulationConfig`](pathgen_core::SimulationConfig) and return a
//! [`PathTable`](pathgen_core::PathTable) with one row per time point and one
//! column per path.
//!
//! ## Example
//!
//! ```
//! use pathgen_core::SimulationConfig;
//! use pathgen_models::{generate_gbm_paths, generate_heston_paths, GbmParams, HestonParams};
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(1_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let gbm = generate_gbm_paths(&GbmParams::default(), &config).unwrap();
//! let heston = generate_heston_paths(&HestonParams::default(), &config).unwrap();
//! assert_eq!(gbm.shape(), heston.shape());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod gbm;
pub mod heston;

pub use gbm::{generate_gbm_paths, generate_gbm_paths_with_rng, GbmParams};
pub use heston::{
    generate_heston_paths, generate_heston_paths_with_rng, generate_heston_paths_with_variance,
    HestonParams, HestonPaths,
};
