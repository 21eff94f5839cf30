//! # Pathgen Core (Path Layer: Kernel Foundation)
//!
//! Building blocks shared by the price path generators:
//!
//! - [`config`]: horizon, step size, path count and seed
//! - [`grid`]: the `[0, T]` time grid with floor-truncated step count
//! - [`table`]: the time-indexed [`PathTable`] returned to callers
//! - [`rng`]: per-call seeded or entropy-initialised generator
//! - [`correlation`]: correlation matrices and Cholesky factors
//! - [`error`]: structured error types
//!
//! ## Design Principles
//!
//! - **No global state**: every simulation owns its [`SimRng`]
//! - **Row-major layout**: one row per time point, one column per path
//! - **Fail fast**: invalid configurations are rejected before any draw

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod correlation;
pub mod error;
pub mod grid;
pub mod rng;
pub mod table;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use correlation::{CholeskyFactor, CorrelationMatrix};
pub use error::{CorrelationError, Result, SimulationError};
pub use grid::TimeGrid;
pub use rng::SimRng;
pub use table::{PathTable, PathTableBuilder};
