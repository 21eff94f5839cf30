//! # Random Number Generation
//!
//! Per-call pseudo-random number generation for path simulation.
//!
//! Every simulation owns one [`SimRng`] and threads it through the step loop
//! explicitly. There is no process-wide generator: two simulations never
//! observe each other's stream, and concurrent simulations on separate
//! threads stay reproducible.
//!
//! ## Usage Example
//!
//! ```rust
//! use pathgen_core::rng::SimRng;
//!
//! // Seeded generator for reproducible simulations
//! let mut rng = SimRng::from_seed(12345);
//!
//! // Standard normal variate (mean=0, std=1)
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//!
//! // Batch generation into a pre-allocated buffer
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::SimRng;
