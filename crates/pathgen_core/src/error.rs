//! Error types for path simulation.
//!
//! This module defines structured error types for parameter validation,
//! correlation factorisation and path table assembly.

use thiserror::Error;

/// Convenience alias for results produced by the simulation kernel.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Simulation error.
///
/// Returned when a generator is called with parameters that fail
/// precondition checks, or when an intermediate numerical step cannot be
/// carried out.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum SimulationError {
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// Correlation matrix could not be built or factorised.
    #[error(transparent)]
    Correlation(#[from] CorrelationError),

    /// Path table rows do not match the time grid.
    #[error("Path table shape mismatch: expected {expected} values, got {got}")]
    ShapeMismatch {
        /// Expected number of values.
        expected: usize,
        /// Actual number of values.
        got: usize,
    },
}

impl SimulationError {
    /// Shorthand for [`SimulationError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Error types for correlation operations.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum CorrelationError {
    /// Matrix is not positive semi-definite.
    #[error("Correlation matrix is not positive semi-definite")]
    NotPositiveSemiDefinite,

    /// Matrix dimensions are invalid.
    #[error("Invalid matrix dimensions: expected {expected} elements, got {got}")]
    InvalidDimensions {
        /// Expected element count (dim * dim).
        expected: usize,
        /// Supplied element count.
        got: usize,
    },

    /// Diagonal element is not 1.0.
    #[error("Diagonal element at index {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Matrix is not symmetric.
    #[error("Matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },

    /// Correlation value out of range [-1, 1].
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Offending value.
        value: f64,
    },
}
