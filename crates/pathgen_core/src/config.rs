//! Simulation grid and sampling configuration.
//!
//! This module provides [`SimulationConfig`], shared by every path generator:
//! horizon, step size, number of paths and an optional seed.

use crate::error::{Result, SimulationError};
use crate::grid::{TimeGrid, MAX_STEPS};

/// Default horizon in years.
pub const DEFAULT_MATURITY: f64 = 1.0;

/// Default step size in years (one trading day).
pub const DEFAULT_DT: f64 = 1.0 / 252.0;

/// Default number of simulated paths.
pub const DEFAULT_N_PATHS: usize = 1;

/// Simulation configuration.
///
/// Use [`SimulationConfig::builder`] to construct validated instances, or
/// [`Default`] for a one-year daily single-path unseeded run.
///
/// # Examples
///
/// ```rust
/// use pathgen_core::config::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .maturity(2.0)
///     .dt(0.25)
///     .n_paths(10_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths, 10_000);
/// assert_eq!(config.n_steps(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Time horizon T in years.
    pub maturity: f64,
    /// Step size in years.
    pub dt: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Optional seed for reproducibility.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of time steps, `floor(maturity / dt)`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        TimeGrid::step_count(self.maturity, self.dt)
    }

    /// Builds the time grid for this configuration.
    #[inline]
    pub fn time_grid(&self) -> TimeGrid {
        TimeGrid::new(self.maturity, self.dt)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if:
    /// - `maturity` is not positive and finite
    /// - `dt` is not positive and finite, or exceeds `maturity`
    /// - `n_paths` is 0
    pub fn validate(&self) -> Result<()> {
        if !(self.maturity > 0.0 && self.maturity.is_finite()) {
            return Err(SimulationError::invalid(
                "maturity",
                format!("must be positive and finite, got {}", self.maturity),
            ));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(SimulationError::invalid(
                "dt",
                format!("must be positive and finite, got {}", self.dt),
            ));
        }
        if self.dt > self.maturity {
            return Err(SimulationError::invalid(
                "dt",
                format!(
                    "must not exceed maturity {}, got {}",
                    self.maturity, self.dt
                ),
            ));
        }
        let ratio = self.maturity / self.dt;
        if !(ratio.is_finite() && ratio <= MAX_STEPS as f64) {
            return Err(SimulationError::invalid(
                "dt",
                format!(
                    "maturity / dt = {} exceeds the limit of {} steps",
                    ratio, MAX_STEPS
                ),
            ));
        }
        if self.n_paths == 0 {
            return Err(SimulationError::invalid("n_paths", "must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            maturity: DEFAULT_MATURITY,
            dt: DEFAULT_DT,
            n_paths: DEFAULT_N_PATHS,
            seed: None,
        }
    }
}

/// Builder for [`SimulationConfig`].
///
/// Unset fields fall back to the [`SimulationConfig`] defaults; the result is
/// validated at build time.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    maturity: Option<f64>,
    dt: Option<f64>,
    n_paths: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the time horizon in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the step size in years.
    #[inline]
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Sets the number of simulated paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if validation fails.
    pub fn build(self) -> Result<SimulationConfig> {
        let config = SimulationConfig {
            maturity: self.maturity.unwrap_or(DEFAULT_MATURITY),
            dt: self.dt.unwrap_or(DEFAULT_DT),
            n_paths: self.n_paths.unwrap_or(DEFAULT_N_PATHS),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SimulationConfig::default();
        assert_eq!(config.maturity, 1.0);
        assert_eq!(config.dt, 1.0 / 252.0);
        assert_eq!(config.n_paths, 1);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = SimulationConfig::builder().build().unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_builder_with_seed() {
        let config = SimulationConfig::builder()
            .n_paths(1000)
            .seed(42)
            .build()
            .unwrap();

        assert_eq!(config.n_paths, 1000);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_n_steps_truncates() {
        let config = SimulationConfig::builder()
            .maturity(1.0)
            .dt(0.3)
            .build()
            .unwrap();
        assert_eq!(config.n_steps(), 3);
    }

    #[test]
    fn test_invalid_zero_paths() {
        let result = SimulationConfig::builder().n_paths(0).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "n_paths",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_dt() {
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            let result = SimulationConfig::builder().dt(dt).build();
            assert!(
                matches!(result, Err(SimulationError::InvalidParameter { name: "dt", .. })),
                "dt = {} should be rejected",
                dt
            );
        }
    }

    #[test]
    fn test_dt_larger_than_maturity() {
        let result = SimulationConfig::builder().maturity(0.5).dt(1.0).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "dt", .. })
        ));
    }

    #[test]
    fn test_dt_equal_to_maturity_is_single_step() {
        let config = SimulationConfig::builder()
            .maturity(0.5)
            .dt(0.5)
            .build()
            .unwrap();
        assert_eq!(config.n_steps(), 1);
    }

    #[test]
    fn test_step_count_overflow_is_rejected() {
        for (maturity, dt) in [(1e300, 1e-300), (1.0, 1e-300), (1e10, 1e-5)] {
            let result = SimulationConfig::builder().maturity(maturity).dt(dt).build();
            assert!(
                matches!(result, Err(SimulationError::InvalidParameter { name: "dt", .. })),
                "maturity = {}, dt = {} should be rejected",
                maturity,
                dt
            );
        }
    }

    #[test]
    fn test_invalid_maturity() {
        let result = SimulationConfig::builder().maturity(0.0).build();
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter {
                name: "maturity",
                ..
            })
        ));
    }
}
