//! Heston stochastic volatility path generation.
//!
//! The Heston model is described by the SDEs:
//! ```text
//! dS = mu * S * dt + sqrt(v) * S * dW_S
//! dv = kappa * (theta - v) * dt + xi * sqrt(v) * dW_v
//! E[dW_S * dW_v] = rho * dt
//! ```
//! where:
//! - S = asset price
//! - v = instantaneous variance
//! - mu = drift
//! - kappa = mean-reversion speed
//! - theta = long-run variance
//! - xi = volatility of variance (vol-of-vol)
//! - rho = correlation between price and variance shocks
//!
//! ## Discretisation
//!
//! Euler-Maruyama with full truncation. At every step the previous variance
//! is floored at zero before it enters the drift and diffusion terms, and
//! the updated variance is floored again, so `v[t] >= 0` for all `t`
//! regardless of the Feller condition. The price uses an absolute Euler
//! step (not log-Euler); very coarse steps or extreme parameters can push a
//! price to zero or below and this is left uncorrected.
//!
//! ## Feller condition
//!
//! The continuous-time variance stays strictly positive when
//! ```text
//! 2 * kappa * theta > xi^2
//! ```
//! Violating it is allowed; truncation keeps the discrete variance
//! well-defined.

use pathgen_core::{
    CorrelationMatrix, PathTable, PathTableBuilder, Result, SimRng, SimulationConfig,
    SimulationError,
};
use tracing::{debug, trace};

/// Heston model parameters.
///
/// # Examples
///
/// ```
/// use pathgen_models::heston::HestonParams;
///
/// let params = HestonParams::default();
/// assert_eq!(params.rho, -0.7);
///
/// // 2 * 2.0 * 0.04 = 0.16 < 0.5^2 = 0.25
/// assert!(!params.satisfies_feller());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HestonParams {
    /// Initial price S0 (must be positive).
    pub spot: f64,
    /// Initial variance v0 (non-negative).
    pub v0: f64,
    /// Drift mu of the price.
    pub drift: f64,
    /// Mean-reversion speed kappa (non-negative).
    pub kappa: f64,
    /// Long-run variance theta (non-negative).
    pub theta: f64,
    /// Volatility of variance xi (non-negative).
    pub xi: f64,
    /// Price/variance correlation rho in [-1, 1].
    pub rho: f64,
}

impl HestonParams {
    /// Creates validated Heston parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] for the first parameter
    /// that violates its constraint.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        v0: f64,
        drift: f64,
        kappa: f64,
        theta: f64,
        xi: f64,
        rho: f64,
    ) -> Result<Self> {
        let params = Self {
            spot,
            v0,
            drift,
            kappa,
            theta,
            xi,
            rho,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(SimulationError::invalid(
                "spot",
                format!("must be positive and finite, got {}", self.spot),
            ));
        }
        if !self.drift.is_finite() {
            return Err(SimulationError::invalid(
                "drift",
                format!("must be finite, got {}", self.drift),
            ));
        }

        let non_negative = [
            ("v0", self.v0),
            ("kappa", self.kappa),
            ("theta", self.theta),
            ("xi", self.xi),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(SimulationError::invalid(
                    name,
                    format!("must be non-negative and finite, got {}", value),
                ));
            }
        }

        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(SimulationError::invalid(
                "rho",
                format!("must be in [-1, 1], got {}", self.rho),
            ));
        }
        Ok(())
    }

    /// Whether `2 * kappa * theta > xi^2`.
    ///
    /// ```
    /// use pathgen_models::heston::HestonParams;
    ///
    /// let params = HestonParams { kappa: 1.5, xi: 0.3, ..HestonParams::default() };
    /// assert!(params.satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.xi * self.xi
    }

    /// Feller ratio `2 * kappa * theta / xi^2`; infinite when `xi = 0`.
    pub fn feller_ratio(&self) -> f64 {
        let denominator = self.xi * self.xi;
        if denominator > 0.0 {
            2.0 * self.kappa * self.theta / denominator
        } else {
            f64::INFINITY
        }
    }
}

impl Default for HestonParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            v0: 0.04,
            drift: 0.0,
            kappa: 2.0,
            theta: 0.04,
            xi: 0.5,
            rho: -0.7,
        }
    }
}

/// Price and variance paths of one Heston simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct HestonPaths {
    /// Simulated prices.
    pub prices: PathTable,
    /// Simulated (truncated, non-negative) variance.
    pub variance: PathTable,
}

/// Generates Heston price paths.
///
/// The variance process is simulated alongside but not returned; use
/// [`generate_heston_paths_with_variance`] to keep it.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidParameter`] if `params` or `config`
/// fail validation.
///
/// # Examples
///
/// ```rust
/// use pathgen_core::SimulationConfig;
/// use pathgen_models::heston::{generate_heston_paths, HestonParams};
///
/// let config = SimulationConfig::builder()
///     .maturity(1.0)
///     .dt(0.25)
///     .n_paths(3)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let prices = generate_heston_paths(&HestonParams::default(), &config).unwrap();
/// assert_eq!(prices.shape(), (5, 3));
/// assert_eq!(prices.times(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn generate_heston_paths(params: &HestonParams, config: &SimulationConfig) -> Result<PathTable> {
    let mut rng = SimRng::from_optional_seed(config.seed);
    generate_heston_paths_with_rng(params, config, &mut rng)
}

/// Generates Heston price paths drawing from a caller-owned generator.
///
/// `config.seed` is ignored. Each step consumes `2 * n_paths` normal draws:
/// `n_paths` price shocks followed by `n_paths` variance shocks.
pub fn generate_heston_paths_with_rng(
    params: &HestonParams,
    config: &SimulationConfig,
    rng: &mut SimRng,
) -> Result<PathTable> {
    simulate(params, config, rng, None)
}

/// Generates Heston price and variance paths.
///
/// Both tables share the same time grid, and for a given seed the prices
/// are identical to those of [`generate_heston_paths`].
pub fn generate_heston_paths_with_variance(
    params: &HestonParams,
    config: &SimulationConfig,
) -> Result<HestonPaths> {
    config.validate()?;
    let mut rng = SimRng::from_optional_seed(config.seed);
    let mut variance = PathTableBuilder::new(config.time_grid(), config.n_paths)?;
    let prices = simulate(params, config, &mut rng, Some(&mut variance))?;
    Ok(HestonPaths {
        prices,
        variance: variance.finish()?,
    })
}

/// Full-truncation Euler-Maruyama loop shared by every entry point.
fn simulate(
    params: &HestonParams,
    config: &SimulationConfig,
    rng: &mut SimRng,
    mut variance_out: Option<&mut PathTableBuilder>,
) -> Result<PathTable> {
    params.validate()?;
    config.validate()?;

    let grid = config.time_grid();
    let n_steps = grid.n_steps();
    let n_paths = config.n_paths;

    debug!(
        model = "Heston",
        n_steps,
        n_paths,
        seed = ?rng.seed(),
        "generating paths"
    );
    if !params.satisfies_feller() {
        debug!(
            feller_ratio = params.feller_ratio(),
            "Feller condition violated; variance may reach zero and will be truncated"
        );
    }

    // Constant across steps: factor once.
    let cholesky = CorrelationMatrix::two_factor(params.rho)?.cholesky()?;

    let dt = config.dt;
    let sqrt_dt = dt.sqrt();
    let HestonParams {
        drift,
        kappa,
        theta,
        xi,
        ..
    } = *params;

    let mut prices = PathTableBuilder::new(grid, n_paths)?;
    let mut spot = vec![params.spot; n_paths];
    let mut variance = vec![params.v0; n_paths];
    let mut z_price = vec![0.0; n_paths];
    let mut z_variance = vec![0.0; n_paths];
    let mut shock = [0.0; 2];

    prices.push_row(&spot)?;
    if let Some(out) = variance_out.as_deref_mut() {
        out.push_row(&variance)?;
    }

    for _ in 0..n_steps {
        rng.fill_normal(&mut z_price);
        rng.fill_normal(&mut z_variance);

        let paths = spot
            .iter_mut()
            .zip(variance.iter_mut())
            .zip(z_price.iter().zip(&z_variance));
        for ((s, v), (&z0, &z1)) in paths {
            cholesky.transform_into(&[z0, z1], &mut shock);
            let dw_s = shock[0] * sqrt_dt;
            let dw_v = shock[1] * sqrt_dt;

            let v_prev = v.max(0.0);
            let sqrt_v = v_prev.sqrt();

            let dv = kappa * (theta - v_prev) * dt + xi * sqrt_v * dw_v;
            *v = (v_prev + dv).max(0.0);

            let s_prev = *s;
            *s = s_prev + drift * s_prev * dt + sqrt_v * s_prev * dw_s;
        }

        prices.push_row(&spot)?;
        if let Some(out) = variance_out.as_deref_mut() {
            out.push_row(&variance)?;
        }
    }

    let table = prices.finish()?;
    trace!(
        model = "Heston",
        terminal_mean = table.row_mean(n_steps),
        "paths generated"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(maturity: f64, dt: f64, n_paths: usize, seed: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .maturity(maturity)
            .dt(dt)
            .n_paths(n_paths)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_params_default() {
        let p = HestonParams::default();
        assert_eq!(p.spot, 100.0);
        assert_eq!(p.v0, 0.04);
        assert_eq!(p.drift, 0.0);
        assert_eq!(p.kappa, 2.0);
        assert_eq!(p.theta, 0.04);
        assert_eq!(p.xi, 0.5);
        assert_eq!(p.rho, -0.7);
    }

    #[test]
    fn test_params_validation() {
        assert!(HestonParams::new(100.0, 0.04, 0.05, 2.0, 0.04, 0.5, -0.7).is_ok());
        // Zero variance and zero vol-of-vol are allowed
        assert!(HestonParams::new(100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0).is_ok());

        let cases: [(&str, HestonParams); 6] = [
            ("spot", HestonParams { spot: 0.0, ..Default::default() }),
            ("v0", HestonParams { v0: -0.01, ..Default::default() }),
            ("kappa", HestonParams { kappa: -1.0, ..Default::default() }),
            ("theta", HestonParams { theta: f64::NAN, ..Default::default() }),
            ("xi", HestonParams { xi: -0.5, ..Default::default() }),
            ("rho", HestonParams { rho: 1.2, ..Default::default() }),
        ];
        for (expected, params) in cases {
            match params.validate() {
                Err(SimulationError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected {} to be rejected, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_feller() {
        let params = HestonParams {
            kappa: 1.5,
            theta: 0.04,
            xi: 0.3,
            ..Default::default()
        };
        assert!(params.satisfies_feller());
        assert_relative_eq!(params.feller_ratio(), 0.12 / 0.09, epsilon = 1e-12);

        let no_vol_of_vol = HestonParams {
            xi: 0.0,
            ..Default::default()
        };
        assert_eq!(no_vol_of_vol.feller_ratio(), f64::INFINITY);
    }

    #[test]
    fn test_zero_variance_is_deterministic_euler_growth() {
        let params = HestonParams::new(100.0, 0.0, 0.05, 0.0, 0.0, 0.0, -0.7).unwrap();
        let dt = 0.01;
        let prices = generate_heston_paths(&params, &config(0.5, dt, 4, 3)).unwrap();

        let mut expected = 100.0;
        for row in prices.iter_rows() {
            for &s in row {
                assert_relative_eq!(s, expected, max_relative = 1e-12);
            }
            expected += 0.05 * expected * dt;
        }
    }

    #[test]
    fn test_constant_variance_without_vol_of_vol() {
        // xi = 0 and v0 = theta: the variance never moves.
        let params = HestonParams {
            xi: 0.0,
            ..Default::default()
        };
        let paths =
            generate_heston_paths_with_variance(&params, &config(1.0, 0.01, 5, 9)).unwrap();
        for row in paths.variance.iter_rows() {
            for &v in row {
                assert_relative_eq!(v, 0.04, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn test_matches_manual_recursion() {
        let params = HestonParams {
            drift: 0.03,
            ..Default::default()
        };
        let cfg = config(0.05, 0.01, 3, 123);
        let paths = generate_heston_paths_with_variance(&params, &cfg).unwrap();

        let rho: f64 = -0.7;
        let (l10, l11) = (rho, (1.0 - rho * rho).sqrt());
        let dt: f64 = 0.01;
        let sqrt_dt = dt.sqrt();

        let mut rng = SimRng::from_seed(123);
        let mut s: Vec<f64> = vec![100.0; 3];
        let mut v: Vec<f64> = vec![0.04; 3];
        for step in 1..paths.prices.n_rows() {
            let z0: Vec<f64> = (0..3).map(|_| rng.gen_normal()).collect();
            let z1: Vec<f64> = (0..3).map(|_| rng.gen_normal()).collect();
            for p in 0..3 {
                let dw_s = 1.0 * z0[p] * sqrt_dt;
                let dw_v = (l10 * z0[p] + l11 * z1[p]) * sqrt_dt;
                let v_prev = v[p].max(0.0);
                let dv = 2.0 * (0.04 - v_prev) * dt + 0.5 * v_prev.sqrt() * dw_v;
                v[p] = (v_prev + dv).max(0.0);
                s[p] = s[p] + 0.03 * s[p] * dt + v_prev.sqrt() * s[p] * dw_s;
            }
            assert_eq!(paths.prices.row(step), s.as_slice());
            assert_eq!(paths.variance.row(step), v.as_slice());
        }
    }

    #[test]
    fn test_perfect_correlation_drives_variance_with_price_shock() {
        // rho = 1: L = [[1, 0], [1, 0]], so the variance shock ignores z1.
        let params = HestonParams {
            rho: 1.0,
            ..Default::default()
        };
        let cfg = config(0.03, 0.01, 2, 55);
        let paths = generate_heston_paths_with_variance(&params, &cfg).unwrap();

        let dt: f64 = 0.01;
        let sqrt_dt = dt.sqrt();
        let mut rng = SimRng::from_seed(55);
        let mut v: Vec<f64> = vec![0.04; 2];
        for step in 1..paths.variance.n_rows() {
            let z0: Vec<f64> = (0..2).map(|_| rng.gen_normal()).collect();
            let _z1: Vec<f64> = (0..2).map(|_| rng.gen_normal()).collect();
            for p in 0..2 {
                let v_prev = v[p].max(0.0);
                let dv = 2.0 * (0.04 - v_prev) * dt + 0.5 * v_prev.sqrt() * (z0[p] * sqrt_dt);
                v[p] = (v_prev + dv).max(0.0);
            }
            assert_eq!(paths.variance.row(step), v.as_slice());
        }
    }

    #[test]
    fn test_overflowing_step_count_is_rejected() {
        let cfg = SimulationConfig {
            maturity: 1e300,
            dt: 1e-300,
            n_paths: 1,
            seed: Some(1),
        };
        let result = generate_heston_paths_with_variance(&HestonParams::default(), &cfg);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "dt", .. })
        ));
    }

    #[test]
    fn test_variance_never_negative_under_extreme_vol_of_vol() {
        let params = HestonParams {
            v0: 0.01,
            kappa: 0.1,
            theta: 0.01,
            xi: 3.0,
            ..Default::default()
        };
        let paths =
            generate_heston_paths_with_variance(&params, &config(1.0, 1.0 / 52.0, 500, 17))
                .unwrap();

        let mut hit_zero = false;
        for row in paths.variance.iter_rows() {
            for &v in row {
                assert!(v >= 0.0, "negative variance {}", v);
                hit_zero |= v == 0.0;
            }
        }
        assert!(hit_zero, "extreme vol-of-vol should exercise truncation");
    }

    #[test]
    fn test_perfect_correlation_runs() {
        for rho in [-1.0, 1.0] {
            let params = HestonParams {
                rho,
                ..Default::default()
            };
            let prices = generate_heston_paths(&params, &config(1.0, 0.1, 10, 1)).unwrap();
            assert_eq!(prices.shape(), (11, 10));
        }
    }

    #[test]
    fn test_invalid_rho_is_rejected() {
        let params = HestonParams {
            rho: -1.5,
            ..Default::default()
        };
        let result = generate_heston_paths(&params, &config(1.0, 0.1, 1, 1));
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameter { name: "rho", .. })
        ));
    }

    #[test]
    fn test_prices_match_with_and_without_variance() {
        let cfg = config(1.0, 1.0 / 252.0, 16, 2024);
        let params = HestonParams::default();
        let prices = generate_heston_paths(&params, &cfg).unwrap();
        let both = generate_heston_paths_with_variance(&params, &cfg).unwrap();
        assert_eq!(prices, both.prices);
        assert_eq!(both.variance.shape(), prices.shape());
    }
}
