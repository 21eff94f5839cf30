//! Uniform simulation time grid.
//!
//! The number of steps is `floor(maturity / dt)`, truncated toward zero. The
//! grid holds `n_steps + 1` points spanning the closed interval
//! `[0, maturity]`. When `maturity / dt` is not an integer the spacing of the
//! grid differs slightly from `dt`; generators still step with `dt`.

/// Largest step count a validated configuration may request.
pub const MAX_STEPS: usize = u32::MAX as usize;

/// Uniform time grid over `[0, maturity]`.
///
/// # Examples
///
/// ```rust
/// use pathgen_core::grid::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 0.3);
/// assert_eq!(grid.n_steps(), 3);
/// assert_eq!(grid.len(), 4);
/// assert_eq!(grid.times()[0], 0.0);
/// assert_eq!(grid.times()[3], 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    maturity: f64,
    dt: f64,
    times: Vec<f64>,
}

impl TimeGrid {
    /// Builds the grid for the given horizon and nominal step size.
    ///
    /// Inputs are not validated here; use
    /// [`SimulationConfig::time_grid`](crate::SimulationConfig::time_grid) on
    /// a validated configuration to stay within [`MAX_STEPS`].
    pub fn new(maturity: f64, dt: f64) -> Self {
        let n_steps = Self::step_count(maturity, dt);
        Self {
            maturity,
            dt,
            times: linspace(maturity, n_steps),
        }
    }

    /// Number of steps for a horizon and step size: `floor(maturity / dt)`.
    ///
    /// Non-finite or negative ratios yield zero steps.
    #[inline]
    pub fn step_count(maturity: f64, dt: f64) -> usize {
        let ratio = (maturity / dt).trunc();
        if ratio.is_finite() && ratio > 0.0 {
            ratio as usize
        } else {
            0
        }
    }

    /// Number of steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Number of grid points (`n_steps + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`: a grid contains at least the origin.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Nominal step size used by the generators.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Horizon of the grid.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Grid points, starting at 0 and ending at `maturity`.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Consumes the grid and returns its points.
    #[inline]
    pub fn into_times(self) -> Vec<f64> {
        self.times
    }
}

/// `n_steps + 1` evenly spaced points over `[0, stop]`, last point pinned to
/// `stop`.
fn linspace(stop: f64, n_steps: usize) -> Vec<f64> {
    if n_steps == 0 {
        return vec![0.0];
    }
    let step = stop / n_steps as f64;
    let mut times: Vec<f64> = (0..=n_steps).map(|i| i as f64 * step).collect();
    times[n_steps] = stop;
    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_daily_grid() {
        let grid = TimeGrid::new(1.0, 1.0 / 252.0);
        assert_eq!(grid.n_steps(), 252);
        assert_eq!(grid.len(), 253);
        assert_eq!(grid.times()[252], 1.0);
        assert_relative_eq!(grid.times()[126], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_non_integer_ratio_truncates() {
        // 1.0 / 0.3 = 3.33.. -> 3 steps, not 4
        let grid = TimeGrid::new(1.0, 0.3);
        assert_eq!(grid.n_steps(), 3);
        assert_relative_eq!(grid.times()[1], 1.0 / 3.0, epsilon = 1e-15);
        assert_eq!(grid.times()[3], 1.0);
    }

    #[test]
    fn test_ratio_just_below_integer_is_not_rounded_up() {
        // 1.0 / 0.26 = 3.846.. -> 3 steps
        assert_eq!(TimeGrid::step_count(1.0, 0.26), 3);
    }

    #[test]
    fn test_dt_larger_than_maturity_gives_origin_only() {
        let grid = TimeGrid::new(0.5, 1.0);
        assert_eq!(grid.n_steps(), 0);
        assert_eq!(grid.times(), &[0.0]);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_degenerate_inputs_give_zero_steps() {
        assert_eq!(TimeGrid::step_count(1.0, 0.0), 0);
        assert_eq!(TimeGrid::step_count(1.0, -0.1), 0);
        assert_eq!(TimeGrid::step_count(f64::NAN, 0.1), 0);
    }

    proptest! {
        #[test]
        fn prop_grid_shape(maturity in 0.01f64..10.0, fraction in 0.001f64..0.9) {
            let dt = maturity * fraction;
            let grid = TimeGrid::new(maturity, dt);

            prop_assert_eq!(grid.len(), (maturity / dt).floor() as usize + 1);
            prop_assert_eq!(grid.times()[0], 0.0);
            prop_assert_eq!(*grid.times().last().unwrap(), maturity);
            for pair in grid.times().windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
        }
    }
}
