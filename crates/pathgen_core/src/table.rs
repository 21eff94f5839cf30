//! Time-indexed table of simulated paths.
//!
//! # Memory Layout
//!
//! Values are stored row-major: `values[row * n_paths + path]`, where row 0
//! holds the initial value of every path and row `i` the values at
//! `times[i]`. One row is one time point, one column is one trajectory.

use crate::error::{Result, SimulationError};
use crate::grid::TimeGrid;

/// Simulated paths indexed by time (rows) and path (columns).
///
/// A `PathTable` is immutable once built and always has exactly
/// `n_rows() * n_paths()` values with no gaps.
///
/// # Examples
///
/// ```rust
/// use pathgen_core::grid::TimeGrid;
/// use pathgen_core::table::PathTableBuilder;
///
/// let grid = TimeGrid::new(1.0, 0.5);
/// let mut builder = PathTableBuilder::new(grid, 2).unwrap();
/// builder.push_row(&[100.0, 100.0]).unwrap();
/// builder.push_row(&[101.0, 99.0]).unwrap();
/// builder.push_row(&[102.0, 98.0]).unwrap();
/// let table = builder.finish().unwrap();
///
/// assert_eq!(table.shape(), (3, 2));
/// assert_eq!(table.column(1), vec![100.0, 99.0, 98.0]);
/// assert_eq!(table.row_mean(2), 100.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPathTable"))]
pub struct PathTable {
    times: Vec<f64>,
    n_paths: usize,
    values: Vec<f64>,
}

/// Unchecked wire form of `PathTable`; converted through `check_shape`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPathTable {
    times: Vec<f64>,
    n_paths: usize,
    values: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPathTable> for PathTable {
    type Error = SimulationError;

    fn try_from(raw: RawPathTable) -> Result<Self> {
        check_shape(raw.times.len(), raw.n_paths, raw.values.len())?;
        Ok(Self {
            times: raw.times,
            n_paths: raw.n_paths,
            values: raw.values,
        })
    }
}

/// Number of values a complete `n_rows x n_paths` table holds.
fn table_len(n_rows: usize, n_paths: usize) -> Result<usize> {
    n_rows
        .checked_mul(n_paths)
        .ok_or_else(|| {
            SimulationError::invalid(
                "n_paths",
                format!("{} rows of {} paths overflow the table size", n_rows, n_paths),
            )
        })
}

/// A table needs at least one row, at least one path and no missing values.
fn check_shape(n_rows: usize, n_paths: usize, n_values: usize) -> Result<()> {
    let expected = table_len(n_rows, n_paths)?;
    if n_rows == 0 || n_paths == 0 || n_values != expected {
        return Err(SimulationError::ShapeMismatch {
            expected,
            got: n_values,
        });
    }
    Ok(())
}

impl PathTable {
    /// Time labels of the rows.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of rows (time points).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.times.len()
    }

    /// Number of columns (paths).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// `(n_rows, n_paths)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_paths)
    }

    /// Value of `path` at row `row`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, path: usize) -> f64 {
        assert!(path < self.n_paths, "path index {} out of bounds", path);
        self.values[row * self.n_paths + path]
    }

    /// All path values at row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= n_rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n_paths;
        &self.values[start..start + self.n_paths]
    }

    /// Values at the final time point.
    #[inline]
    pub fn last_row(&self) -> &[f64] {
        self.row(self.n_rows() - 1)
    }

    /// Iterates over rows in time order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.n_paths)
    }

    /// One trajectory, copied out in time order.
    ///
    /// # Panics
    ///
    /// Panics if `path >= n_paths()`.
    pub fn column(&self, path: usize) -> Vec<f64> {
        assert!(path < self.n_paths, "path index {} out of bounds", path);
        self.iter_rows().map(|row| row[path]).collect()
    }

    /// Cross-path mean at row `row`.
    pub fn row_mean(&self, row: usize) -> f64 {
        let values = self.row(row);
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Cross-path population variance at row `row`.
    pub fn row_variance(&self, row: usize) -> f64 {
        let values = self.row(row);
        let mean = self.row_mean(row);
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64
    }

    /// Row index for a fraction `q` of the time axis.
    ///
    /// `q >= 1` maps to the last row; otherwise the index is
    /// `floor(q * n_rows - 1)` clamped to zero.
    pub fn quantile_row_index(&self, q: f64) -> usize {
        let n_rows = self.n_rows();
        if q >= 1.0 {
            return n_rows - 1;
        }
        let idx = (q * n_rows as f64 - 1.0).trunc();
        if idx > 0.0 {
            (idx as usize).min(n_rows - 1)
        } else {
            0
        }
    }

    /// Log-returns `ln(S[i] / S[i-1])` of one path, `n_rows - 1` values.
    pub fn log_returns(&self, path: usize) -> Vec<f64> {
        self.column(path)
            .windows(2)
            .map(|pair| (pair[1] / pair[0]).ln())
            .collect()
    }

    /// Consumes the table, returning `(times, n_paths, row-major values)`.
    pub fn into_inner(self) -> (Vec<f64>, usize, Vec<f64>) {
        (self.times, self.n_paths, self.values)
    }
}

/// Row-by-row assembler for [`PathTable`].
///
/// Generators push one row per time point; [`finish`](Self::finish) checks
/// that every grid point received a row.
#[derive(Debug)]
pub struct PathTableBuilder {
    times: Vec<f64>,
    n_paths: usize,
    values: Vec<f64>,
}

impl PathTableBuilder {
    /// Pre-allocates storage for `grid.len()` rows of `n_paths` values.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] if the table size
    /// overflows `usize`.
    pub fn new(grid: TimeGrid, n_paths: usize) -> Result<Self> {
        let capacity = table_len(grid.len(), n_paths)?;
        Ok(Self {
            times: grid.into_times(),
            n_paths,
            values: Vec::with_capacity(capacity),
        })
    }

    /// Number of rows pushed so far.
    #[inline]
    pub fn rows_filled(&self) -> usize {
        if self.n_paths == 0 {
            0
        } else {
            self.values.len() / self.n_paths
        }
    }

    /// Appends the values of the next time point.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ShapeMismatch`] if `row` does not hold
    /// exactly `n_paths` values or the grid is already full.
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.n_paths {
            return Err(SimulationError::ShapeMismatch {
                expected: self.n_paths,
                got: row.len(),
            });
        }
        if self.rows_filled() >= self.times.len() {
            return Err(SimulationError::ShapeMismatch {
                expected: self.times.len() * self.n_paths,
                got: self.values.len() + row.len(),
            });
        }
        self.values.extend_from_slice(row);
        Ok(())
    }

    /// Finalises the table.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::ShapeMismatch`] if fewer rows than grid
    /// points were pushed.
    pub fn finish(self) -> Result<PathTable> {
        check_shape(self.times.len(), self.n_paths, self.values.len())?;
        Ok(PathTable {
            times: self.times,
            n_paths: self.n_paths,
            values: self.values,
        })
    }
}
