//! Time grid validation and construction.

use epi_core::Real;

use crate::error::{SimError, SimResult};

/// Default simulation horizon (time units).
pub const DEFAULT_HORIZON: Real = 200.0;

/// Default number of samples over the horizon.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Check that a grid is usable for sampling a trajectory: at least two
/// points, all finite and non-negative, strictly increasing.
pub fn validate_time_grid(grid: &[Real]) -> SimResult<()> {
    if grid.len() < 2 {
        return Err(SimError::InvalidInput {
            what: "time grid must contain at least 2 points",
        });
    }
    if grid.iter().any(|t| !t.is_finite()) {
        return Err(SimError::InvalidInput {
            what: "time grid contains a non-finite point",
        });
    }
    if grid[0] < 0.0 {
        return Err(SimError::InvalidInput {
            what: "time grid must start at a non-negative time",
        });
    }
    if grid.windows(2).any(|w| w[1] <= w[0]) {
        return Err(SimError::InvalidInput {
            what: "time grid must be strictly increasing",
        });
    }
    Ok(())
}

/// Uniformly spaced grid over [t_start, t_end], endpoints included.
pub fn uniform_grid(t_start: Real, t_end: Real, samples: usize) -> SimResult<Vec<Real>> {
    if samples < 2 {
        return Err(SimError::InvalidInput {
            what: "uniform grid needs at least 2 samples",
        });
    }
    if !t_start.is_finite() || !t_end.is_finite() || t_start < 0.0 || t_end <= t_start {
        return Err(SimError::InvalidInput {
            what: "uniform grid needs finite bounds with t_end > t_start >= 0",
        });
    }

    let step = (t_end - t_start) / (samples - 1) as Real;
    let mut grid: Vec<Real> = (0..samples).map(|i| t_start + i as Real * step).collect();
    // Pin the endpoint; accumulated rounding must not shorten the horizon.
    grid[samples - 1] = t_end;
    Ok(grid)
}

/// The reference default: 1000 samples over [0, 200].
pub fn default_grid() -> Vec<Real> {
    uniform_grid(0.0, DEFAULT_HORIZON, DEFAULT_SAMPLES)
        .unwrap_or_else(|_| unreachable!("default grid bounds are valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_grid_endpoints_and_length() {
        let grid = uniform_grid(0.0, 200.0, 1000).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[999], 200.0);
        assert!(validate_time_grid(&grid).is_ok());
    }

    #[test]
    fn uniform_grid_rejects_degenerate_bounds() {
        assert!(uniform_grid(0.0, 200.0, 1).is_err());
        assert!(uniform_grid(10.0, 10.0, 5).is_err());
        assert!(uniform_grid(-1.0, 5.0, 5).is_err());
    }

    #[test]
    fn validate_rejects_short_grid() {
        assert!(validate_time_grid(&[]).is_err());
        assert!(validate_time_grid(&[0.0]).is_err());
    }

    #[test]
    fn validate_rejects_non_increasing_grid() {
        assert!(validate_time_grid(&[0.0, 1.0, 1.0]).is_err());
        assert!(validate_time_grid(&[0.0, 2.0, 1.0]).is_err());
    }

    #[test]
    fn validate_rejects_negative_start_and_nan() {
        assert!(validate_time_grid(&[-1.0, 0.0, 1.0]).is_err());
        assert!(validate_time_grid(&[0.0, f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn default_grid_matches_reference_horizon() {
        let grid = default_grid();
        assert_eq!(grid.len(), DEFAULT_SAMPLES);
        assert_eq!(*grid.last().unwrap(), DEFAULT_HORIZON);
    }
}
