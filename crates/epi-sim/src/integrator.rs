//! Time integrators sampling at a caller-supplied grid.

use epi_core::{Real, Tolerances};

use crate::error::{SimError, SimResult};
use crate::system::OdeSystem;

/// Trait for time integrators.
///
/// Integrates x_dot = f(t, x) from `grid[0]`, producing one state per
/// grid point (the first entry is the initial state). The grid is
/// assumed validated: finite, strictly increasing, length >= 2.
pub trait Integrator {
    fn solve<S: OdeSystem>(
        &self,
        system: &S,
        x0: S::State,
        grid: &[Real],
    ) -> SimResult<Vec<S::State>>;
}

/// x + h * sum(c_j * k_j), accumulated through the system's arithmetic.
fn stage_combination<S: OdeSystem>(
    system: &S,
    x: &S::State,
    h: Real,
    terms: &[(Real, &S::State)],
) -> S::State {
    let mut acc = x.clone();
    for (c, k) in terms {
        acc = system.add(&acc, &system.scale(k, h * c));
    }
    acc
}

/// Classical RK4 (Runge-Kutta 4th order), fixed step.
///
/// Each grid interval is covered by `substeps` equal steps. Accuracy is
/// governed by the substep count, not an error estimate; kept for
/// cross-checking the adaptive integrator.
#[derive(Clone, Copy, Debug)]
pub struct Rk4 {
    pub substeps: usize,
}

impl Default for Rk4 {
    fn default() -> Self {
        Self { substeps: 8 }
    }
}

impl Integrator for Rk4 {
    fn solve<S: OdeSystem>(
        &self,
        system: &S,
        x0: S::State,
        grid: &[Real],
    ) -> SimResult<Vec<S::State>> {
        if self.substeps == 0 {
            return Err(SimError::InvalidInput {
                what: "rk4 substeps must be positive",
            });
        }

        let mut out = Vec::with_capacity(grid.len());
        let mut x = x0;
        out.push(x.clone());

        for window in grid.windows(2) {
            let (t_start, t_end) = (window[0], window[1]);
            let h = (t_end - t_start) / self.substeps as Real;

            for step in 0..self.substeps {
                let t = t_start + step as Real * h;

                let k1 = system.rhs(t, &x);
                let x2 = system.add(&x, &system.scale(&k1, 0.5 * h));
                let k2 = system.rhs(t + 0.5 * h, &x2);
                let x3 = system.add(&x, &system.scale(&k2, 0.5 * h));
                let k3 = system.rhs(t + 0.5 * h, &x3);
                let x4 = system.add(&x, &system.scale(&k3, h));
                let k4 = system.rhs(t + h, &x4);

                // x_new = x + (h/6) * (k1 + 2*k2 + 2*k3 + k4)
                let k_sum = system.add(
                    &system.add(&k1, &system.scale(&k2, 2.0)),
                    &system.add(&system.scale(&k3, 2.0), &k4),
                );
                x = system.add(&x, &system.scale(&k_sum, h / 6.0));

                if !system.is_finite(&x) {
                    return Err(SimError::IntegrationFailure {
                        what: "state became non-finite".to_string(),
                        t: t + h,
                    });
                }
            }
            out.push(x.clone());
        }

        Ok(out)
    }
}

// Dormand-Prince 5(4) Butcher tableau.
const C2: Real = 1.0 / 5.0;
const C3: Real = 3.0 / 10.0;
const C4: Real = 4.0 / 5.0;
const C5: Real = 8.0 / 9.0;

const A21: Real = 1.0 / 5.0;
const A31: Real = 3.0 / 40.0;
const A32: Real = 9.0 / 40.0;
const A41: Real = 44.0 / 45.0;
const A42: Real = -56.0 / 15.0;
const A43: Real = 32.0 / 9.0;
const A51: Real = 19372.0 / 6561.0;
const A52: Real = -25360.0 / 2187.0;
const A53: Real = 64448.0 / 6561.0;
const A54: Real = -212.0 / 729.0;
const A61: Real = 9017.0 / 3168.0;
const A62: Real = -355.0 / 33.0;
const A63: Real = 46732.0 / 5247.0;
const A64: Real = 49.0 / 176.0;
const A65: Real = -5103.0 / 18656.0;

// 5th-order solution weights (b2 = 0).
const B1: Real = 35.0 / 384.0;
const B3: Real = 500.0 / 1113.0;
const B4: Real = 125.0 / 192.0;
const B5: Real = -2187.0 / 6784.0;
const B6: Real = 11.0 / 84.0;

// Error weights: 5th-order minus embedded 4th-order solution.
const E1: Real = 71.0 / 57600.0;
const E3: Real = -71.0 / 16695.0;
const E4: Real = 71.0 / 1920.0;
const E5: Real = -17253.0 / 339200.0;
const E6: Real = 22.0 / 525.0;
const E7: Real = -1.0 / 40.0;

const SAFETY: Real = 0.9;
const MIN_FACTOR: Real = 0.2;
const MAX_FACTOR: Real = 5.0;

/// Adaptive Dormand-Prince 5(4) integrator with FSAL.
///
/// Error-controlled explicit Runge-Kutta for smooth non-stiff systems.
/// The step size is clamped so the solution lands exactly on each
/// requested grid point; no interpolation is involved.
#[derive(Clone, Copy, Debug)]
pub struct Dopri45 {
    /// Per-component error tolerances.
    pub tolerances: Tolerances,
    /// Total step budget across the whole grid (accepted + rejected).
    pub max_steps: usize,
    /// Initial step size; chosen from the grid span when None.
    pub initial_step: Option<Real>,
}

impl Default for Dopri45 {
    fn default() -> Self {
        Self {
            tolerances: Tolerances {
                abs: 1e-9,
                rel: 1e-6,
            },
            max_steps: 1_000_000,
            initial_step: None,
        }
    }
}

impl Integrator for Dopri45 {
    fn solve<S: OdeSystem>(
        &self,
        system: &S,
        x0: S::State,
        grid: &[Real],
    ) -> SimResult<Vec<S::State>> {
        let span = grid[grid.len() - 1] - grid[0];
        let h_min = span * 1e-14;

        let mut out = Vec::with_capacity(grid.len());
        let mut t = grid[0];
        let mut x = x0;
        out.push(x.clone());

        let mut h = self.initial_step.unwrap_or(span / 1000.0).min(span);
        let mut k1 = system.rhs(t, &x);

        let mut steps = 0usize;
        let mut accepted = 0usize;
        let mut rejected = 0usize;

        for &target in &grid[1..] {
            while t < target {
                steps += 1;
                if steps > self.max_steps {
                    return Err(SimError::IntegrationFailure {
                        what: format!("step budget exhausted ({} steps)", self.max_steps),
                        t,
                    });
                }

                // Never step past the next requested sample point.
                let hits_target = h >= target - t;
                let h_try = if hits_target { target - t } else { h };

                let x2 = stage_combination(system, &x, h_try, &[(A21, &k1)]);
                let k2 = system.rhs(t + C2 * h_try, &x2);
                let x3 = stage_combination(system, &x, h_try, &[(A31, &k1), (A32, &k2)]);
                let k3 = system.rhs(t + C3 * h_try, &x3);
                let x4 =
                    stage_combination(system, &x, h_try, &[(A41, &k1), (A42, &k2), (A43, &k3)]);
                let k4 = system.rhs(t + C4 * h_try, &x4);
                let x5 = stage_combination(
                    system,
                    &x,
                    h_try,
                    &[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)],
                );
                let k5 = system.rhs(t + C5 * h_try, &x5);
                let x6 = stage_combination(
                    system,
                    &x,
                    h_try,
                    &[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
                );
                let k6 = system.rhs(t + h_try, &x6);

                // 5th-order solution; its RHS doubles as k1 of the next
                // step (first-same-as-last).
                let x_new = stage_combination(
                    system,
                    &x,
                    h_try,
                    &[(B1, &k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)],
                );
                let k7 = system.rhs(t + h_try, &x_new);

                let zero = system.scale(&k1, 0.0);
                let err = stage_combination(
                    system,
                    &zero,
                    h_try,
                    &[
                        (E1, &k1),
                        (E3, &k3),
                        (E4, &k4),
                        (E5, &k5),
                        (E6, &k6),
                        (E7, &k7),
                    ],
                );

                let err_norm = system.error_norm(&err, &x, &x_new, self.tolerances);
                if !err_norm.is_finite() || !system.is_finite(&x_new) {
                    return Err(SimError::IntegrationFailure {
                        what: "state or error estimate became non-finite".to_string(),
                        t,
                    });
                }

                if err_norm <= 1.0 {
                    t = if hits_target { target } else { t + h_try };
                    x = x_new;
                    k1 = k7;
                    accepted += 1;

                    let factor = if err_norm == 0.0 {
                        MAX_FACTOR
                    } else {
                        (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
                    };
                    h = (h_try * factor).max(h_min);
                } else {
                    rejected += 1;
                    let factor = (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, 1.0);
                    h = h_try * factor;
                    if h < h_min {
                        return Err(SimError::IntegrationFailure {
                            what: "step size underflow".to_string(),
                            t,
                        });
                    }
                }
            }
            out.push(x.clone());
        }

        tracing::debug!(accepted, rejected, final_step = h, "dopri45 run complete");
        Ok(out)
    }
}
