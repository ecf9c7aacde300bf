//! OdeSystem trait for pluggable dynamic systems.

use epi_core::{Real, Tolerances};
use epi_model::{Compartments, Parameters, derivatives};

/// Trait for smooth, non-stiff dynamic systems x_dot = f(t, x).
///
/// An OdeSystem must implement:
/// - State type (Clone, for snapshots)
/// - RHS (right-hand side) computation
/// - State arithmetic for integration: add states, scale by scalar
/// - A scaled error norm for adaptive step control
///
/// Systems are pure: the RHS accepts any real-valued state and returns
/// derivatives without side effects. Finiteness of the evolving solution
/// is the integrator's concern.
pub trait OdeSystem {
    /// State type (must be Clone).
    type State: Clone;

    /// Compute state derivative dxdt = f(t, x).
    fn rhs(&self, t: Real, x: &Self::State) -> Self::State;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: Real) -> Self::State;

    /// Scaled RMS norm of an error estimate, relative to the states at
    /// both ends of the step. A value <= 1 means the step is acceptable
    /// at the given tolerances.
    fn error_norm(
        &self,
        err: &Self::State,
        x0: &Self::State,
        x1: &Self::State,
        tol: Tolerances,
    ) -> Real;

    /// Whether every component of the state is finite.
    fn is_finite(&self, x: &Self::State) -> bool;
}

/// The general SEIRS-with-vaccination system over compartment proportions.
///
/// Autonomous: the RHS does not depend on time. Parameters are fixed for
/// the lifetime of the system (one simulation run).
#[derive(Clone, Copy, Debug)]
pub struct SeirsSystem {
    params: Parameters,
}

impl SeirsSystem {
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }
}

impl OdeSystem for SeirsSystem {
    type State = Compartments;

    fn rhs(&self, _t: Real, x: &Self::State) -> Self::State {
        derivatives(x, &self.params)
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        Compartments {
            susceptible: a.susceptible + b.susceptible,
            exposed: a.exposed + b.exposed,
            infected: a.infected + b.infected,
            recovered: a.recovered + b.recovered,
        }
    }

    fn scale(&self, a: &Self::State, scale: Real) -> Self::State {
        Compartments {
            susceptible: scale * a.susceptible,
            exposed: scale * a.exposed,
            infected: scale * a.infected,
            recovered: scale * a.recovered,
        }
    }

    fn error_norm(
        &self,
        err: &Self::State,
        x0: &Self::State,
        x1: &Self::State,
        tol: Tolerances,
    ) -> Real {
        let err = err.to_array();
        let x0 = x0.to_array();
        let x1 = x1.to_array();
        let mut sum = 0.0;
        for c in 0..4 {
            let scale = tol.abs + tol.rel * x0[c].abs().max(x1[c].abs());
            let ratio = err[c] / scale;
            sum += ratio * ratio;
        }
        (sum / 4.0).sqrt()
    }

    fn is_finite(&self, x: &Self::State) -> bool {
        x.is_finite()
    }
}
