//! Simulation driver: one complete run from request to trajectories.

use epi_core::{Real, Tolerances};
use epi_model::{Compartments, Parameters, Variant};

use crate::error::SimResult;
use crate::grid::validate_time_grid;
use crate::integrator::{Dopri45, Integrator, Rk4};
use crate::system::SeirsSystem;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Adaptive Dormand-Prince 5(4) (default, error-controlled).
    #[default]
    Dopri45,
    /// Fixed-step classical RK4 (for cross-checking).
    Rk4,
}

/// Options for simulation runs.
#[derive(Clone, Copy, Debug)]
pub struct SimOptions {
    /// Error tolerances for the adaptive integrator.
    pub tolerances: Tolerances,
    /// Step budget for the adaptive integrator.
    pub max_steps: usize,
    /// Initial step size; derived from the grid span when None.
    pub initial_step: Option<Real>,
    /// Substeps per grid interval for the fixed-step integrator.
    pub rk4_substeps: usize,
    /// Integrator type (default: Dopri45).
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            tolerances: Tolerances {
                abs: 1e-9,
                rel: 1e-6,
            },
            max_steps: 1_000_000,
            initial_step: None,
            rk4_substeps: 8,
            integrator: IntegratorType::default(),
        }
    }
}

/// Everything needed for one simulation run.
///
/// Immutable once built; the driver holds no state between runs, so two
/// requests with identical contents produce identical results.
#[derive(Clone, Debug)]
pub struct SimulationRequest {
    /// Selected model variant.
    pub variant: Variant,
    /// Caller-supplied rates; the variant rule table may zero sigma.
    pub params: Parameters,
    /// Caller-supplied initial proportions; the rule table may zero E0/R0.
    pub initial: Compartments,
    /// Sample times (validated by the driver, not on construction).
    pub time_grid: Vec<Real>,
    pub options: SimOptions,
}

impl SimulationRequest {
    pub fn new(
        variant: Variant,
        params: Parameters,
        initial: Compartments,
        time_grid: Vec<Real>,
    ) -> Self {
        Self {
            variant,
            params,
            initial,
            time_grid,
            options: SimOptions::default(),
        }
    }
}

/// Sampled trajectories of one run: five parallel sequences of equal
/// length, one entry per time-grid point.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    pub times: Vec<Real>,
    pub susceptible: Vec<Real>,
    pub exposed: Vec<Real>,
    pub infected: Vec<Real>,
    pub recovered: Vec<Real>,
}

impl SimulationResult {
    /// Number of sampled time points.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Compartment state at a sampled index.
    pub fn state_at(&self, idx: usize) -> Compartments {
        Compartments::new(
            self.susceptible[idx],
            self.exposed[idx],
            self.infected[idx],
            self.recovered[idx],
        )
    }
}

/// Run one complete simulation.
///
/// Validates inputs, applies the variant rule table to obtain effective
/// (sigma, E0, R0), integrates the general model over the time grid, and
/// assembles the four trajectories. Purely functional: no shared state,
/// no partial results on failure.
pub fn simulate(request: &SimulationRequest) -> SimResult<SimulationResult> {
    request.params.validate()?;
    request.initial.validate()?;
    validate_time_grid(&request.time_grid)?;

    let (params, initial) = request.variant.effective(request.params, request.initial);

    tracing::debug!(
        variant = %request.variant,
        samples = request.time_grid.len(),
        horizon = request.time_grid[request.time_grid.len() - 1],
        "starting simulation run"
    );

    let system = SeirsSystem::new(params);
    let states = match request.options.integrator {
        IntegratorType::Dopri45 => Dopri45 {
            tolerances: request.options.tolerances,
            max_steps: request.options.max_steps,
            initial_step: request.options.initial_step,
        }
        .solve(&system, initial, &request.time_grid)?,
        IntegratorType::Rk4 => Rk4 {
            substeps: request.options.rk4_substeps,
        }
        .solve(&system, initial, &request.time_grid)?,
    };

    let n = states.len();
    let mut susceptible = Vec::with_capacity(n);
    let mut exposed = Vec::with_capacity(n);
    let mut infected = Vec::with_capacity(n);
    let mut recovered = Vec::with_capacity(n);
    for state in states {
        susceptible.push(state.susceptible);
        exposed.push(state.exposed);
        infected.push(state.infected);
        recovered.push(state.recovered);
    }

    Ok(SimulationResult {
        times: request.time_grid.clone(),
        susceptible,
        exposed,
        infected,
        recovered,
    })
}
