//! Simulation driver for compartmental epidemic models.
//!
//! Provides:
//! - `OdeSystem` trait for smooth low-dimensional dynamic systems
//! - Adaptive Dormand-Prince 5(4) and fixed-step RK4 integrators that
//!   sample solutions exactly at a caller-supplied time grid
//! - Time-grid validation and construction helpers
//! - The `simulate` entry point: variant normalization, integration,
//!   trajectory assembly

pub mod error;
pub mod grid;
pub mod integrator;
pub mod sim;
pub mod system;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use grid::{DEFAULT_HORIZON, DEFAULT_SAMPLES, default_grid, uniform_grid, validate_time_grid};
pub use integrator::{Dopri45, Integrator, Rk4};
pub use sim::{IntegratorType, SimOptions, SimulationRequest, SimulationResult, simulate};
pub use system::{OdeSystem, SeirsSystem};
