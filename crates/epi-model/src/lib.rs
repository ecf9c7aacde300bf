//! epi-model: compartmental epidemic model definitions.
//!
//! Provides:
//! - Model parameters (transmission, latency, recovery, vaccination rates)
//! - Compartment state (S, E, I, R proportions)
//! - The general SEIRS-with-vaccination derivative function
//! - Named model variants (SIR, SIS, SIRS, SEIR, SEIS, SEIRS) and the
//!   rule table that degenerates the general model into each of them
//!
//! This crate is pure model definition: no integration, no I/O.

pub mod compartments;
pub mod dynamics;
pub mod error;
pub mod parameters;
pub mod variant;

// Re-exports for public API
pub use compartments::Compartments;
pub use dynamics::derivatives;
pub use error::{ModelError, ModelResult};
pub use parameters::Parameters;
pub use variant::{Variant, VariantRule};
