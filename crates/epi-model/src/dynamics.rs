//! The general SEIRS-with-vaccination derivative function.

use crate::{Compartments, Parameters};

/// Instantaneous derivatives of the general four-compartment model:
///
/// ```text
/// dS/dt = -beta * S * I - nu * S
/// dE/dt =  beta * S * I - sigma * E
/// dI/dt =  sigma * E - gamma * I
/// dR/dt =  gamma * I + nu * S
/// ```
///
/// Pure and deterministic; accepts any real-valued inputs and performs
/// no domain validation (that is the driver's job). The formulation does
/// not normalize by population size: it assumes a closed population
/// normalized to 1 at t = 0. The four derivatives sum to zero, so total
/// mass is conserved along any trajectory.
pub fn derivatives(state: &Compartments, params: &Parameters) -> Compartments {
    let new_exposures = params.transmission_rate * state.susceptible * state.infected;
    let vaccinations = params.vaccination_rate * state.susceptible;
    let onsets = params.latency_rate * state.exposed;
    let recoveries = params.recovery_rate * state.infected;

    Compartments {
        susceptible: -new_exposures - vaccinations,
        exposed: new_exposures - onsets,
        infected: onsets - recoveries,
        recovered: recoveries + vaccinations,
    }
}
