//! Integration test: full SEIRS model with vaccination.
//!
//! Scenario: beta=0.4, sigma=0.2, gamma=0.1, nu=0.05, S0=0.99, E0=0,
//! I0=0.01, R0=0, 1000 uniform samples over [0, 200] (the reference
//! defaults).
//!
//! Demonstrates:
//! - Bounded trajectories: every compartment stays within [0, 1] up to
//!   solver tolerance for these parameter magnitudes (no blow-up)
//! - Mass conservation: vaccination routes S to R inside the system
//! - Pointwise derivative balance of the general model

use epi_model::{Compartments, Parameters, Variant, derivatives};
use epi_sim::{SimulationRequest, default_grid, simulate};

fn seirs_request() -> SimulationRequest {
    SimulationRequest::new(
        Variant::Seirs,
        Parameters::new(0.4, 0.2, 0.1, 0.05),
        Compartments::new(0.99, 0.0, 0.01, 0.0),
        default_grid(),
    )
}

#[test]
fn seirs_trajectories_stay_bounded() {
    let result = simulate(&seirs_request()).expect("SEIRS run failed");
    assert_eq!(result.len(), 1000);

    for idx in 0..result.len() {
        let state = result.state_at(idx);
        for (name, value) in [
            ("S", state.susceptible),
            ("E", state.exposed),
            ("I", state.infected),
            ("R", state.recovered),
        ] {
            assert!(
                (-1e-6..=1.0 + 1e-6).contains(&value),
                "{name} left [0, 1] at t = {}: {value}",
                result.times[idx]
            );
        }
    }

    // Vaccination keeps mass in the system: total conserved
    let total0 = result.state_at(0).total();
    for idx in 0..result.len() {
        assert!(
            (result.state_at(idx).total() - total0).abs() < 1e-6,
            "mass must be conserved at sample {idx}"
        );
    }

    // With nu > 0 susceptibles drain even without infection pressure
    let last = result.len() - 1;
    assert!(
        result.susceptible[last] < result.susceptible[0],
        "vaccination must deplete S"
    );
    assert!(
        result.recovered[last] > 0.5,
        "recoveries plus vaccinations must dominate by t = 200"
    );
}

#[test]
fn derivative_components_balance_along_trajectory() {
    let request = seirs_request();
    let result = simulate(&request).expect("SEIRS run failed");

    // dS + dE + dI + dR = 0 pointwise, evaluated at every sampled state
    for idx in 0..result.len() {
        let d = derivatives(&result.state_at(idx), &request.params);
        assert!(
            d.total().abs() < 1e-12,
            "derivatives must sum to zero at sample {idx}"
        );
    }
}
