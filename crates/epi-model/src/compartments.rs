//! Compartment state: proportions of a closed population.

use epi_core::numeric::ensure_finite;
use epi_core::{CoreResult, Real};

/// Population proportions in each compartment (S, E, I, R).
///
/// Values are conceptually in [0, 1] but are not clamped; the model
/// conserves total mass (vaccination routes S to R, nothing leaves the
/// system), so S + E + I + R stays constant along a trajectory. That is
/// a property of the equations, not a runtime check.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compartments {
    pub susceptible: Real,
    pub exposed: Real,
    pub infected: Real,
    pub recovered: Real,
}

impl Compartments {
    pub fn new(susceptible: Real, exposed: Real, infected: Real, recovered: Real) -> Self {
        Self {
            susceptible,
            exposed,
            infected,
            recovered,
        }
    }

    /// All four values as an array, in (S, E, I, R) order.
    pub fn to_array(self) -> [Real; 4] {
        [self.susceptible, self.exposed, self.infected, self.recovered]
    }

    pub fn from_array(values: [Real; 4]) -> Self {
        Self {
            susceptible: values[0],
            exposed: values[1],
            infected: values[2],
            recovered: values[3],
        }
    }

    /// Total population mass across all compartments.
    pub fn total(&self) -> Real {
        self.susceptible + self.exposed + self.infected + self.recovered
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Check that every compartment value is finite.
    ///
    /// No range check: proportions outside [0, 1] are accepted (the model
    /// does not hard-clamp the state space).
    pub fn validate(&self) -> CoreResult<()> {
        ensure_finite(self.susceptible, "initial susceptible")?;
        ensure_finite(self.exposed, "initial exposed")?;
        ensure_finite(self.infected, "initial infected")?;
        ensure_finite(self.recovered, "initial recovered")?;
        Ok(())
    }
}
