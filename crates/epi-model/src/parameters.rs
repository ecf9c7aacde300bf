//! Model rate parameters.

use epi_core::numeric::ensure_non_negative;
use epi_core::{CoreResult, Real};

/// Rate parameters for the general SEIRS-with-vaccination model.
///
/// All rates are per unit time, for a closed population normalized to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Transmission rate (beta): new exposures per S-I contact.
    pub transmission_rate: Real,
    /// Latency rate (sigma): E -> I conversion speed.
    pub latency_rate: Real,
    /// Recovery rate (gamma): I -> R conversion speed.
    pub recovery_rate: Real,
    /// Vaccination rate (nu): S -> R conversion speed via vaccination.
    pub vaccination_rate: Real,
}

impl Parameters {
    pub fn new(
        transmission_rate: Real,
        latency_rate: Real,
        recovery_rate: Real,
        vaccination_rate: Real,
    ) -> Self {
        Self {
            transmission_rate,
            latency_rate,
            recovery_rate,
            vaccination_rate,
        }
    }

    /// Check that every rate is finite and non-negative.
    ///
    /// The derivative function itself accepts any real inputs; this is
    /// the driver-facing domain check. Out-of-domain rates are rejected,
    /// never clamped.
    pub fn validate(&self) -> CoreResult<()> {
        ensure_non_negative(self.transmission_rate, "transmission_rate")?;
        ensure_non_negative(self.latency_rate, "latency_rate")?;
        ensure_non_negative(self.recovery_rate, "recovery_rate")?;
        ensure_non_negative(self.vaccination_rate, "vaccination_rate")?;
        Ok(())
    }
}
