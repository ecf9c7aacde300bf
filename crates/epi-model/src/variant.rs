//! Named model variants and the normalization rule table.
//!
//! Every variant is the same general four-compartment system with certain
//! initial values and/or parameters forced to zero. One declarative table
//! drives both the simulation driver (which values to force) and any
//! presentation layer (which inputs to enable).

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::{Compartments, Parameters};

/// A named reduction of the general SEIRS-with-vaccination model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    Sir,
    Sis,
    Sirs,
    Seir,
    Seis,
    Seirs,
}

/// Which caller-supplied values a variant overrides with zero.
///
/// Note the asymmetry, preserved from the reference behavior: SIS and
/// SIRS zero the latency rate, so nothing ever leaves the Exposed
/// compartment (new exposures still pool there through beta*S*I, and
/// I simply decays at gamma), while variants that nominally exclude
/// Recovered only zero its initial value -- gamma*I and nu*S still feed
/// R, so it accumulates even when excluded from display. No variant
/// gets true reduced equations; do not "symmetrize" this table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantRule {
    pub zero_initial_exposed: bool,
    pub zero_initial_recovered: bool,
    pub zero_latency_rate: bool,
}

impl Variant {
    /// All variants, in the order the reference implementation lists them.
    pub const ALL: [Variant; 6] = [
        Variant::Sir,
        Variant::Seir,
        Variant::Sis,
        Variant::Sirs,
        Variant::Seis,
        Variant::Seirs,
    ];

    /// The normalization rule for this variant.
    pub fn rule(&self) -> VariantRule {
        match self {
            Variant::Sir => VariantRule {
                zero_initial_exposed: true,
                zero_initial_recovered: true,
                zero_latency_rate: false,
            },
            Variant::Sis => VariantRule {
                zero_initial_exposed: true,
                zero_initial_recovered: true,
                zero_latency_rate: true,
            },
            Variant::Sirs => VariantRule {
                zero_initial_exposed: true,
                zero_initial_recovered: false,
                zero_latency_rate: true,
            },
            Variant::Seir => VariantRule {
                zero_initial_exposed: false,
                zero_initial_recovered: true,
                zero_latency_rate: false,
            },
            Variant::Seis => VariantRule {
                zero_initial_exposed: true,
                zero_initial_recovered: true,
                zero_latency_rate: false,
            },
            Variant::Seirs => VariantRule {
                zero_initial_exposed: false,
                zero_initial_recovered: false,
                zero_latency_rate: false,
            },
        }
    }

    /// Apply the rule table: effective parameters and initial conditions
    /// that degenerate the general model into this variant.
    pub fn effective(
        &self,
        params: Parameters,
        initial: Compartments,
    ) -> (Parameters, Compartments) {
        let rule = self.rule();
        let mut params = params;
        let mut initial = initial;
        if rule.zero_latency_rate {
            params.latency_rate = 0.0;
        }
        if rule.zero_initial_exposed {
            initial.exposed = 0.0;
        }
        if rule.zero_initial_recovered {
            initial.recovered = 0.0;
        }
        (params, initial)
    }

    /// Whether the caller's initial exposed proportion is used.
    pub fn uses_initial_exposed(&self) -> bool {
        !self.rule().zero_initial_exposed
    }

    /// Whether the caller's initial recovered proportion is used.
    pub fn uses_initial_recovered(&self) -> bool {
        !self.rule().zero_initial_recovered
    }

    /// Whether the caller's latency rate is used.
    pub fn uses_latency_rate(&self) -> bool {
        !self.rule().zero_latency_rate
    }

    /// Whether the variant carries an Exposed compartment worth
    /// displaying (the E-in-the-name variants).
    pub fn shows_exposed(&self) -> bool {
        matches!(self, Variant::Seir | Variant::Seis | Variant::Seirs)
    }

    /// Canonical upper-case tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Variant::Sir => "SIR",
            Variant::Sis => "SIS",
            Variant::Sirs => "SIRS",
            Variant::Seir => "SEIR",
            Variant::Seis => "SEIS",
            Variant::Seirs => "SEIRS",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Variant {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SIR" => Ok(Variant::Sir),
            "SIS" => Ok(Variant::Sis),
            "SIRS" => Ok(Variant::Sirs),
            "SEIR" => Ok(Variant::Seir),
            "SEIS" => Ok(Variant::Seis),
            "SEIRS" => Ok(Variant::Seirs),
            _ => Err(ModelError::InvalidVariant {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Parameters {
        Parameters::new(0.4, 0.2, 0.1, 0.05)
    }

    fn initial() -> Compartments {
        Compartments::new(0.9, 0.03, 0.02, 0.05)
    }

    #[test]
    fn sir_zeroes_exposed_and_recovered_but_keeps_sigma() {
        let (p, y0) = Variant::Sir.effective(params(), initial());
        assert_eq!(y0.exposed, 0.0);
        assert_eq!(y0.recovered, 0.0);
        assert_eq!(p.latency_rate, 0.2);
        assert_eq!(y0.susceptible, 0.9);
        assert_eq!(y0.infected, 0.02);
    }

    #[test]
    fn sis_zeroes_sigma_and_both_initial_values() {
        let (p, y0) = Variant::Sis.effective(params(), initial());
        assert_eq!(y0.exposed, 0.0);
        assert_eq!(y0.recovered, 0.0);
        assert_eq!(p.latency_rate, 0.0);
    }

    #[test]
    fn sirs_keeps_caller_recovered() {
        let (p, y0) = Variant::Sirs.effective(params(), initial());
        assert_eq!(y0.exposed, 0.0);
        assert_eq!(y0.recovered, 0.05);
        assert_eq!(p.latency_rate, 0.0);
    }

    #[test]
    fn seir_keeps_caller_exposed() {
        let (p, y0) = Variant::Seir.effective(params(), initial());
        assert_eq!(y0.exposed, 0.03);
        assert_eq!(y0.recovered, 0.0);
        assert_eq!(p.latency_rate, 0.2);
    }

    #[test]
    fn seis_zeroes_both_initial_values_but_keeps_sigma() {
        let (p, y0) = Variant::Seis.effective(params(), initial());
        assert_eq!(y0.exposed, 0.0);
        assert_eq!(y0.recovered, 0.0);
        assert_eq!(p.latency_rate, 0.2);
    }

    #[test]
    fn seirs_passes_everything_through() {
        let (p, y0) = Variant::Seirs.effective(params(), initial());
        assert_eq!(p, params());
        assert_eq!(y0, initial());
    }

    #[test]
    fn input_queries_match_rule_table() {
        assert!(!Variant::Sir.uses_initial_exposed());
        assert!(Variant::Sir.uses_latency_rate());
        assert!(!Variant::Sis.uses_latency_rate());
        assert!(Variant::Sirs.uses_initial_recovered());
        assert!(Variant::Seir.uses_initial_exposed());
        assert!(Variant::Seirs.uses_initial_recovered());
    }

    #[test]
    fn exposed_is_displayed_only_for_e_variants() {
        assert!(!Variant::Sir.shows_exposed());
        assert!(!Variant::Sis.shows_exposed());
        assert!(!Variant::Sirs.shows_exposed());
        assert!(Variant::Seir.shows_exposed());
        assert!(Variant::Seis.shows_exposed());
        assert!(Variant::Seirs.shows_exposed());
    }

    #[test]
    fn parse_round_trips_tags() {
        for variant in Variant::ALL {
            assert_eq!(variant.tag().parse::<Variant>().unwrap(), variant);
        }
        assert_eq!("seirs".parse::<Variant>().unwrap(), Variant::Seirs);
    }

    #[test]
    fn parse_rejects_unknown_tag() {
        let err = "XYZ".parse::<Variant>().unwrap_err();
        assert!(matches!(err, ModelError::InvalidVariant { ref name } if name == "XYZ"));
    }
}
