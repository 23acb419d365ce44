//! Closed vocabularies for hepatic state keys.
//!
//! Every metabolite, signal, tunable parameter and rule has exactly one
//! variant here. Names are the wire-level keys used by history records and
//! downstream dashboards, so they are fixed strings rather than derived from
//! the Rust identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Which vocabulary a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    Metabolite,
    Signal,
    Parameter,
    Rule,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateKind::Metabolite => "metabolite",
            StateKind::Signal => "signal",
            StateKind::Parameter => "parameter",
            StateKind::Rule => "rule",
        };
        f.write_str(name)
    }
}

/// Generates a fieldless enum with a fixed name table.
///
/// Each generated type gets `ALL`, `COUNT`, `name()`, `index()`, `Display`
/// and a `FromStr` that rejects anything outside the table.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $ty:ident, $kind:expr, {
            $( $(#[$vmeta:meta])* $variant:ident => $name:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $ty {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $ty {
            /// Every variant in declaration order
            pub const ALL: &'static [$ty] = &[ $( $ty::$variant ),+ ];

            /// Number of variants
            pub const COUNT: usize = Self::ALL.len();

            /// Wire-level key
            pub fn name(self) -> &'static str {
                match self {
                    $( $ty::$variant => $name ),+
                }
            }

            /// Position in `ALL`, used for dense storage
            #[inline]
            pub fn index(self) -> usize {
                self as usize
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok($ty::$variant), )+
                    _ => Err(EngineError::unknown_key($kind, s)),
                }
            }
        }
    };
}

vocabulary! {
    /// Hepatic metabolite pools (concentration units are model-relative)
    Metabolite, StateKind::Metabolite, {
        Glucose => "glucose",
        Glycogen => "glycogen",
        FattyAcid => "fatty_acid",
        Glycerol => "glycerol",
        AminoAcid => "amino_acid",
        Ammonia => "ammonia",
        Urea => "urea",
        Cholesterol => "cholesterol",
        BileAcid => "bile_acid",
        Atp => "atp",
        Adp => "adp",
        NadPlus => "nad+",
        Nadh => "nadh",
        AcetylCoa => "acetyl_coa",
        KetoneBody => "ketone_body",
        Lactate => "lactate",
        Oxygen => "oxygen",
        Albumin => "albumin",
        ClottingFactor => "clotting_factor",
        Triglycerides => "triglycerides",
    }
}

vocabulary! {
    /// Hormonal and regulatory signals
    ///
    /// Sigmoid-derived hormones live in (0,1); injected stressors are unbounded.
    Signal, StateKind::Signal, {
        Insulin => "insulin",
        Glucagon => "glucagon",
        Epinephrine => "epinephrine",
        Cortisol => "cortisol",
        Inflammation => "inflammation",
        SympatheticTone => "sympathetic_tone",
    }
}

vocabulary! {
    /// Tunable multipliers, 1.0 when untouched
    Parameter, StateKind::Parameter, {
        /// Scales insulin action on glycogen storage and lipolysis suppression
        InsulinSensitivity => "insulin_sensitivity",
        /// Scales glucagon-driven mobilization rates
        GlucagonSensitivity => "glucagon_sensitivity",
    }
}

vocabulary! {
    /// Reaction rules, in the fixed order they execute each tick
    RuleId, StateKind::Rule, {
        GlycogenSynthesis => "glycogenSynthesis",
        Glycogenolysis => "glycogenolysis",
        AdiposeLipolysis => "adiposeLipolysis",
        OrchestrateGluconeogenesis => "orchestrateGluconeogenesis",
        Gluconeogenesis => "gluconeogenesis",
        FattyAcidSynthesis => "fattyAcidSynthesis",
        DeNovoLipogenesis => "deNovoLipogenesis",
        BetaOxidation => "betaOxidation",
        Ketogenesis => "ketogenesis",
        LipidTransport => "lipidTransport",
        AminoAcidCatabolism => "aminoAcidCatabolism",
        UreaCycle => "ureaCycle",
        OxidativePhosphorylation => "oxidativePhosphorylation",
        Biotransformation => "biotransformation",
        BileAcidSynthesis => "bileAcidSynthesis",
        PlasmaProteinSynthesis => "plasmaProteinSynthesis",
    }
}

impl RuleId {
    /// History key for this rule's rate series (`rate_<ruleName>`)
    pub fn rate_key(self) -> String {
        format!("rate_{}", self.name())
    }
}

/// A key that a rule's stoichiometry may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Metabolite(Metabolite),
    Signal(Signal),
}

impl From<Metabolite> for StateKey {
    fn from(m: Metabolite) -> Self {
        StateKey::Metabolite(m)
    }
}

impl From<Signal> for StateKey {
    fn from(s: Signal) -> Self {
        StateKey::Signal(s)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Metabolite(m) => fmt::Display::fmt(m, f),
            StateKey::Signal(s) => fmt::Display::fmt(s, f),
        }
    }
}
