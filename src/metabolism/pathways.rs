//! Standard hepatic rule set.
//!
//! Sixteen rules covering carbohydrate, lipid and nitrogen handling, energy
//! turnover, detoxification and secretion. They execute in the order of
//! `LiverPathways::standard()`; later rules see pools already changed by
//! earlier ones within the same tick.
//!
//! Rate laws are intentionally simple: a fixed constant scaled by the
//! driving hormone, a tunable sensitivity and, where noted, substrate level.

use crate::state::{
    MetabolicState, Metabolite as M, Parameter as P, RuleId, Signal as S,
};

use super::feedback::FeedbackContext;
use super::rule::{ReactionRule, ReactionStoichiometry};

/// Fixed xenobiotic load cleared by biotransformation each tick
pub const TOXIN_LOAD: f64 = 5.0;

/// ATP yield of one oxidative phosphorylation firing at full metabolic rate
pub const OXPHOS_ATP_YIELD: f64 = 2.0;

/// Resting respiration rate
const RESPIRATION_RATE: f64 = 0.5;

/// Effective insulin action after sensitivity
#[inline]
fn insulin_action(s: &MetabolicState) -> f64 {
    s.signal(S::Insulin) * s.parameter(P::InsulinSensitivity)
}

/// Strongest catabolic drive: glucagon (after sensitivity) or epinephrine
#[inline]
fn catabolic_drive(s: &MetabolicState) -> f64 {
    (s.signal(S::Glucagon) * s.parameter(P::GlucagonSensitivity)).max(s.signal(S::Epinephrine))
}

/// The ordered rule collection
#[derive(Debug, Clone)]
pub struct LiverPathways {
    rules: Vec<ReactionRule>,
}

impl LiverPathways {
    /// All sixteen rules in execution order
    pub fn standard() -> Self {
        Self {
            rules: vec![
                glycogen_synthesis(),
                glycogenolysis(),
                adipose_lipolysis(),
                orchestrate_gluconeogenesis(),
                gluconeogenesis(),
                fatty_acid_synthesis(),
                de_novo_lipogenesis(),
                beta_oxidation(),
                ketogenesis(),
                lipid_transport(),
                amino_acid_catabolism(),
                urea_cycle(),
                oxidative_phosphorylation(),
                biotransformation(),
                bile_acid_synthesis(),
                plasma_protein_synthesis(),
            ],
        }
    }

    pub fn rules(&self) -> &[ReactionRule] {
        &self.rules
    }

    pub fn get(&self, id: RuleId) -> Option<&ReactionRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Rule ids in execution order
    pub fn order(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id).collect()
    }

    /// Rules whose guard holds for the given state, without firing them
    pub fn active_rules(&self, state: &MetabolicState, ctx: &FeedbackContext) -> Vec<RuleId> {
        self.rules
            .iter()
            .filter(|r| r.is_active(state, ctx))
            .map(|r| r.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for LiverPathways {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Carbohydrate handling
// ============================================================================

/// Glucose → glycogen under insulin, small ATP cost
pub fn glycogen_synthesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::GlycogenSynthesis,
        |s, _| {
            s.signal(S::Insulin) > 0.5
                && s.metabolite(M::Glucose) > 100.0
                && s.metabolite(M::Atp) > 20.0
        },
        |s, _| 0.5 * insulin_action(s),
        ReactionStoichiometry::new(
            vec![(M::Glucose.into(), 1.0), (M::Atp.into(), 0.1)],
            vec![(M::Glycogen.into(), 1.0), (M::Adp.into(), 0.1)],
        ),
    )
}

/// Glycogen → glucose under glucagon or epinephrine
pub fn glycogenolysis() -> ReactionRule {
    ReactionRule::new(
        RuleId::Glycogenolysis,
        |s, _| {
            (s.signal(S::Glucagon) > 0.6 || s.signal(S::Epinephrine) > 0.5)
                && s.metabolite(M::Glycogen) > 10.0
        },
        |s, _| 0.6 * catabolic_drive(s),
        ReactionStoichiometry::new(
            vec![(M::Glycogen.into(), 1.0)],
            vec![(M::Glucose.into(), 1.0)],
        ),
    )
}

/// Fatty acid and glycerol influx from adipose tissue when insulin is weak.
///
/// Adipose triglyceride is outside the hepatic pools, so nothing is consumed.
pub fn adipose_lipolysis() -> ReactionRule {
    ReactionRule::new(
        RuleId::AdiposeLipolysis,
        |s, _| {
            insulin_action(s) < 0.3
                && (s.signal(S::Glucagon) > 0.5 || s.signal(S::Epinephrine) > 0.5)
        },
        |s, _| 0.4 * (1.0 - insulin_action(s)) * catabolic_drive(s) * s.signal(S::SympatheticTone),
        ReactionStoichiometry::new(
            vec![],
            vec![(M::FattyAcid.into(), 1.0), (M::Glycerol.into(), 1.0 / 3.0)],
        ),
    )
}

/// Precursor supply for gluconeogenesis: lactate returned by the Cori cycle
/// and amino acids from peripheral proteolysis, boosted by cortisol.
pub fn orchestrate_gluconeogenesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::OrchestrateGluconeogenesis,
        |s, _| s.signal(S::Glucagon) > 0.7,
        |s, _| {
            0.15 * s.signal(S::Glucagon)
                * s.parameter(P::GlucagonSensitivity)
                * (1.0 + s.signal(S::Cortisol))
        },
        ReactionStoichiometry::new(
            vec![],
            vec![(M::Lactate.into(), 1.0), (M::AminoAcid.into(), 1.0)],
        ),
    )
}

/// Lactate + glycerol + amino acid → glucose, 2 ATP per unit rate
pub fn gluconeogenesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::Gluconeogenesis,
        |s, _| s.signal(S::Glucagon) > 0.7 && s.metabolite(M::Atp) > 30.0,
        |s, _| 0.2 * s.signal(S::Glucagon) * s.parameter(P::GlucagonSensitivity),
        ReactionStoichiometry::new(
            vec![
                (M::Lactate.into(), 1.0),
                (M::Glycerol.into(), 1.0),
                (M::AminoAcid.into(), 1.0),
                (M::Atp.into(), 2.0),
            ],
            vec![(M::Glucose.into(), 1.0), (M::Adp.into(), 2.0)],
        ),
    )
}

// ============================================================================
// Lipid handling
// ============================================================================

/// Acetyl-CoA → fatty acid under strong insulin
pub fn fatty_acid_synthesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::FattyAcidSynthesis,
        |s, _| s.signal(S::Insulin) > 0.7 && s.metabolite(M::AcetylCoa) > 2.0,
        |s, _| 0.1 * s.signal(S::Insulin),
        ReactionStoichiometry::new(
            vec![(M::AcetylCoa.into(), 1.0), (M::Atp.into(), 1.0)],
            vec![(M::FattyAcid.into(), 1.0), (M::Adp.into(), 1.0)],
        ),
    )
}

/// Glucose carbon → fatty acid, scaling with glucose excess.
///
/// Driven by raw insulin: hepatic lipogenesis keeps responding when
/// insulin action on glycogen storage is impaired.
pub fn de_novo_lipogenesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::DeNovoLipogenesis,
        |s, _| {
            s.signal(S::Insulin) > 0.5
                && s.metabolite(M::Glucose) > 100.0
                && s.metabolite(M::Atp) > 20.0
        },
        |s, _| 0.08 * s.signal(S::Insulin) * (s.metabolite(M::Glucose) / 110.0).min(2.0),
        ReactionStoichiometry::new(
            vec![(M::Glucose.into(), 1.0), (M::Atp.into(), 0.5)],
            vec![(M::FattyAcid.into(), 1.0), (M::Adp.into(), 0.5)],
        ),
    )
}

/// Fatty acid → acetyl-CoA, reducing NAD+
pub fn beta_oxidation() -> ReactionRule {
    ReactionRule::new(
        RuleId::BetaOxidation,
        |s, _| s.signal(S::Glucagon) > 0.5 && s.metabolite(M::FattyAcid) > 5.0,
        |s, ctx| {
            0.3 * s.signal(S::Glucagon)
                * s.parameter(P::GlucagonSensitivity)
                * ctx.metabolic_rate_modifier
        },
        ReactionStoichiometry::new(
            vec![(M::FattyAcid.into(), 1.0), (M::NadPlus.into(), 1.0)],
            vec![(M::Nadh.into(), 1.0), (M::AcetylCoa.into(), 1.0)],
        ),
    )
}

/// Acetyl-CoA overflow → ketone bodies when glucose is low
pub fn ketogenesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::Ketogenesis,
        |s, _| s.metabolite(M::Glucose) < 70.0 && s.metabolite(M::AcetylCoa) > 5.0,
        |_, _| 0.2,
        ReactionStoichiometry::new(
            vec![(M::AcetylCoa.into(), 1.0)],
            vec![(M::KetoneBody.into(), 1.0)],
        ),
    )
}

/// Insulin-driven esterification of fatty acid into stored triglyceride
/// (fatty-acid equivalents)
pub fn lipid_transport() -> ReactionRule {
    ReactionRule::new(
        RuleId::LipidTransport,
        |s, _| s.signal(S::Insulin) > 0.3 && s.metabolite(M::FattyAcid) > 1.0,
        |s, _| 0.02 * s.signal(S::Insulin) * s.metabolite(M::FattyAcid),
        ReactionStoichiometry::new(
            vec![(M::FattyAcid.into(), 1.0)],
            vec![(M::Triglycerides.into(), 1.0)],
        ),
    )
}

// ============================================================================
// Nitrogen handling
// ============================================================================

/// Surplus amino acid → ammonia
pub fn amino_acid_catabolism() -> ReactionRule {
    ReactionRule::new(
        RuleId::AminoAcidCatabolism,
        |s, _| s.metabolite(M::AminoAcid) > 40.0,
        |_, _| 0.2,
        ReactionStoichiometry::new(
            vec![(M::AminoAcid.into(), 1.0)],
            vec![(M::Ammonia.into(), 1.0)],
        ),
    )
}

/// Ammonia → urea, first order in ammonia
pub fn urea_cycle() -> ReactionRule {
    ReactionRule::new(
        RuleId::UreaCycle,
        |s, _| s.metabolite(M::Ammonia) > 0.1 && s.metabolite(M::Atp) > 10.0,
        |s, _| 0.4 * s.metabolite(M::Ammonia),
        ReactionStoichiometry::new(
            vec![(M::Ammonia.into(), 1.0), (M::Atp.into(), 1.0)],
            vec![(M::Urea.into(), 1.0), (M::Adp.into(), 1.0)],
        ),
    )
}

// ============================================================================
// Energy, detoxification, secretion
// ============================================================================

/// Baseline respiration, independent of hormone state.
///
/// Per firing at modifier 1.0: glucose −0.05, fatty acid −0.025, oxygen −1,
/// ATP +`OXPHOS_ATP_YIELD`. NADH is reoxidised alongside.
pub fn oxidative_phosphorylation() -> ReactionRule {
    ReactionRule::new(
        RuleId::OxidativePhosphorylation,
        |s, _| s.metabolite(M::Oxygen) > 20.0,
        |_, ctx| RESPIRATION_RATE * ctx.metabolic_rate_modifier,
        ReactionStoichiometry::new(
            vec![
                (M::Glucose.into(), 0.1),
                (M::FattyAcid.into(), 0.05),
                (M::Oxygen.into(), 2.0),
                (M::Nadh.into(), 0.6),
                (M::Adp.into(), OXPHOS_ATP_YIELD / RESPIRATION_RATE),
            ],
            vec![
                (M::Atp.into(), OXPHOS_ATP_YIELD / RESPIRATION_RATE),
                (M::NadPlus.into(), 0.6),
            ],
        ),
    )
}

/// Glucose spent as the energy cost of clearing `TOXIN_LOAD`
pub fn biotransformation() -> ReactionRule {
    ReactionRule::new(
        RuleId::Biotransformation,
        |s, _| s.metabolite(M::Oxygen) > 10.0 && s.metabolite(M::Glucose) > 50.0,
        |_, _| 0.02 * TOXIN_LOAD,
        ReactionStoichiometry::new(vec![(M::Glucose.into(), 0.1)], vec![]),
    )
}

pub fn bile_acid_synthesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::BileAcidSynthesis,
        |s, _| s.metabolite(M::Cholesterol) > 10.0,
        |_, _| 0.05,
        ReactionStoichiometry::new(
            vec![(M::Cholesterol.into(), 1.0)],
            vec![(M::BileAcid.into(), 1.0)],
        ),
    )
}

/// Albumin and clotting factor secretion from the amino acid pool
pub fn plasma_protein_synthesis() -> ReactionRule {
    ReactionRule::new(
        RuleId::PlasmaProteinSynthesis,
        |s, _| s.metabolite(M::AminoAcid) > 10.0,
        |_, _| 0.01,
        ReactionStoichiometry::new(
            vec![(M::AminoAcid.into(), 3.0)],
            vec![(M::Albumin.into(), 2.0), (M::ClottingFactor.into(), 1.0)],
        ),
    )
}
