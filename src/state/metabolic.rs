//! Hepatic state container.
//!
//! Holds metabolite pools, signal levels, tunable parameters and the rates
//! each rule computed on the most recent step. Storage is dense and keyed by
//! the closed vocabularies, so an unknown key can only appear at the string
//! boundary (`get`/`set`), where it is reported as `EngineError::UnknownKey`.

use crate::error::{EngineError, EngineResult};

use super::vocabulary::{Metabolite, Parameter, RuleId, Signal, StateKey, StateKind};

/// Complete metabolic state of one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct MetabolicState {
    metabolites: [f64; Metabolite::COUNT],
    signals: [f64; Signal::COUNT],
    parameters: [f64; Parameter::COUNT],
    last_rates: [f64; RuleId::COUNT],
    /// Floor metabolite writes at 0.0
    clamp_non_negative: bool,
}

impl Default for MetabolicState {
    fn default() -> Self {
        let mut state = Self::empty();

        // Resting hepatic pools, model-relative units
        state.set_metabolite(Metabolite::Glucose, 100.0);
        state.set_metabolite(Metabolite::Glycogen, 500.0);
        state.set_metabolite(Metabolite::FattyAcid, 50.0);
        state.set_metabolite(Metabolite::Glycerol, 10.0);
        state.set_metabolite(Metabolite::AminoAcid, 30.0);
        state.set_metabolite(Metabolite::Ammonia, 0.5);
        state.set_metabolite(Metabolite::Urea, 10.0);
        state.set_metabolite(Metabolite::Cholesterol, 20.0);
        state.set_metabolite(Metabolite::BileAcid, 5.0);

        // Energy and redox cofactors
        state.set_metabolite(Metabolite::Atp, 100.0);
        state.set_metabolite(Metabolite::Adp, 20.0);
        state.set_metabolite(Metabolite::NadPlus, 50.0);
        state.set_metabolite(Metabolite::Nadh, 10.0);
        state.set_metabolite(Metabolite::AcetylCoa, 5.0);
        state.set_metabolite(Metabolite::KetoneBody, 1.0);
        state.set_metabolite(Metabolite::Lactate, 5.0);
        state.set_metabolite(Metabolite::Oxygen, 100.0);

        // Secreted proteins and stored lipid
        state.set_metabolite(Metabolite::Albumin, 40.0);
        state.set_metabolite(Metabolite::ClottingFactor, 10.0);
        state.set_metabolite(Metabolite::Triglycerides, 10.0);

        state.set_signal(Signal::Insulin, 1.0);
        state.set_signal(Signal::Glucagon, 1.0);
        state.set_signal(Signal::Epinephrine, 0.1);
        state.set_signal(Signal::Cortisol, 0.1);
        state.set_signal(Signal::Inflammation, 0.0);
        state.set_signal(Signal::SympatheticTone, 1.0);

        state
    }
}

impl MetabolicState {
    /// All pools and signals at zero, parameters at 1.0, clamping on
    pub fn empty() -> Self {
        Self {
            metabolites: [0.0; Metabolite::COUNT],
            signals: [0.0; Signal::COUNT],
            parameters: [1.0; Parameter::COUNT],
            last_rates: [0.0; RuleId::COUNT],
            clamp_non_negative: true,
        }
    }

    /// Enable or disable the non-negativity floor on metabolite writes
    pub fn set_clamping(&mut self, clamp: bool) {
        self.clamp_non_negative = clamp;
    }

    pub fn clamping(&self) -> bool {
        self.clamp_non_negative
    }

    #[inline]
    pub fn metabolite(&self, m: Metabolite) -> f64 {
        self.metabolites[m.index()]
    }

    /// Overwrite a metabolite pool
    #[inline]
    pub fn set_metabolite(&mut self, m: Metabolite, value: f64) {
        self.metabolites[m.index()] = if self.clamp_non_negative {
            value.max(0.0)
        } else {
            value
        };
    }

    #[inline]
    pub fn signal(&self, s: Signal) -> f64 {
        self.signals[s.index()]
    }

    /// Overwrite a signal level (never clamped)
    #[inline]
    pub fn set_signal(&mut self, s: Signal, value: f64) {
        self.signals[s.index()] = value;
    }

    #[inline]
    pub fn parameter(&self, p: Parameter) -> f64 {
        self.parameters[p.index()]
    }

    #[inline]
    pub fn set_parameter(&mut self, p: Parameter, value: f64) {
        self.parameters[p.index()] = value;
    }

    /// Read any value of `kind` by its wire name
    pub fn get(&self, kind: StateKind, key: &str) -> EngineResult<f64> {
        match kind {
            StateKind::Metabolite => Ok(self.metabolite(key.parse()?)),
            StateKind::Signal => Ok(self.signal(key.parse()?)),
            StateKind::Parameter => Ok(self.parameter(key.parse()?)),
            StateKind::Rule => Ok(self.last_rate(key.parse()?)),
        }
    }

    /// Overwrite any value of `kind` by its wire name
    ///
    /// Rule rates are engine output and cannot be written from outside.
    pub fn set(&mut self, kind: StateKind, key: &str, value: f64) -> EngineResult<()> {
        match kind {
            StateKind::Metabolite => self.set_metabolite(key.parse()?, value),
            StateKind::Signal => self.set_signal(key.parse()?, value),
            StateKind::Parameter => self.set_parameter(key.parse()?, value),
            StateKind::Rule => return Err(EngineError::unknown_key(StateKind::Rule, key)),
        }
        Ok(())
    }

    /// Additive update used by rule stoichiometry
    #[inline]
    pub fn apply_delta(&mut self, key: StateKey, delta: f64) {
        match key {
            StateKey::Metabolite(m) => {
                let current = self.metabolite(m);
                self.set_metabolite(m, current + delta);
            }
            StateKey::Signal(s) => {
                self.signals[s.index()] += delta;
            }
        }
    }

    /// Rate the rule computed on the latest step; 0.0 if it did not fire
    #[inline]
    pub fn last_rate(&self, rule: RuleId) -> f64 {
        self.last_rates[rule.index()]
    }

    pub fn record_rate(&mut self, rule: RuleId, rate: f64) {
        self.last_rates[rule.index()] = rate;
    }

    /// Reset all recorded rates before a new step
    pub fn clear_rates(&mut self) {
        self.last_rates = [0.0; RuleId::COUNT];
    }

    /// (name, value) pairs for every metabolite in vocabulary order
    pub fn metabolites(&self) -> impl Iterator<Item = (Metabolite, f64)> + '_ {
        Metabolite::ALL.iter().map(move |&m| (m, self.metabolite(m)))
    }

    pub fn signals(&self) -> impl Iterator<Item = (Signal, f64)> + '_ {
        Signal::ALL.iter().map(move |&s| (s, self.signal(s)))
    }

    pub fn rates(&self) -> impl Iterator<Item = (RuleId, f64)> + '_ {
        RuleId::ALL.iter().map(move |&r| (r, self.last_rate(r)))
    }

    /// Smallest metabolite pool, for invariant checks
    pub fn min_metabolite(&self) -> (Metabolite, f64) {
        self.metabolites()
            .fold((Metabolite::Glucose, f64::INFINITY), |acc, (m, v)| {
                if v < acc.1 {
                    (m, v)
                } else {
                    acc
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pools() {
        let state = MetabolicState::default();
        assert_eq!(state.metabolite(Metabolite::Glucose), 100.0);
        assert_eq!(state.metabolite(Metabolite::Glycogen), 500.0);
        assert_eq!(state.metabolite(Metabolite::Oxygen), 100.0);
        assert_eq!(state.signal(Signal::Epinephrine), 0.1);
        assert_eq!(state.parameter(Parameter::InsulinSensitivity), 1.0);
        assert!(state.clamping());
    }

    #[test]
    fn test_apply_delta_clamps_at_zero() {
        let mut state = MetabolicState::default();
        state.set_metabolite(Metabolite::Lactate, 0.5);
        state.apply_delta(Metabolite::Lactate.into(), -2.0);
        assert_eq!(state.metabolite(Metabolite::Lactate), 0.0);
    }

    #[test]
    fn test_apply_delta_unclamped() {
        let mut state = MetabolicState::default();
        state.set_clamping(false);
        state.set_metabolite(Metabolite::Lactate, 0.5);
        state.apply_delta(Metabolite::Lactate.into(), -2.0);
        assert_eq!(state.metabolite(Metabolite::Lactate), -1.5);
    }

    #[test]
    fn test_signals_not_clamped() {
        let mut state = MetabolicState::default();
        state.apply_delta(Signal::Cortisol.into(), -1.0);
        assert!((state.signal(Signal::Cortisol) - (-0.9)).abs() < 1e-12);
    }

    #[test]
    fn test_get_set_by_name() {
        let mut state = MetabolicState::default();
        state.set(StateKind::Metabolite, "nad+", 12.0).unwrap();
        assert_eq!(state.get(StateKind::Metabolite, "nad+").unwrap(), 12.0);

        state.set(StateKind::Parameter, "insulin_sensitivity", 0.5).unwrap();
        assert_eq!(state.parameter(Parameter::InsulinSensitivity), 0.5);
    }

    #[test]
    fn test_unknown_key() {
        let state = MetabolicState::default();
        let err = state.get(StateKind::Signal, "dopamine").unwrap_err();
        assert!(matches!(err, EngineError::UnknownKey { kind: StateKind::Signal, .. }));
    }

    #[test]
    fn test_rates_cannot_be_written() {
        let mut state = MetabolicState::default();
        assert!(state.set(StateKind::Rule, "ketogenesis", 1.0).is_err());
    }

    #[test]
    fn test_clear_rates() {
        let mut state = MetabolicState::default();
        state.record_rate(RuleId::UreaCycle, 0.2);
        assert_eq!(state.last_rate(RuleId::UreaCycle), 0.2);
        state.clear_rates();
        assert_eq!(state.last_rate(RuleId::UreaCycle), 0.0);
    }
}
