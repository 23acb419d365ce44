//! Hepatic metabolism engine.
//!
//! Advances a `MetabolicState` one discrete tick at a time:
//!
//! 1. Hormone feedback recomputes insulin and glucagon from glucose
//! 2. The sixteen reaction rules fire in fixed order, each recording its rate
//! 3. Optional systemic exchange applies perfusion and basal ATP turnover
//!    (off by default; see `EngineParameters::perfused`)
//!
//! Rules are never evaluated in parallel: later rules must observe the
//! effects of earlier ones within the same tick. A scenario run wraps this
//! step with perturbations before it and a history snapshot after it.

pub mod feedback;
pub mod pathways;
pub mod rule;

pub use feedback::{sigmoid, FeedbackContext, HormoneFeedback, SIGMOID_MARGIN};
pub use pathways::{LiverPathways, OXPHOS_ATP_YIELD, TOXIN_LOAD};
pub use rule::{Guard, RateLaw, ReactionRule, ReactionStoichiometry};

use crate::config::{EngineParameters, ExchangeParameters, StateParameters};
use crate::error::EngineResult;
use crate::history::History;
use crate::scenario::Scenario;
use crate::state::{MetabolicState, Metabolite, RuleId};

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Tick index that was just completed
    pub tick: usize,
    /// Hormone values the rules saw
    pub feedback: FeedbackContext,
    /// Rules that fired, in execution order
    pub fired: Vec<RuleId>,
}

/// Main engine combining feedback, rules and exchange
pub struct HepaticEngine {
    /// Hormone feedback stage
    pub feedback: HormoneFeedback,
    /// Ordered rule set
    pub pathways: LiverPathways,
    /// Policy for states built by `new_state`
    pub state: StateParameters,
    /// Perfusion and turnover; skipped unless enabled
    pub exchange: ExchangeParameters,
    /// Ticks completed since construction or the last reset
    pub tick: usize,
}

impl HepaticEngine {
    /// Create an engine with the standard rule set
    pub fn new(params: EngineParameters) -> Self {
        Self {
            feedback: HormoneFeedback::new(params.feedback),
            pathways: LiverPathways::standard(),
            state: params.state,
            exchange: params.exchange,
            tick: 0,
        }
    }

    /// A fresh state configured for this engine (clamping policy applied)
    pub fn new_state(&self) -> MetabolicState {
        let mut state = MetabolicState::default();
        state.set_clamping(self.state.clamp_non_negative);
        state
    }

    /// Perform one tick on `state`
    pub fn step(&mut self, state: &mut MetabolicState) -> EngineResult<StepReport> {
        let ctx = self.feedback.update(state);

        state.clear_rates();
        let mut fired = Vec::new();
        for rule in self.pathways.rules() {
            if rule.apply(state, &ctx)?.is_some() {
                fired.push(rule.id);
            }
        }

        self.apply_exchange(state);

        let report = StepReport {
            tick: self.tick,
            feedback: ctx,
            fired,
        };
        self.tick += 1;
        Ok(report)
    }

    /// Perfusion toward arterial oxygen and basal ATP hydrolysis
    fn apply_exchange(&self, state: &mut MetabolicState) {
        if !self.exchange.enabled {
            return;
        }

        let oxygen = state.metabolite(Metabolite::Oxygen);
        let supply = self.exchange.perfusion_fraction * (self.exchange.arterial_oxygen - oxygen);
        state.apply_delta(Metabolite::Oxygen.into(), supply);

        let demand = self.exchange.basal_atp_turnover * state.metabolite(Metabolite::Atp);
        state.apply_delta(Metabolite::Atp.into(), -demand);
        state.apply_delta(Metabolite::Adp.into(), demand);
    }

    /// Run a scenario for `ticks` ticks on a freshly constructed state.
    ///
    /// Per tick: scenario perturbations, then `step`, then a history snapshot
    /// stamped with the scenario's time for that tick.
    pub fn run(&mut self, scenario: &dyn Scenario, ticks: usize) -> EngineResult<History> {
        let mut state = self.new_state();
        scenario.initialize(&mut state);
        self.run_from(&mut state, scenario, ticks)
    }

    /// Run a scenario starting from an existing state (no initialization)
    pub fn run_from(
        &mut self,
        state: &mut MetabolicState,
        scenario: &dyn Scenario,
        ticks: usize,
    ) -> EngineResult<History> {
        log::info!("Running scenario '{}' for {} ticks", scenario.name(), ticks);

        self.tick = 0;
        let mut history = History::with_capacity(ticks);
        for tick in 0..ticks {
            scenario.perturb(state, tick);
            let report = self.step(state)?;
            history.record(state, scenario.time_at(tick));

            log::trace!("tick {}: {} rules fired", tick, report.fired.len());
        }

        let (m, v) = state.min_metabolite();
        if v < 0.0 {
            log::warn!("Scenario '{}' ended with negative {}: {:.4}", scenario.name(), m, v);
        }
        log::info!(
            "Scenario '{}' complete: glucose={:.2}, ketone_body={:.2}, triglycerides={:.2}",
            scenario.name(),
            state.metabolite(Metabolite::Glucose),
            state.metabolite(Metabolite::KetoneBody),
            state.metabolite(Metabolite::Triglycerides)
        );

        Ok(history)
    }

    /// Reset tick counter
    pub fn reset(&mut self) {
        self.tick = 0;
    }
}

impl Default for HepaticEngine {
    fn default() -> Self {
        Self::new(EngineParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_count() {
        let mut engine = HepaticEngine::default();
        let mut state = engine.new_state();

        assert_eq!(engine.tick, 0);
        engine.step(&mut state).unwrap();
        assert_eq!(engine.tick, 1);
        let report = engine.step(&mut state).unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(engine.tick, 2);
    }

    #[test]
    fn test_fired_rules_have_rates() {
        let mut engine = HepaticEngine::default();
        let mut state = engine.new_state();
        let report = engine.step(&mut state).unwrap();

        assert!(report.fired.contains(&RuleId::OxidativePhosphorylation));
        for &id in RuleId::ALL {
            if !report.fired.contains(&id) {
                assert_eq!(state.last_rate(id), 0.0, "{} should read 0", id);
            }
        }
    }

    #[test]
    fn test_exchange_disabled() {
        let mut engine = HepaticEngine::new(EngineParameters::closed_system());
        let mut state = engine.new_state();
        engine.step(&mut state).unwrap();
        // Only oxidative phosphorylation touches oxygen
        assert_eq!(state.metabolite(Metabolite::Oxygen), 99.0);
    }

    #[test]
    fn test_default_engine_is_closed() {
        let mut engine = HepaticEngine::default();
        let mut state = engine.new_state();
        state.set_metabolite(Metabolite::Oxygen, 15.0);
        engine.step(&mut state).unwrap();
        assert_eq!(state.metabolite(Metabolite::Oxygen), 15.0);
    }

    #[test]
    fn test_new_state_follows_state_policy() {
        let mut params = EngineParameters::perfused();
        params.state.clamp_non_negative = false;
        let engine = HepaticEngine::new(params);
        assert!(!engine.new_state().clamping());
        assert!(HepaticEngine::new(EngineParameters::perfused())
            .new_state()
            .clamping());
    }

    #[test]
    fn test_perfusion_restores_oxygen() {
        let mut engine = HepaticEngine::new(EngineParameters::perfused());
        let mut state = engine.new_state();
        state.set_metabolite(Metabolite::Oxygen, 15.0);
        engine.step(&mut state).unwrap();
        // Below the respiration threshold: no consumption, perfusion only
        let expected = 15.0 + 0.05 * (100.0 - 15.0);
        assert!((state.metabolite(Metabolite::Oxygen) - expected).abs() < 1e-12);
    }
}
