//! Guarded reaction rules.
//!
//! A rule is a named, fixed stoichiometric transformation with an activation
//! guard and a rate law. Rules read the shared state, and when the guard holds
//! they apply `rate × coefficient` to every key in their stoichiometry and
//! record the rate under their id.

use crate::error::{EngineError, EngineResult};
use crate::state::{MetabolicState, RuleId, StateKey};

use super::feedback::FeedbackContext;

/// Stoichiometry of a hepatic reaction
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionStoichiometry {
    /// Keys consumed (key, coefficient per unit rate)
    pub substrates: Vec<(StateKey, f64)>,
    /// Keys produced (key, coefficient per unit rate)
    pub products: Vec<(StateKey, f64)>,
}

impl ReactionStoichiometry {
    pub fn new(substrates: Vec<(StateKey, f64)>, products: Vec<(StateKey, f64)>) -> Self {
        Self { substrates, products }
    }

    /// Apply the reaction to the state at the given rate
    ///
    /// Substrates are decremented before products are incremented, which only
    /// matters when a key appears on both sides.
    pub fn apply(&self, state: &mut MetabolicState, rate: f64) {
        for &(key, coeff) in &self.substrates {
            state.apply_delta(key, -coeff * rate);
        }
        for &(key, coeff) in &self.products {
            state.apply_delta(key, coeff * rate);
        }
    }

    /// Net coefficient of `key` per unit rate
    pub fn net_coefficient(&self, key: StateKey) -> f64 {
        let produced: f64 = self
            .products
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, c)| c)
            .sum();
        let consumed: f64 = self
            .substrates
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, c)| c)
            .sum();
        produced - consumed
    }
}

/// Activation predicate over the current state
pub type Guard = fn(&MetabolicState, &FeedbackContext) -> bool;

/// Rate law; negative results are floored at zero
pub type RateLaw = fn(&MetabolicState, &FeedbackContext) -> f64;

/// One named biochemical transformation
#[derive(Clone)]
pub struct ReactionRule {
    pub id: RuleId,
    guard: Guard,
    rate: RateLaw,
    stoichiometry: ReactionStoichiometry,
}

impl std::fmt::Debug for ReactionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionRule")
            .field("id", &self.id)
            .field("stoichiometry", &self.stoichiometry)
            .finish()
    }
}

impl ReactionRule {
    pub fn new(
        id: RuleId,
        guard: Guard,
        rate: RateLaw,
        stoichiometry: ReactionStoichiometry,
    ) -> Self {
        Self {
            id,
            guard,
            rate,
            stoichiometry,
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn stoichiometry(&self) -> &ReactionStoichiometry {
        &self.stoichiometry
    }

    /// Whether the guard holds for the current state
    pub fn is_active(&self, state: &MetabolicState, ctx: &FeedbackContext) -> bool {
        (self.guard)(state, ctx)
    }

    /// Rate the rule would run at, ignoring the guard
    pub fn rate(&self, state: &MetabolicState, ctx: &FeedbackContext) -> EngineResult<f64> {
        let rate = (self.rate)(state, ctx);
        if !rate.is_finite() {
            return Err(EngineError::NonFiniteRate { rule: self.id, rate });
        }
        Ok(rate.max(0.0))
    }

    /// Fire the rule if its guard holds.
    ///
    /// Returns the applied rate, or `None` when the guard is false. The rate
    /// (or 0.0) is always recorded in the state's rate log.
    pub fn apply(
        &self,
        state: &mut MetabolicState,
        ctx: &FeedbackContext,
    ) -> EngineResult<Option<f64>> {
        if !self.is_active(state, ctx) {
            state.record_rate(self.id, 0.0);
            return Ok(None);
        }

        let rate = self.rate(state, ctx)?;
        self.stoichiometry.apply(state, rate);
        state.record_rate(self.id, rate);
        Ok(Some(rate))
    }
}
