//! Glucose-driven hormone feedback.
//!
//! Insulin and glucagon are recomputed from current glucose at the start of
//! every tick and overwrite whatever the previous tick (or a scenario preset)
//! left in the state. There is no memory beyond glucose itself; this
//! memorylessness is what produces the oscillations seen around the
//! setpoints.
//!
//! insulin  = σ(+k₁ · (glucose − setpoint_high))
//! glucagon = σ(−k₂ · (glucose − setpoint_low))

use crate::config::FeedbackParameters;
use crate::state::{MetabolicState, Metabolite, Signal};

/// Smallest distance kept between a hormone level and 0 or 1
pub const SIGMOID_MARGIN: f64 = 1e-12;

/// Logistic function, kept strictly inside (0,1) for every finite input
///
/// `exp` saturates for |x| beyond ~37 in double precision, which would
/// otherwise return exactly 0.0 or 1.0.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    (1.0 / (1.0 + (-x).exp())).clamp(SIGMOID_MARGIN, 1.0 - SIGMOID_MARGIN)
}

/// Per-tick values derived by the feedback stage and shared with every rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackContext {
    pub insulin: f64,
    pub glucagon: f64,
    /// Multiplier on energy-yielding rule rates, 1.0 without inflammation
    pub metabolic_rate_modifier: f64,
}

impl FeedbackContext {
    /// Midpoint hormones and an unmodified metabolic rate
    pub fn neutral() -> Self {
        Self {
            insulin: 0.5,
            glucagon: 0.5,
            metabolic_rate_modifier: 1.0,
        }
    }
}

/// Hormone feedback stage
#[derive(Debug, Clone)]
pub struct HormoneFeedback {
    pub params: FeedbackParameters,
}

impl HormoneFeedback {
    pub fn new(params: FeedbackParameters) -> Self {
        Self { params }
    }

    pub fn insulin_for(&self, glucose: f64) -> f64 {
        sigmoid(self.params.insulin_steepness * (glucose - self.params.insulin_setpoint))
    }

    pub fn glucagon_for(&self, glucose: f64) -> f64 {
        sigmoid(-self.params.glucagon_steepness * (glucose - self.params.glucagon_setpoint))
    }

    /// `1 - penalty · inflammation`, floored at zero
    pub fn metabolic_rate_modifier(&self, inflammation: f64) -> f64 {
        (1.0 - self.params.inflammation_rate_penalty * inflammation).max(0.0)
    }

    /// Recompute hormones from glucose and write them into the state
    pub fn update(&self, state: &mut MetabolicState) -> FeedbackContext {
        let glucose = state.metabolite(Metabolite::Glucose);
        let ctx = FeedbackContext {
            insulin: self.insulin_for(glucose),
            glucagon: self.glucagon_for(glucose),
            metabolic_rate_modifier: self.metabolic_rate_modifier(state.signal(Signal::Inflammation)),
        };

        state.set_signal(Signal::Insulin, ctx.insulin);
        state.set_signal(Signal::Glucagon, ctx.glucagon);

        log::trace!(
            "feedback: glucose={:.2} insulin={:.4} glucagon={:.4} rate_mod={:.3}",
            glucose,
            ctx.insulin,
            ctx.glucagon,
            ctx.metabolic_rate_modifier
        );

        ctx
    }
}

impl Default for HormoneFeedback {
    fn default() -> Self {
        Self::new(FeedbackParameters::default())
    }
}
