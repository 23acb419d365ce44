//! External perturbations applied by scenarios before each step.
//!
//! Each variant models something outside the hepatic pools acting on them:
//! a meal, a stress hormone surge, or a peripheral condition that keeps
//! glucose from falling.

use serde::{Deserialize, Serialize};

use crate::state::{MetabolicState, Metabolite, Signal};

/// A scheduled or conditional change to the state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Perturbation {
    /// Adds fixed amounts on every tick in `start..=end`
    FeedingWindow {
        start: usize,
        end: usize,
        glucose: f64,
        amino_acid: f64,
    },
    /// Adds glucose on every positive multiple of `every`
    PeriodicMeal { every: usize, glucose: f64 },
    /// Holds epinephrine at a fixed level once `tick > after`
    StressInjection { after: usize, epinephrine: f64 },
    /// Resets glucose to `reset_to` whenever it is below `floor`
    GlucoseFloor { floor: f64, reset_to: f64 },
}

impl Perturbation {
    /// Whether this perturbation acts on `state` at `tick`
    pub fn is_due(&self, state: &MetabolicState, tick: usize) -> bool {
        match *self {
            Perturbation::FeedingWindow { start, end, .. } => (start..=end).contains(&tick),
            Perturbation::PeriodicMeal { every, .. } => every > 0 && tick > 0 && tick % every == 0,
            Perturbation::StressInjection { after, .. } => tick > after,
            Perturbation::GlucoseFloor { floor, .. } => state.metabolite(Metabolite::Glucose) < floor,
        }
    }

    /// Apply to `state` if due; returns whether anything changed
    pub fn apply(&self, state: &mut MetabolicState, tick: usize) -> bool {
        if !self.is_due(state, tick) {
            return false;
        }

        match *self {
            Perturbation::FeedingWindow {
                glucose, amino_acid, ..
            } => {
                state.apply_delta(Metabolite::Glucose.into(), glucose);
                state.apply_delta(Metabolite::AminoAcid.into(), amino_acid);
                log::debug!("tick {}: feeding +{} glucose, +{} amino_acid", tick, glucose, amino_acid);
            }
            Perturbation::PeriodicMeal { glucose, .. } => {
                state.apply_delta(Metabolite::Glucose.into(), glucose);
                log::debug!("tick {}: meal +{} glucose", tick, glucose);
            }
            Perturbation::StressInjection { epinephrine, .. } => {
                state.set_signal(Signal::Epinephrine, epinephrine);
            }
            Perturbation::GlucoseFloor { floor, reset_to } => {
                log::debug!(
                    "tick {}: glucose {:.2} below {}, reset to {}",
                    tick,
                    state.metabolite(Metabolite::Glucose),
                    floor,
                    reset_to
                );
                state.set_metabolite(Metabolite::Glucose, reset_to);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feeding_window_inclusive() {
        let p = Perturbation::FeedingWindow {
            start: 50,
            end: 60,
            glucose: 15.0,
            amino_acid: 5.0,
        };
        let state = MetabolicState::default();
        assert!(!p.is_due(&state, 49));
        assert!(p.is_due(&state, 50));
        assert!(p.is_due(&state, 60));
        assert!(!p.is_due(&state, 61));
    }

    #[test]
    fn test_periodic_meal_skips_tick_zero() {
        let p = Perturbation::PeriodicMeal {
            every: 360,
            glucose: 5.0,
        };
        let state = MetabolicState::default();
        assert!(!p.is_due(&state, 0));
        assert!(!p.is_due(&state, 359));
        assert!(p.is_due(&state, 360));
        assert!(p.is_due(&state, 720));
    }

    #[test]
    fn test_stress_injection_after() {
        let p = Perturbation::StressInjection {
            after: 150,
            epinephrine: 2.0,
        };
        let mut state = MetabolicState::default();
        assert!(!p.apply(&mut state, 150));
        assert_eq!(state.signal(Signal::Epinephrine), 0.1);
        assert!(p.apply(&mut state, 151));
        assert_eq!(state.signal(Signal::Epinephrine), 2.0);
    }

    #[test]
    fn test_glucose_floor() {
        let p = Perturbation::GlucoseFloor {
            floor: 110.0,
            reset_to: 120.0,
        };
        let mut state = MetabolicState::default();
        state.set_metabolite(Metabolite::Glucose, 109.9);
        assert!(p.apply(&mut state, 0));
        assert_eq!(state.metabolite(Metabolite::Glucose), 120.0);
        assert!(!p.apply(&mut state, 1));
    }

    #[test]
    fn test_json_tagging() {
        let p = Perturbation::PeriodicMeal {
            every: 360,
            glucose: 5.0,
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""kind":"periodic_meal""#));
    }
}
