//! Baseline liver: resting state, one meal, one stress surge.

use super::{add_final_pools, Perturbation, Scenario, ScenarioDiagnostics};
use crate::history::History;
use crate::state::MetabolicState;

/// Default-state run with a meal and a late epinephrine surge
#[derive(Debug, Clone)]
pub struct BaselineScenario {
    perturbations: Vec<Perturbation>,
}

impl BaselineScenario {
    pub fn new() -> Self {
        Self {
            perturbations: vec![
                Perturbation::FeedingWindow {
                    start: 50,
                    end: 60,
                    glucose: 15.0,
                    amino_acid: 5.0,
                },
                Perturbation::StressInjection {
                    after: 150,
                    epinephrine: 2.0,
                },
            ],
        }
    }

    /// Same initial state with a custom perturbation list
    pub fn with_perturbations(perturbations: Vec<Perturbation>) -> Self {
        Self { perturbations }
    }
}

impl Default for BaselineScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for BaselineScenario {
    fn name(&self) -> &'static str {
        "baseline"
    }

    fn description(&self) -> String {
        format!("Baseline liver, {} perturbations", self.perturbations.len())
    }

    fn default_ticks(&self) -> usize {
        200
    }

    fn initialize(&self, _state: &mut MetabolicState) {}

    fn perturbations(&self) -> &[Perturbation] {
        &self.perturbations
    }

    fn diagnostics(&self, history: &History) -> ScenarioDiagnostics {
        let mut diag = ScenarioDiagnostics::new("Baseline Liver");
        add_final_pools(&mut diag, history);

        if let Some((tick, peak)) = history.max_of("glucose") {
            diag.add_metric("peak_glucose", peak);
            diag.add_metric("peak_glucose_time", history.records()[tick].time);
        }
        diag.add_metric("final_urea", history.final_value("urea"));
        diag.add_metric("final_oxygen", history.final_value("oxygen"));

        let glycogen = history.series("glycogen");
        if let (Some(first), Some(last)) = (glycogen.first(), glycogen.last()) {
            diag.add_status(&format!("Glycogen {:.1} -> {:.1}", first, last));
        }
        if history.final_value("oxygen") <= 20.0 {
            diag.add_warning("Oxygen at or below respiration threshold");
        }
        diag
    }
}
