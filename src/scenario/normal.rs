//! Normal physiology reference run.
//!
//! Starts from a fasting state and eats every six hours. Used as the
//! control against which the NAFLD trajectory is compared;
//! `NormalConfig::fasting_24h` is the 24 h meal-free control for DKA.

use super::{add_final_pools, Perturbation, Scenario, ScenarioDiagnostics, TickUnit};
use crate::history::History;
use crate::state::{MetabolicState, Metabolite, Signal};

/// Configuration for the normal preset.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalConfig {
    pub initial_insulin: f64,
    pub initial_glucagon: f64,
    pub initial_glucose: f64,
    /// Overrides the resting fatty acid pool when set
    pub initial_fatty_acid: Option<f64>,
    /// Minutes between meals; 0 disables meals
    pub meal_interval: usize,
    pub meal_glucose: f64,
    /// 48 h at one tick per minute
    pub ticks: usize,
}

impl NormalConfig {
    /// 24 h fast with low fatty acid and no meals
    pub fn fasting_24h() -> Self {
        Self {
            initial_fatty_acid: Some(0.5),
            meal_interval: 0,
            ticks: 24 * 60,
            ..Self::default()
        }
    }
}

impl Default for NormalConfig {
    fn default() -> Self {
        Self {
            initial_insulin: 0.5,
            initial_glucagon: 0.5,
            initial_glucose: 5.0,
            initial_fatty_acid: None,
            meal_interval: 360,
            meal_glucose: 5.0,
            ticks: 48 * 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalScenario {
    pub config: NormalConfig,
    perturbations: Vec<Perturbation>,
}

impl NormalScenario {
    pub fn new() -> Self {
        Self::with_config(NormalConfig::default())
    }

    pub fn with_config(config: NormalConfig) -> Self {
        let perturbations = vec![Perturbation::PeriodicMeal {
            every: config.meal_interval,
            glucose: config.meal_glucose,
        }];
        Self {
            config,
            perturbations,
        }
    }
}

impl Default for NormalScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for NormalScenario {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn description(&self) -> String {
        if self.config.meal_interval == 0 {
            return "Normal: fasting, no meals".to_string();
        }
        format!(
            "Normal: meals +{} glucose every {} min",
            self.config.meal_glucose, self.config.meal_interval
        )
    }

    fn default_ticks(&self) -> usize {
        self.config.ticks
    }

    fn tick_unit(&self) -> TickUnit {
        TickUnit::Minute
    }

    fn initialize(&self, state: &mut MetabolicState) {
        state.set_signal(Signal::Insulin, self.config.initial_insulin);
        state.set_signal(Signal::Glucagon, self.config.initial_glucagon);
        state.set_metabolite(Metabolite::Glucose, self.config.initial_glucose);
        if let Some(fatty_acid) = self.config.initial_fatty_acid {
            state.set_metabolite(Metabolite::FattyAcid, fatty_acid);
        }
    }

    fn perturbations(&self) -> &[Perturbation] {
        &self.perturbations
    }

    fn diagnostics(&self, history: &History) -> ScenarioDiagnostics {
        let mut diag = ScenarioDiagnostics::new("Normal Physiology");
        add_final_pools(&mut diag, history);
        diag.add_metric("mean_glucose", history.mean("glucose"));
        diag.add_metric("mean_insulin", history.mean("insulin"));

        let hours = history.last().map(|r| r.time).unwrap_or(0.0);
        diag.add_status(&format!("{:.1} h simulated", hours));
        diag
    }
}
