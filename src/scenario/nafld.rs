//! Non-alcoholic fatty liver disease.
//!
//! Hyperinsulinemia with halved insulin sensitivity under a continuous
//! high-sugar diet. Glucose is driven back above 110 whenever it dips,
//! keeping de novo lipogenesis and fatty acid esterification running, so
//! hepatic triglyceride accumulates. An optional inflammation level slows
//! beta-oxidation on top of that.

use super::{add_final_pools, Perturbation, Scenario, ScenarioDiagnostics, TickUnit};
use crate::history::History;
use crate::state::{MetabolicState, Metabolite, Parameter, Signal};

/// Resting hepatic triglyceride
const BASELINE_TRIGLYCERIDES: f64 = 10.0;

/// Configuration for the NAFLD preset.
#[derive(Debug, Clone, PartialEq)]
pub struct NafldConfig {
    pub initial_insulin: f64,
    pub initial_glucagon: f64,
    pub insulin_sensitivity: f64,
    pub initial_glucose: f64,
    /// Inflammation signal at start; left at rest when unset
    pub inflammation: Option<f64>,
    /// Glucose below this is reset to `glucose_reset`
    pub glucose_floor: f64,
    pub glucose_reset: f64,
    /// 48 h at one tick per minute
    pub ticks: usize,
}

impl Default for NafldConfig {
    fn default() -> Self {
        Self {
            initial_insulin: 0.8,
            initial_glucagon: 0.2,
            insulin_sensitivity: 0.5,
            initial_glucose: 110.0,
            inflammation: None,
            glucose_floor: 110.0,
            glucose_reset: 120.0,
            ticks: 48 * 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NafldScenario {
    pub config: NafldConfig,
    perturbations: Vec<Perturbation>,
}

impl NafldScenario {
    pub fn new() -> Self {
        Self::with_config(NafldConfig::default())
    }

    pub fn with_config(config: NafldConfig) -> Self {
        let perturbations = vec![Perturbation::GlucoseFloor {
            floor: config.glucose_floor,
            reset_to: config.glucose_reset,
        }];
        Self {
            config,
            perturbations,
        }
    }

    /// Severity from fold increase of triglyceride: 0 at baseline, 1 at 20x
    pub fn severity_for_triglycerides(triglycerides: f64) -> f64 {
        let fold = triglycerides / BASELINE_TRIGLYCERIDES;
        ((fold - 1.0) / 19.0).clamp(0.0, 1.0)
    }
}

impl Default for NafldScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for NafldScenario {
    fn name(&self) -> &'static str {
        "nafld"
    }

    fn description(&self) -> String {
        format!(
            "NAFLD: insulin sensitivity={:.2}, glucose floor={:.0}",
            self.config.insulin_sensitivity, self.config.glucose_floor
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
        state.set_parameter(Parameter::InsulinSensitivity, self.config.insulin_sensitivity);
        state.set_metabolite(Metabolite::Glucose, self.config.initial_glucose);
        if let Some(inflammation) = self.config.inflammation {
            state.set_signal(Signal::Inflammation, inflammation);
        }
    }

    fn perturbations(&self) -> &[Perturbation] {
        &self.perturbations
    }

    fn diagnostics(&self, history: &History) -> ScenarioDiagnostics {
        let mut diag = ScenarioDiagnostics::new("Non-Alcoholic Fatty Liver");
        add_final_pools(&mut diag, history);

        let tg = history.final_value("triglycerides");
        diag.severity = Self::severity_for_triglycerides(tg);
        diag.add_metric("triglyceride_fold", tg / BASELINE_TRIGLYCERIDES);
        diag.add_metric("mean_rate_deNovoLipogenesis", history.mean("rate_deNovoLipogenesis"));
        diag.add_metric("mean_rate_lipidTransport", history.mean("rate_lipidTransport"));
        diag.add_metric("mean_rate_betaOxidation", history.mean("rate_betaOxidation"));

        diag.add_status(&format!(
            "Hepatic triglyceride {:.1} ({:.1}x baseline)",
            tg,
            tg / BASELINE_TRIGLYCERIDES
        ));
        if tg > 5.0 * BASELINE_TRIGLYCERIDES {
            diag.add_warning("Marked hepatic steatosis");
        }
        diag
    }
}
