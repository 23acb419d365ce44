//! Diabetic ketoacidosis.
//!
//! Near-absent insulin with high glucagon: adipose lipolysis floods the
//! liver with fatty acid, beta-oxidation outpaces acetyl-CoA use and the
//! overflow becomes ketone bodies. Peripheral glucose uptake is absent, so
//! glucose is held above a floor. Glycogen keeps its resting value unless
//! `initial_glycogen` is set.
//!
//! | Ketone body | Simulated pH | Reading        |
//! |-------------|--------------|----------------|
//! | < 4         | > 7.30       | compensated    |
//! | 4 - 12      | 7.10 - 7.30  | moderate DKA   |
//! | > 12        | < 7.10       | severe DKA     |

use super::{add_final_pools, Perturbation, Scenario, ScenarioDiagnostics, TickUnit};
use crate::history::History;
use crate::state::{MetabolicState, Metabolite, Signal};

/// Arterial pH at zero ketone load
pub const NORMAL_PH: f64 = 7.4;

/// pH drop per unit ketone body
pub const PH_PER_KETONE: f64 = 0.025;

/// Linear acid load model: 7.4 at zero ketones
pub fn simulated_ph(ketone_body: f64) -> f64 {
    NORMAL_PH - PH_PER_KETONE * ketone_body
}

/// Configuration for the DKA preset.
#[derive(Debug, Clone, PartialEq)]
pub struct DkaConfig {
    pub initial_insulin: f64,
    pub initial_glucagon: f64,
    pub initial_glucose: f64,
    pub initial_fatty_acid: f64,
    /// Overrides the resting glycogen store when set
    pub initial_glycogen: Option<f64>,
    /// Glucose never allowed below this
    pub glucose_floor: f64,
    /// 24 h at one tick per minute
    pub ticks: usize,
}

impl Default for DkaConfig {
    fn default() -> Self {
        Self {
            initial_insulin: 0.05,
            initial_glucagon: 0.9,
            initial_glucose: 25.0,
            initial_fatty_acid: 2.0,
            initial_glycogen: None,
            glucose_floor: 20.0,
            ticks: 24 * 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DkaScenario {
    pub config: DkaConfig,
    perturbations: Vec<Perturbation>,
}

impl DkaScenario {
    pub fn new() -> Self {
        Self::with_config(DkaConfig::default())
    }

    pub fn with_config(config: DkaConfig) -> Self {
        let perturbations = vec![Perturbation::GlucoseFloor {
            floor: config.glucose_floor,
            reset_to: config.glucose_floor,
        }];
        Self {
            config,
            perturbations,
        }
    }

    /// Severity from final pH: 0 at 7.4, 1 at 7.0 or below
    pub fn severity_for_ph(ph: f64) -> f64 {
        ((NORMAL_PH - ph) / 0.4).clamp(0.0, 1.0)
    }
}

impl Default for DkaScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for DkaScenario {
    fn name(&self) -> &'static str {
        "dka"
    }

    fn description(&self) -> String {
        format!(
            "DKA: insulin={:.2}, glucagon={:.2}, glucose floor={:.0}",
            self.config.initial_insulin, self.config.initial_glucagon, self.config.glucose_floor
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
        state.set_metabolite(Metabolite::FattyAcid, self.config.initial_fatty_acid);
        if let Some(glycogen) = self.config.initial_glycogen {
            state.set_metabolite(Metabolite::Glycogen, glycogen);
        }
    }

    fn perturbations(&self) -> &[Perturbation] {
        &self.perturbations
    }

    fn diagnostics(&self, history: &History) -> ScenarioDiagnostics {
        let mut diag = ScenarioDiagnostics::new("Diabetic Ketoacidosis");
        add_final_pools(&mut diag, history);

        let ketone = history.final_value("ketone_body");
        let ph = simulated_ph(ketone);
        diag.severity = Self::severity_for_ph(ph);
        diag.add_metric("simulated_ph", ph);
        diag.add_metric("mean_rate_ketogenesis", history.mean("rate_ketogenesis"));
        diag.add_metric("mean_rate_adiposeLipolysis", history.mean("rate_adiposeLipolysis"));

        let reading = if ph > 7.3 {
            "compensated"
        } else if ph > 7.1 {
            "moderate DKA"
        } else {
            "severe DKA"
        };
        diag.add_status(&format!("Simulated pH {:.2} ({})", ph, reading));

        if ph < 7.3 {
            diag.add_warning("Metabolic acidosis: pH below 7.3");
        }
        if history.final_value("atp") < 30.0 {
            diag.add_warning("ATP below gluconeogenesis threshold");
        }
        diag
    }
}
