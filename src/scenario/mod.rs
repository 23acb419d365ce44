//! Scenario presets for hepatic simulation runs.
//!
//! A scenario seeds the initial state and perturbs it before every step:
//! - Baseline: resting liver with one meal and a late stress surge
//! - Normal: fasting start with a meal every six hours
//! - DKA: insulin deficiency with high glucagon, ketone accumulation
//! - NAFLD: hyperinsulinemia with sustained hyperglycemia, hepatic fat gain
//!
//! Each preset implements the `Scenario` trait, allowing it to:
//! - Set initial metabolites, signals and parameters
//! - Apply perturbations ahead of feedback and rules each tick
//! - Map ticks to time
//! - Report scenario-specific diagnostics from the finished history

pub mod baseline;
pub mod dka;
pub mod nafld;
pub mod normal;
pub mod perturbation;

pub use baseline::BaselineScenario;
pub use dka::{simulated_ph, DkaConfig, DkaScenario};
pub use nafld::{NafldConfig, NafldScenario};
pub use normal::{NormalConfig, NormalScenario};
pub use perturbation::Perturbation;

use crate::history::History;
use crate::state::MetabolicState;

/// What one tick represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    /// Dimensionless step; time equals the tick index
    Step,
    /// One minute; time is reported in hours
    Minute,
}

impl TickUnit {
    pub fn time_at(self, tick: usize) -> f64 {
        match self {
            TickUnit::Step => tick as f64,
            TickUnit::Minute => tick as f64 / 60.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TickUnit::Step => "step",
            TickUnit::Minute => "hours",
        }
    }
}

/// Trait for scenario presets driving a run.
///
/// Call order per run: `initialize` once on a fresh state, then for each
/// tick `perturb` followed by the engine step. `diagnostics` reads the
/// finished history.
pub trait Scenario {
    /// Short preset name
    fn name(&self) -> &'static str;

    /// One-line description for display
    fn description(&self) -> String;

    /// Run length used when the caller does not choose one
    fn default_ticks(&self) -> usize;

    fn tick_unit(&self) -> TickUnit {
        TickUnit::Step
    }

    /// Time value recorded for `tick`
    fn time_at(&self, tick: usize) -> f64 {
        self.tick_unit().time_at(tick)
    }

    /// Seed the initial state before the first tick
    fn initialize(&self, state: &mut MetabolicState);

    /// Perturbations applied, in order, before every step
    fn perturbations(&self) -> &[Perturbation];

    /// Apply this tick's perturbations
    fn perturb(&self, state: &mut MetabolicState, tick: usize) {
        for p in self.perturbations() {
            p.apply(state, tick);
        }
    }

    /// Scenario-specific summary of a finished run
    fn diagnostics(&self, history: &History) -> ScenarioDiagnostics;
}

/// Scenario-specific diagnostic information.
#[derive(Debug, Clone)]
pub struct ScenarioDiagnostics {
    /// Scenario name
    pub scenario_name: String,
    /// Pathology severity (0.0 = normal, 1.0 = severe)
    pub severity: f64,
    /// Scenario-specific metrics as key-value pairs
    pub metrics: Vec<(String, f64)>,
    /// Status messages
    pub status: Vec<String>,
    /// Warning messages
    pub warnings: Vec<String>,
}

impl ScenarioDiagnostics {
    pub fn new(scenario_name: &str) -> Self {
        Self {
            scenario_name: scenario_name.to_string(),
            severity: 0.0,
            metrics: Vec::new(),
            status: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_metric(&mut self, name: &str, value: f64) {
        self.metrics.push((name.to_string(), value));
    }

    pub fn add_status(&mut self, msg: &str) {
        self.status.push(msg.to_string());
    }

    pub fn add_warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Print a formatted summary
    pub fn print_summary(&self) {
        println!("=== Scenario: {} ===", self.scenario_name);
        println!("Severity: {:.1}%", self.severity * 100.0);
        println!();

        if !self.metrics.is_empty() {
            println!("Metrics:");
            for (name, value) in &self.metrics {
                println!("  {}: {:.4}", name, value);
            }
            println!();
        }

        if !self.status.is_empty() {
            println!("Status:");
            for msg in &self.status {
                println!("  {}", msg);
            }
            println!();
        }

        if !self.warnings.is_empty() {
            println!("Warnings:");
            for msg in &self.warnings {
                println!("  {}", msg);
            }
        }
    }
}

/// Final-value metrics shared by every preset
pub(crate) fn add_final_pools(diag: &mut ScenarioDiagnostics, history: &History) {
    for key in ["glucose", "glycogen", "fatty_acid", "ketone_body", "triglycerides", "atp"] {
        diag.add_metric(&format!("final_{}", key), history.final_value(key));
    }
}

/// Registry of available scenario presets.
pub struct ScenarioRegistry;

impl ScenarioRegistry {
    pub fn list_presets() -> Vec<&'static str> {
        vec!["baseline", "normal", "dka", "nafld"]
    }

    /// Create a preset by name with its default configuration
    pub fn create(name: &str) -> Option<Box<dyn Scenario>> {
        match name.to_lowercase().as_str() {
            "baseline" => Some(Box::new(BaselineScenario::new())),
            "normal" => Some(Box::new(NormalScenario::new())),
            "dka" => Some(Box::new(DkaScenario::new())),
            "nafld" => Some(Box::new(NafldScenario::new())),
            _ => None,
        }
    }

    pub fn help(name: &str) -> Option<&'static str> {
        match name.to_lowercase().as_str() {
            "baseline" => Some(
                "Baseline Liver\n\
                 Ticks: 200 steps\n\
                 Events: meal at ticks 50-60 (+15 glucose, +5 amino acid), \
                 epinephrine 2.0 after tick 150",
            ),
            "normal" => Some(
                "Normal Physiology\n\
                 Ticks: 2880 minutes (48 h)\n\
                 Start: fasting glucose 5, insulin 0.5, glucagon 0.5\n\
                 Events: +5 glucose every 6 h",
            ),
            "dka" => Some(
                "Diabetic Ketoacidosis\n\
                 Ticks: 1440 minutes (24 h)\n\
                 Start: insulin 0.05, glucagon 0.9, glucose 25, fatty acid 2\n\
                 Events: glucose held at or above 20\n\
                 Output: simulated pH = 7.4 - 0.025 * ketone_body",
            ),
            "nafld" => Some(
                "Non-Alcoholic Fatty Liver Disease\n\
                 Ticks: 2880 minutes (48 h)\n\
                 Start: insulin 0.8, glucagon 0.2, insulin sensitivity 0.5, glucose 110\n\
                 Events: glucose below 110 reset to 120 (high-sugar diet)",
            ),
            _ => None,
        }
    }
}
