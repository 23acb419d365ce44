//! Engine parameter structures.
//!
//! Feedback constants, state policy and optional systemic exchange, loadable
//! from JSON with a logged fallback to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level parameters container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    /// Hormone feedback constants
    pub feedback: FeedbackParameters,
    /// Policy applied to every state the engine builds
    pub state: StateParameters,
    /// Perfusion and basal turnover after the rules; off unless enabled
    pub exchange: ExchangeParameters,
}

impl EngineParameters {
    /// Load parameters from JSON files, or use defaults if files don't exist
    pub fn load_or_default() -> Self {
        Self::load_from_dir("data/parameters")
    }

    /// Load parameters from specific directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let feedback = FeedbackParameters::load_or_default(dir.join("feedback.json"));
        let state = StateParameters::load_or_default(dir.join("state.json"));
        let exchange = ExchangeParameters::load_or_default(dir.join("exchange.json"));

        Self {
            feedback,
            state,
            exchange,
        }
    }

    /// Closed system: feedback and rules only (the default)
    pub fn closed_system() -> Self {
        Self::default()
    }

    /// Perfused liver: closed system plus oxygen supply and basal ATP turnover
    pub fn perfused() -> Self {
        Self {
            exchange: ExchangeParameters::perfused(),
            ..Self::default()
        }
    }
}

/// Reads `path` as JSON, falling back to `T::default()` with a log line.
fn load_json_or_default<T, P>(path: P, what: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
    P: AsRef<Path>,
{
    match std::fs::read_to_string(path.as_ref()) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(params) => {
                log::info!("Loaded {} parameters from {:?}", what, path.as_ref());
                params
            }
            Err(e) => {
                log::warn!("Failed to parse {} parameters: {}, using defaults", what, e);
                T::default()
            }
        },
        Err(_) => {
            log::info!("{} parameters file not found, using defaults", what);
            T::default()
        }
    }
}

/// Hormone feedback constants
///
/// Setpoints are in the model's glucose units (resting glucose is 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackParameters {
    /// Glucose at which insulin is half-maximal
    pub insulin_setpoint: f64,
    /// Logistic steepness of insulin secretion
    pub insulin_steepness: f64,
    /// Glucose at which glucagon is half-maximal
    pub glucagon_setpoint: f64,
    /// Logistic steepness of glucagon secretion
    pub glucagon_steepness: f64,
    /// Fractional slowdown of energy-yielding rules per unit inflammation
    pub inflammation_rate_penalty: f64,
}

impl FeedbackParameters {
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_json_or_default(path, "feedback")
    }
}

impl Default for FeedbackParameters {
    fn default() -> Self {
        Self {
            insulin_setpoint: 110.0,
            insulin_steepness: 0.1,
            glucagon_setpoint: 90.0,
            glucagon_steepness: 0.1,
            inflammation_rate_penalty: 0.5,
        }
    }
}

/// State container policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateParameters {
    /// Floor metabolite pools at zero
    pub clamp_non_negative: bool,
}

impl StateParameters {
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_json_or_default(path, "state")
    }
}

impl Default for StateParameters {
    fn default() -> Self {
        Self {
            clamp_non_negative: true,
        }
    }
}

/// Systemic exchange with the circulation
///
/// Disabled by default; the rates only apply once `enabled` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeParameters {
    /// Apply perfusion and turnover at all
    pub enabled: bool,
    /// Oxygen level of incoming arterial blood
    pub arterial_oxygen: f64,
    /// Fraction of the arterial-hepatic oxygen gap closed per tick
    pub perfusion_fraction: f64,
    /// Fraction of ATP hydrolysed to ADP per tick by basal cellular work
    pub basal_atp_turnover: f64,
}

impl ExchangeParameters {
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        load_json_or_default(path, "exchange")
    }

    /// Default rates, switched on
    pub fn perfused() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}

impl Default for ExchangeParameters {
    fn default() -> Self {
        Self {
            enabled: false,
            arterial_oxygen: 100.0,
            perfusion_fraction: 0.05,
            basal_atp_turnover: 0.02,
        }
    }
}
