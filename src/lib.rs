//! Liver Simulator X - discrete-time hepatic metabolism engine
//!
//! This library advances a closed set of metabolite pools and hormone
//! signals through an ordered rule system, one tick at a time, under
//! scenario presets for normal physiology, diabetic ketoacidosis and fatty
//! liver disease. Each run produces a flat per-tick history.

pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod metabolism;
pub mod scenario;
pub mod state;

pub use config::{EngineParameters, ExchangeParameters, FeedbackParameters, StateParameters};
pub use error::{EngineError, EngineResult};
pub use history::{History, HistoryRecord};
pub use metabolism::{
    sigmoid, FeedbackContext, HepaticEngine, HormoneFeedback, LiverPathways, ReactionRule,
    ReactionStoichiometry, StepReport,
};
pub use scenario::{Perturbation, Scenario, ScenarioDiagnostics, ScenarioRegistry, TickUnit};
pub use state::{MetabolicState, Metabolite, Parameter, RuleId, Signal, StateKey, StateKind};
