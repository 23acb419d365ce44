//! Configuration module for loading engine parameters.

mod parameters;

pub use parameters::{EngineParameters, ExchangeParameters, FeedbackParameters, StateParameters};
