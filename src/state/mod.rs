//! State management for the hepatic simulation.
//!
//! Contains the closed key vocabularies and the state container that the
//! engine mutates in place each tick.

mod metabolic;
mod vocabulary;

pub use metabolic::MetabolicState;
pub use vocabulary::{Metabolite, Parameter, RuleId, Signal, StateKey, StateKind};
