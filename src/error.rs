//! Error types for the hepatic engine.
//!
//! The engine has almost no failure surface: guards that never fire and
//! pools that bottom out are silent by construction. What remains is
//! programmer error (an unknown vocabulary key) and numerical breakdown
//! inside a rule, both of which abort the run.

use thiserror::Error;

use crate::state::{RuleId, StateKind};

/// Unified error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A metabolite, signal, parameter or rule name outside the fixed vocabulary
    #[error("unknown {kind} key '{key}'")]
    UnknownKey { kind: StateKind, key: String },

    /// A rule produced NaN or infinity; state is already partially mutated
    #[error("rule '{rule}' produced a non-finite rate ({rate})")]
    NonFiniteRate { rule: RuleId, rate: f64 },
}

impl EngineError {
    /// Creates an unknown-key error.
    pub fn unknown_key(kind: StateKind, key: impl Into<String>) -> Self {
        EngineError::UnknownKey {
            kind,
            key: key.into(),
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
