use super::error_code::{self, ErrorCode};
use super::{ConfigError, SnapshotError};

/// Errors surfaced by route selection and feedback.
///
/// Every variant is a rejected single operation. Validation happens before
/// any mutation, so a rejected call leaves beliefs and memory untouched.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("outcome {value} outside [0, 1]")]
    InvalidOutcome { value: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("no candidate routes offered for context {context}")]
    NoCandidates { context: String },

    #[error("route {route} was never offered for context {context}")]
    RouteNotRecognized { context: String, route: String },

    #[error("decision {decision_id} is already {phase}")]
    DecisionClosed { decision_id: String, phase: String },

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl RouterError {
    /// Shorthand for an `InvalidConfig` on a named field.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig(ConfigError::invalid(field, message))
    }
}

impl ErrorCode for RouterError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidOutcome { .. } => error_code::INVALID_OUTCOME,
            Self::InvalidConfig(e) => e.error_code(),
            Self::NoCandidates { .. } => error_code::NO_CANDIDATES,
            Self::RouteNotRecognized { .. } => error_code::ROUTE_NOT_RECOGNIZED,
            Self::DecisionClosed { .. } => error_code::DECISION_CLOSED,
            Self::Snapshot(e) => e.error_code(),
        }
    }
}

/// Convenience alias used throughout routewise.
pub type RouterResult<T> = Result<T, RouterError>;
