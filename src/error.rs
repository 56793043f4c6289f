//! Error taxonomy shared by every core operation.
//!
//! Core functions never format HTTP responses; they return a `CoreError`
//! carrying its kind plus enough detail (message, raw-output excerpt) for the
//! boundary to pick a status code and a user-facing message.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Required credential or setting is absent. Never retried.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Missing required field or malformed input, rejected before any model call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network or provider failure after the fallback policy was exhausted.
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    /// Model text was not parseable JSON after fence stripping.
    #[error("model returned malformed output: {reason}")]
    MalformedModelOutput { reason: String, excerpt: String },

    /// Parsed JSON does not have the required shape.
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl CoreError {
    /// Stable machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::ModelInvocation(_) => "model_invocation_error",
            Self::MalformedModelOutput { .. } => "malformed_model_output",
            Self::SchemaValidation(_) => "schema_validation_error",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized => "unauthorized",
            Self::Persistence(_) => "persistence_error",
        }
    }

    /// Raw-output excerpt, only present for malformed model output.
    pub fn excerpt(&self) -> Option<&str> {
        match self {
            Self::MalformedModelOutput { excerpt, .. } => Some(excerpt),
            _ => None,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaValidation(msg.into())
    }
}
