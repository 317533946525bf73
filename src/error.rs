//! @acp:module "Errors"
//! @acp:summary "Crate-level error type and result alias"
//! @acp:domain cli
//! @acp:layer model

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by the RICE library
#[derive(Debug, Error)]
pub enum RiceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input rejected before any store interaction
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Unknown user '{name}'. Choose one of: {}", .roster.join(", "))]
    UnknownUser { name: String, roster: Vec<String> },

    #[error("Unknown impact '{0}'. Use minimal, low, medium, high, massive or 0.25, 0.5, 1, 2, 3")]
    UnknownImpact(String),

    #[error("Unknown store backend '{0}'. Use sheets, local or memory")]
    UnknownBackend(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RiceError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        RiceError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RiceError>;
