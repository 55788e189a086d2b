//! Error handling module for the admin client.
//!
//! Every failure a screen can hit is folded into [`ClientError`]. Users only see
//! generic notification text; the details here go to the log.

use std::fmt;

use crate::validation::FieldErrors;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const HTTP_STATUS: &str = "HTTP_STATUS";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNKNOWN_RECORD: &str = "UNKNOWN_RECORD";
    pub const UNKNOWN_FIELD: &str = "UNKNOWN_FIELD";
    pub const CANCELLED: &str = "CANCELLED";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Flat failure taxonomy shown to screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network, server or payload failure
    Transport,
    /// Draft failed field validation
    Validation,
    /// Screen activation was cancelled while the request was in flight
    Cancelled,
}

/// Client error type.
#[derive(Debug)]
pub enum ClientError {
    /// Request never produced a response
    Transport(String),
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Response body could not be decoded
    Decode(String),
    /// Draft has field errors and the submit policy blocks it
    Validation(FieldErrors),
    /// Record id is not in the screen's current list
    UnknownRecord(i64),
    /// Field name is not part of the record
    UnknownField(String),
    /// Request was abandoned because its screen was cancelled
    Cancelled,
    /// Invalid configuration value
    Config(String),
}

impl ClientError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Status { .. } => codes::HTTP_STATUS,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::UnknownRecord(_) => codes::UNKNOWN_RECORD,
            ClientError::UnknownField(_) => codes::UNKNOWN_FIELD,
            ClientError::Cancelled => codes::CANCELLED,
            ClientError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Status { status, message } => format!("HTTP {status}: {message}"),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::Validation(errors) => errors
                .iter()
                .map(|(field, msg)| format!("{field}: {msg}"))
                .collect::<Vec<_>>()
                .join(", "),
            ClientError::UnknownRecord(id) => format!("Record {id} is not loaded"),
            ClientError::UnknownField(name) => format!("Unknown field {name}"),
            ClientError::Cancelled => "Request cancelled".to_string(),
            ClientError::Config(msg) => msg.clone(),
        }
    }

    /// Fold the error into the flat taxonomy.
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Validation(_) => FailureKind::Validation,
            ClientError::Cancelled => FailureKind::Cancelled,
            _ => FailureKind::Transport,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!("Transport error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(format!("Decode error: {}", err))
        } else {
            ClientError::Transport(format!("Transport error: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}
