//! Error types for the RTMS client.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Message shown when the backend cannot be reached at all.
pub const NETWORK_UNREACHABLE_MESSAGE: &str =
    "Network connection failed. Please check your internet connection.";

/// Message shown when the backend rejects the current credential.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Coarse failure classification exposed to callers.
///
/// Every [`RtmsError`] maps onto exactly one kind. The session layer only
/// branches on `Unauthorized`; everything else ends up as a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    NetworkUnreachable,
    Unauthorized,
    Validation,
    NotFound,
    Generic,
}

/// A shared error type for the whole client.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum RtmsError {
    /// The backend could not be reached (connect failure, timeout).
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    /// HTTP 401 from the backend.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Form-level validation failure, never sent to the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Any other non-2xx response. `message` is already user-facing.
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// IO error (local storage)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RtmsError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an Http error from a status code and message
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    // ============================================================================
    // Classification
    // ============================================================================

    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NetworkUnreachable(_) => ErrorKind::NetworkUnreachable,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Generic,
        }
    }

    /// Check if this error should invalidate the current session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Text suitable for a transient notice.
    ///
    /// Network and auth failures use fixed wording; everything else passes the
    /// underlying message through.
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkUnreachable(_) => NETWORK_UNREACHABLE_MESSAGE.to_string(),
            Self::Unauthorized(_) => SESSION_EXPIRED_MESSAGE.to_string(),
            Self::Validation(message) | Self::Config(message) | Self::Internal(message) => {
                message.clone()
            }
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RtmsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RtmsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RtmsError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for RtmsError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (binary edge only)
impl From<anyhow::Error> for RtmsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RtmsError>`.
pub type Result<T> = std::result::Result<T, RtmsError>;
