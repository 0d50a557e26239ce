//! Unified application error types for Lectoria.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The auth pipeline keeps its own
//! precise stage errors and converts them here at the operation boundary.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Authentication failed (missing credential, malformed or expired token).
    Authentication,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// A system invariant was broken (e.g. a verified token whose subject
    /// has no backing user record). Alert-worthy, unlike ordinary auth errors.
    Integrity,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// A configuration error occurred.
    Configuration,
    /// An external service (e.g. the SSO provider) failed.
    ExternalService,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Integrity => write!(f, "INTEGRITY"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Lectoria.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create an integrity error.
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Integrity, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Standardized public API error codes.
///
/// These are the codes (and associated HTTP statuses) the operations layer
/// returns to clients. The vocabulary is deliberately small: several internal
/// auth failure kinds collapse into `AuthInvalidToken` so that responses do
/// not reveal why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    /// Something failed inside the service itself.
    InternalServerError,
    /// Authentication is required to call this method.
    AuthRequired,
    /// The supplied token could not be accepted.
    AuthInvalidToken,
    /// The supplied token has expired; re-authentication is needed.
    AuthExpiredToken,
    /// The caller lacks permission for this method.
    Forbidden,
}

impl ApiErrorCode {
    /// Stable numeric wire code.
    pub fn code(&self) -> u16 {
        match self {
            Self::InternalServerError => 1,
            Self::Forbidden => 7,
            Self::AuthRequired => 10,
            Self::AuthInvalidToken => 11,
            Self::AuthExpiredToken => 12,
        }
    }

    /// HTTP status associated with this code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InternalServerError => 500,
            Self::Forbidden => 403,
            Self::AuthRequired => 401,
            Self::AuthInvalidToken => 400,
            Self::AuthExpiredToken => 400,
        }
    }

    /// Default client-facing message for this code.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InternalServerError => "Internal server error!",
            Self::Forbidden => "You have no access to call this method!",
            Self::AuthRequired => "Authentication required!",
            Self::AuthInvalidToken => "Unable to validate the token!",
            Self::AuthExpiredToken => "Token has expired, please re-authenticate!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::authentication("bad token");
        assert_eq!(err.to_string(), "AUTHENTICATION: bad token");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Internal, "wrapped", io);
        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.message, "wrapped");
    }

    #[test]
    fn test_api_error_codes_are_stable() {
        assert_eq!(ApiErrorCode::Forbidden.code(), 7);
        assert_eq!(ApiErrorCode::AuthRequired.code(), 10);
        assert_eq!(ApiErrorCode::AuthInvalidToken.code(), 11);
        assert_eq!(ApiErrorCode::AuthExpiredToken.code(), 12);
    }

    #[test]
    fn test_api_error_http_status() {
        assert_eq!(ApiErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ApiErrorCode::Forbidden.http_status(), 403);
    }
}
