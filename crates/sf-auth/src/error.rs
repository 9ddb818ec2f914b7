//! Error types for salesforce-rest-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

use salesforce_rest_client::ErrorKind as ClientErrorKind;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for authentication operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from Salesforce.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// The token endpoint answered with a signature that does not match.
    #[error("Token signature does not match. Access token is invalid.")]
    InvalidSignature,

    /// The session expired and cannot be renewed without user interaction.
    #[error("Token expired")]
    TokenExpired,

    /// The web-server flow has no session yet; the user must visit the URL.
    #[error("Authorization required: redirect the user to {authorization_url}")]
    AuthorizationRequired { authorization_url: String },

    /// The `state` returned on the callback does not match the one issued.
    #[error("OAuth state mismatch")]
    StateMismatch,

    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_urlencoded::de::Error> for Error {
    fn from(err: serde_urlencoded::de::Error) -> Self {
        Error::with_source(ErrorKind::InvalidInput(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidInput(err.to_string()), err)
    }
}

impl From<salesforce_rest_client::Error> for Error {
    fn from(err: salesforce_rest_client::Error) -> Self {
        if let ClientErrorKind::Json(ref message) = err.kind {
            let kind = ErrorKind::Json(message.clone());
            return Error::with_source(kind, err);
        }

        // Sanitize any potential credential exposure
        let message = err.to_string();
        let detail = if message.contains("Bearer") || message.contains("token=") {
            "details redacted for security".to_string()
        } else {
            message
        };
        Error::with_source(
            ErrorKind::Http(format!("Unable to connect to Salesforce: {}", detail)),
            err,
        )
    }
}
