//! Error types for salesforce-rest-api.

/// Result type alias for REST operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for REST operations.
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

    /// The HTTP status Salesforce answered with, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        if let ErrorKind::UnexpectedStatus { actual, .. } = self.kind {
            return Some(actual);
        }
        self.source
            .as_ref()?
            .downcast_ref::<salesforce_rest_client::Error>()?
            .status()
    }

    pub(crate) fn invalid_input(error_code: &str, message: &str) -> Self {
        Error::new(ErrorKind::Salesforce {
            error_code: error_code.to_string(),
            message: message.to_string(),
        })
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Error reported by Salesforce, or input rejected before sending.
    #[error("Salesforce error: {error_code} - {message}")]
    Salesforce { error_code: String, message: String },

    /// A successful response carried a different status than the endpoint promises.
    #[error("Unexpected status: expected {expected}, got {actual}")]
    UnexpectedStatus { expected: u16, actual: u16 },

    /// The web-server flow needs the user to log in first.
    #[error("Authorization required: redirect the user to {authorization_url}")]
    AuthorizationRequired { authorization_url: String },

    /// Authentication failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// HTTP or transport error.
    #[error("Client error: {0}")]
    Client(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<salesforce_rest_client::Error> for Error {
    fn from(err: salesforce_rest_client::Error) -> Self {
        use salesforce_rest_client::ErrorKind as ClientKind;

        let kind = match &err.kind {
            ClientKind::SalesforceApi {
                error_code,
                message,
                ..
            } => ErrorKind::Salesforce {
                error_code: error_code.clone(),
                message: message.clone(),
            },
            ClientKind::UnexpectedStatus { expected, actual } => ErrorKind::UnexpectedStatus {
                expected: *expected,
                actual: *actual,
            },
            ClientKind::Json(message) => ErrorKind::Json(message.clone()),
            // Client errors are already sanitized
            _ => ErrorKind::Client(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<salesforce_rest_auth::Error> for Error {
    fn from(err: salesforce_rest_auth::Error) -> Self {
        let kind = match &err.kind {
            salesforce_rest_auth::ErrorKind::AuthorizationRequired { authorization_url } => {
                ErrorKind::AuthorizationRequired {
                    authorization_url: authorization_url.clone(),
                }
            }
            _ => ErrorKind::Auth(err.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}
