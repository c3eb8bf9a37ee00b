//! Error types for the Gopher client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when submitting or polling a job
///
/// `RequestFailed`, `Http` and `ParseError` are transport failures: the client
/// could not talk to the service or could not make sense of what came back.
/// `Service` means the service understood the request and rejected it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Non-2xx status whose body carried no usable error message
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// 2xx response with a body of the wrong shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The service rejected the job
    #[error("API error: {message}")]
    Service {
        /// Message reported by the service
        message: String,
        /// Optional service error code
        code: Option<i64>,
    },

    /// The attempt budget ran out before the job finished
    #[error("timeout waiting for search results after {attempts} attempts")]
    Timeout { attempts: u32 },

    /// The caller cancelled the operation
    #[error("search cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },

    /// The job request failed local validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The client configuration is missing or malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create a service error from a message and optional code
    pub fn service(message: impl Into<String>, code: Option<i64>) -> Self {
        Self::Service {
            message: message.into(),
            code,
        }
    }

    /// Check if this error is a failure to communicate with the service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::Http { .. } | Self::ParseError(_)
        )
    }

    /// Check if the service explicitly rejected the request
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Check if this error is a timeout, either of one request or of the whole poll
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::RequestFailed(e) => e.is_timeout(),
            _ => false,
        }
    }
}
