//! # Client Error Types
//!
//! Error types for configuration, transport and request failures.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Request       │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Core (cart, checkout   │ │
//! │  │  InvalidUrl     │  │  Status         │  │        validation)      │ │
//! │  │  ConfigLoad/Save│  │  Decode         │  │                         │ │
//! │  │  NoRuntime      │  │  Aborted        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Request errors collapse into RequestState.error (text).               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bistro_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Fallback when a non-success response carries no `message`.
pub const FALLBACK_REQUEST_MESSAGE: &str = "Something went wrong, failed to send request.";

/// Fallback when a failure has no description at all.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong!";

/// Client error type covering every storefront client failure.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storefront configuration.
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// A lifecycle was created outside a Tokio runtime.
    #[error("No async runtime available to run requests")]
    NoRuntime,

    // =========================================================================
    // Request Errors
    // =========================================================================
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status.
    ///
    /// Displays as the message alone so it can be shown to the customer.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("{0}")]
    Decode(String),

    /// The request task died before producing a result (a panic while
    /// sending or decoding).
    #[error("Request aborted: {0}")]
    Aborted(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Cart or checkout rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ClientError {
    fn from(err: tokio::task::JoinError) -> Self {
        ClientError::Aborted(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Text surfaced through `RequestState.error`.
    ///
    /// Falls back to a fixed message when the failure has no description.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// Returns true for failures a caller may retry by triggering again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_displays_server_message() {
        let err = ClientError::Status {
            status: 400,
            message: "out of stock".into(),
        };
        assert_eq!(err.user_message(), "out of stock");
    }

    #[test]
    fn test_empty_message_falls_back() {
        assert_eq!(
            ClientError::Transport(String::new()).user_message(),
            FALLBACK_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::Transport("connection refused".into()).is_retryable());
        assert!(ClientError::Status {
            status: 503,
            message: "busy".into()
        }
        .is_retryable());
        assert!(!ClientError::Status {
            status: 400,
            message: "bad".into()
        }
        .is_retryable());
        assert!(!ClientError::InvalidConfig("x".into()).is_retryable());
        assert!(ClientError::InvalidUrl("x".into()).is_config_error());
    }

    #[tokio::test]
    async fn test_panicked_task_becomes_aborted() {
        let task = tokio::spawn(async {
            let amount: Option<u32> = None;
            amount.expect("decoder blew up")
        });
        let err: ClientError = task.await.unwrap_err().into();

        assert!(matches!(err, ClientError::Aborted(_)));
        assert!(err.user_message().starts_with("Request aborted"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: ClientError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cannot check out an empty cart");
    }
}
