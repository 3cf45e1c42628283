//! Error types for the HelpSpot client.
//!
//! This module defines `HelpSpotError`, the unified error type returned by
//! every fallible operation in the crate.
//!
//! Errors fall into two classes callers usually care about:
//!
//! - **Service errors** ([`HelpSpotError::Api`]): HelpSpot rejected the call
//!   with HTTP 400 and told us why. The description and numeric id are kept
//!   separate so callers can branch on the id.
//! - **Transport errors** ([`HelpSpotError::Http`], [`HelpSpotError::HttpStatus`],
//!   [`HelpSpotError::Timeout`]): the exchange itself failed.
//!
//! # Security
//!
//! Passwords must never reach logs or error messages. Use
//! [`HelpSpotError::sanitize_message`] on any text that came from outside.

use std::time::Duration;
use thiserror::Error;

/// Description used when a 400 response does not carry a usable error entry.
pub const UNKNOWN_API_ERROR: &str = "Unknown API error";

/// Unified error type for all HelpSpot client operations.
#[derive(Error, Debug)]
pub enum HelpSpotError {
    /// Configuration error - missing or invalid settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a failure status other than 400.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, truncated and sanitized.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} calling {method}")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// Wire-form name of the method that timed out.
        method: String,
    },

    /// HelpSpot rejected the call (HTTP 400).
    #[error("HelpSpot API error {id}: {description}")]
    Api {
        /// Human-readable description reported by HelpSpot.
        description: String,
        /// Numeric error id reported by HelpSpot.
        id: i64,
    },

    /// A successful response body was not valid JSON.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl HelpSpotError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        HelpSpotError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        HelpSpotError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        HelpSpotError::Validation(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, method: impl Into<String>) -> Self {
        HelpSpotError::Timeout {
            duration,
            method: method.into(),
        }
    }

    /// Creates a service error as reported by HelpSpot.
    pub fn api(description: impl Into<String>, id: i64) -> Self {
        HelpSpotError::Api {
            description: description.into(),
            id,
        }
    }

    /// Creates the fallback service error for undecodable 400 responses.
    pub fn unknown_api_error() -> Self {
        Self::api(UNKNOWN_API_ERROR, 0)
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        HelpSpotError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if HelpSpot itself rejected the call.
    #[must_use]
    pub fn is_service_error(&self) -> bool {
        matches!(self, HelpSpotError::Api { .. })
    }

    /// Returns true if the HTTP exchange failed before HelpSpot could answer
    /// with a service error.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            HelpSpotError::Http(_) | HelpSpotError::HttpStatus { .. } | HelpSpotError::Timeout { .. }
        )
    }

    /// Returns the HelpSpot error id for service errors.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        match self {
            HelpSpotError::Api { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Returns the HelpSpot error description for service errors.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            HelpSpotError::Api { description, .. } => Some(description),
            _ => None,
        }
    }

    /// Sanitizes a message to remove any occurrence of a secret.
    ///
    /// Returns the message with every occurrence of `secret` replaced with
    /// `[REDACTED]`. An empty secret leaves the message untouched.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
