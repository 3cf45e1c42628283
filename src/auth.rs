//! HTTP Basic credentials for private API methods.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// A staff username/password pair and its precomputed Basic token.
///
/// The token is computed once at construction; the struct is never mutated
/// afterwards and is shared between invokers behind an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    token: String,
}

impl Credentials {
    /// Creates credentials and encodes the `user:password` token.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = password.into();
        let token = STANDARD.encode(format!("{}:{}", username, password));
        Self {
            username,
            password,
            token,
        }
    }

    /// The staff username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password for sanitization purposes.
    ///
    /// This should ONLY be used for scrubbing error messages, never for logging.
    pub(crate) fn password_for_sanitization(&self) -> &str {
        &self.password
    }

    /// The base64 encoded `user:password` token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.token)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
