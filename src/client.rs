//! Caller-facing HelpSpot client.
//!
//! `HelpSpotClient` binds an installation URL and staff credentials once and
//! turns any method name into a callable [`MethodInvoker`]. It knows nothing
//! about HelpSpot's method catalog beyond which methods are POSTs; any name
//! is accepted and simply fails at call time if HelpSpot does not know it.
//!
//! # Example
//!
//! ```no_run
//! use helpspot::{HelpSpotClient, Params};
//!
//! # async fn example() -> Result<(), helpspot::HelpSpotError> {
//! let hs = HelpSpotClient::from_parts(
//!     "http://helpdesk.example.com/help",
//!     "you@example.com",
//!     "secret",
//!     0,
//! )?;
//!
//! println!("{}", hs.call("version", &Params::new()).await?);
//! println!("{}", hs.call("private_version", &Params::new()).await?);
//!
//! let update = Params::new().with("xRequest", "12345").with("Custom28", "90210");
//! hs.method("private_request_update")?.call(&update).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::auth::Credentials;
use crate::config::Config;
use crate::error::HelpSpotError;
use crate::invoker::{MethodInvoker, Params};
use crate::method::MethodName;

/// Entry point for calling HelpSpot web service methods.
///
/// Construction performs no network I/O. The client owns its HTTP transport;
/// every invoker it hands out shares that transport and the credentials.
#[derive(Clone)]
pub struct HelpSpotClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Installation URL without trailing slash.
    base_url: String,

    /// SECURITY: Never log these.
    credentials: Arc<Credentials>,

    timeout: Option<Duration>,
}

impl HelpSpotClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `HelpSpotError::Config` if the base URL is invalid and
    /// `HelpSpotError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, HelpSpotError> {
        let mut builder = Client::builder().connection_verbose(config.debug_level > 0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(HelpSpotError::HttpClient)?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| HelpSpotError::invalid_config(format!("invalid HelpSpot URL: {}", e)))?;

        tracing::debug!(
            base_url = %base_url,
            username = %config.username,
            debug_level = config.debug_level,
            "HelpSpot client initialized"
        );

        Ok(Self {
            http,
            base_url,
            credentials: Arc::new(Credentials::new(&config.username, &config.password)),
            timeout: config.timeout,
        })
    }

    /// Creates a client from an installation URL, staff credentials and a
    /// transport debug level.
    ///
    /// # Errors
    ///
    /// See [`HelpSpotClient::new`].
    pub fn from_parts(
        base_url: &str,
        username: &str,
        password: &str,
        debug_level: u8,
    ) -> Result<Self, HelpSpotError> {
        let config = Config::new(base_url, username, password)?.with_debug_level(debug_level);
        Self::new(&config)
    }

    /// The installation URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The staff username used for private methods.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Returns an invoker bound to `name`.
    ///
    /// `name` may use underscores (`private_request_update`) or dots
    /// (`private.request.update`). A fresh invoker is built on every call.
    ///
    /// # Errors
    ///
    /// Returns `HelpSpotError::Validation` if `name` is empty.
    pub fn method(&self, name: &str) -> Result<MethodInvoker, HelpSpotError> {
        MethodInvoker::new(
            name,
            &self.base_url,
            Arc::clone(&self.credentials),
            self.http.clone(),
            self.timeout,
        )
    }

    /// Calls the remote method `name` with `params`.
    ///
    /// Returns whatever JSON HelpSpot answers with.
    ///
    /// # Errors
    ///
    /// See [`MethodInvoker::call`].
    pub async fn call(
        &self,
        name: &str,
        params: &Params,
    ) -> Result<serde_json::Value, HelpSpotError> {
        self.method(name)?.call(params).await
    }

    /// Calls the public `version` method.
    pub async fn version(&self) -> Result<serde_json::Value, HelpSpotError> {
        self.call("version", &Params::new()).await
    }

    /// Calls the authenticated `private.version` method.
    pub async fn private_version(&self) -> Result<serde_json::Value, HelpSpotError> {
        self.call("private.version", &Params::new()).await
    }

    /// Tests connectivity and credentials.
    ///
    /// Calls `version` and `private.version` and checks that both report the
    /// same thing. Returns the `(version, private.version)` replies on success.
    ///
    /// # Errors
    ///
    /// Returns `HelpSpotError::ConnectionTest` describing the failed step.
    pub async fn test_connection(
        &self,
    ) -> Result<(serde_json::Value, serde_json::Value), HelpSpotError> {
        tracing::debug!("Testing connection to HelpSpot");

        let public = self
            .version()
            .await
            .map_err(|e| self.connection_failure("version", e))?;
        tracing::info!(version = %public, "version returned");

        let private = self
            .private_version()
            .await
            .map_err(|e| self.connection_failure("private.version", e))?;
        tracing::info!(version = %private, "private.version returned");

        if public != private {
            return Err(HelpSpotError::connection_test(format!(
                "version ({}) and private.version ({}) disagree",
                public, private
            )));
        }

        tracing::info!("Connection test successful");
        Ok((public, private))
    }

    fn connection_failure(&self, method: &str, e: HelpSpotError) -> HelpSpotError {
        let message = self.sanitize_error(&e);
        let authenticated = MethodName::parse(method)
            .map(|name| name.scope().requires_auth())
            .unwrap_or(false);
        match e {
            HelpSpotError::Api { .. } if authenticated => {
                HelpSpotError::connection_test(format!(
                    "{} failed: {} - verify HELPSPOT_USER and HELPSPOT_PASSWORD and that the private API is enabled",
                    method, message
                ))
            }
            HelpSpotError::Http(_) | HelpSpotError::Timeout { .. } => {
                HelpSpotError::connection_test(format!(
                    "{} failed: {} - verify HELPSPOT_URL is correct and the server is reachable",
                    method, message
                ))
            }
            _ => HelpSpotError::connection_test(format!("{} failed: {}", method, message)),
        }
    }

    /// Renders an error with the password scrubbed out.
    pub fn sanitize_error(&self, error: &HelpSpotError) -> String {
        error.sanitized_display(self.credentials.password_for_sanitization())
    }
}

impl std::fmt::Debug for HelpSpotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpSpotClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
