//! A single callable HelpSpot method.
//!
//! A [`MethodInvoker`] is bound to one method name, one endpoint and one set
//! of credentials. [`MethodInvoker::build_request`] computes everything about
//! the HTTP exchange without touching the network; [`MethodInvoker::call`]
//! sends it and decodes the JSON reply.
//!
//! # Wire format
//!
//! ```text
//! GET  <base>/api/index.php?method=<name>&<params>&output=json
//! POST <base>/api/index.php?method=<name>&output=json   (params in the body)
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use url::{form_urlencoded, Url};

use crate::auth::Credentials;
use crate::decoder;
use crate::error::HelpSpotError;
use crate::method::{HttpVerb, MethodName};

/// Path of the web services entry point below the installation URL.
pub const API_ENTRY_PATH: &str = "/api/index.php";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Named parameters for a method call.
///
/// Values are converted to strings on insertion. Order is preserved on the
/// wire.
///
/// # Example
///
/// ```
/// use helpspot::Params;
///
/// let params = Params::new()
///     .with("xRequest", 12345)
///     .with("Custom28", "90210");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter and returns the list.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn to_form(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

/// Everything needed to send one method call.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Full target URL, including the query string.
    pub url: Url,
    /// GET or POST.
    pub verb: HttpVerb,
    /// Form-encoded parameters; present only for POST.
    pub body: Option<String>,
    /// `Authorization` header value; present only for private methods.
    pub authorization: Option<String>,
}

impl fmt::Debug for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("url", &self.url.as_str())
            .field("verb", &self.verb)
            .field("body", &self.body)
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "Basic [REDACTED]"),
            )
            .finish()
    }
}

/// One remote HelpSpot method bound to an endpoint and credentials.
///
/// Obtained from [`HelpSpotClient::method`](crate::client::HelpSpotClient::method).
/// Invokers are immutable; cloning shares the connection pool and credentials.
#[derive(Clone)]
pub struct MethodInvoker {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// `<base>/api/index.php`, without a query string.
    endpoint: Url,

    method: MethodName,

    /// SECURITY: Never log these.
    credentials: Arc<Credentials>,

    /// Per-request timeout configured on `http`, kept for error reporting.
    timeout: Option<Duration>,
}

impl MethodInvoker {
    /// Creates an invoker for `name` against the installation at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `HelpSpotError::Validation` for an empty method name and
    /// `HelpSpotError::Config` if the endpoint is not a valid URL.
    pub(crate) fn new(
        name: &str,
        base_url: &str,
        credentials: Arc<Credentials>,
        http: Client,
        timeout: Option<Duration>,
    ) -> Result<Self, HelpSpotError> {
        let method = MethodName::parse(name)?;
        let endpoint = Self::normalize_endpoint(base_url)?;

        Ok(Self {
            http,
            endpoint,
            method,
            credentials,
            timeout,
        })
    }

    /// Strips trailing slashes and appends the API entry path.
    fn normalize_endpoint(base_url: &str) -> Result<Url, HelpSpotError> {
        let endpoint = format!("{}{}", base_url.trim().trim_end_matches('/'), API_ENTRY_PATH);
        Url::parse(&endpoint)
            .map_err(|e| HelpSpotError::invalid_config(format!("invalid HelpSpot URL: {}", e)))
    }

    /// The method this invoker calls.
    pub fn method(&self) -> &MethodName {
        &self.method
    }

    /// The API entry point URL, without query string.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds the request for a call without sending it.
    pub fn build_request(&self, params: &Params) -> RequestDescriptor {
        let verb = self.method.verb();
        let mut url = self.endpoint.clone();

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("method", self.method.wire());
            if verb == HttpVerb::Get {
                query.extend_pairs(params.iter());
            }
            query.append_pair("output", "json");
        }

        let body = match verb {
            HttpVerb::Get => None,
            HttpVerb::Post => Some(params.to_form()),
        };

        let authorization = self
            .method
            .scope()
            .requires_auth()
            .then(|| self.credentials.authorization_header());

        RequestDescriptor {
            url,
            verb,
            body,
            authorization,
        }
    }

    /// Calls the remote method and returns the decoded JSON reply as-is.
    ///
    /// # Errors
    ///
    /// - `HelpSpotError::Api` when HelpSpot answers with HTTP 400
    /// - `HelpSpotError::HttpStatus` for any other failure status
    /// - `HelpSpotError::Http` / `HelpSpotError::Timeout` when the exchange fails
    /// - `HelpSpotError::Serialization` when a successful reply is not JSON
    pub async fn call(&self, params: &Params) -> Result<serde_json::Value, HelpSpotError> {
        let descriptor = self.build_request(params);

        tracing::debug!(
            method = %self.method,
            verb = %descriptor.verb,
            scope = %self.method.scope(),
            params = params.len(),
            "Calling HelpSpot method"
        );

        let mut req = self
            .http
            .request(descriptor.verb.as_method(), descriptor.url);

        if let Some(authorization) = descriptor.authorization {
            req = req.header(AUTHORIZATION, authorization);
        }

        if let Some(body) = descriptor.body {
            req = req.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        }

        let response = req.send().await.map_err(|e| self.transport_error(e))?;
        let response =
            decoder::intercept(response, self.credentials.password_for_sanitization()).await?;

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        tracing::trace!(method = %self.method, body = %body, "HelpSpot response");

        Ok(serde_json::from_str(&body)?)
    }

    fn transport_error(&self, e: reqwest::Error) -> HelpSpotError {
        match self.timeout {
            Some(duration) if e.is_timeout() => {
                HelpSpotError::timeout(duration, self.method.wire())
            }
            _ => HelpSpotError::Http(e),
        }
    }
}

impl fmt::Debug for MethodInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInvoker")
            .field("method", &self.method.wire())
            .field("endpoint", &self.endpoint.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
