//! Configuration management for the HelpSpot client.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::HelpSpotError;

/// Configuration for connecting to a HelpSpot installation.
///
/// The password is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the HelpSpot installation (e.g., `https://helpdesk.example.com/help`).
    pub base_url: String,

    /// Staff username (usually an email address) for private API calls.
    pub username: String,

    /// Staff password for private API calls.
    /// This value must never be logged or included in error messages.
    pub password: String,

    /// Transport debug level; anything above zero enables connection tracing.
    pub debug_level: u8,

    /// Optional per-request timeout. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Creates a configuration from explicit values.
    ///
    /// The base URL is normalized the same way as when loading from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `HelpSpotError::Config` if the base URL is not an http(s) URL.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, HelpSpotError> {
        Ok(Config {
            base_url: Self::validate_base_url(base_url.into())?,
            username: username.into(),
            password: password.into(),
            debug_level: 0,
            timeout: None,
        })
    }

    /// Sets the transport debug level.
    pub fn with_debug_level(mut self, level: u8) -> Self {
        self.debug_level = level;
        self
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `HELPSPOT_URL`: The base URL of the HelpSpot installation
    /// - `HELPSPOT_USER`: Staff username for private methods
    /// - `HELPSPOT_PASSWORD`: Staff password for private methods
    ///
    /// # Optional Environment Variables
    ///
    /// - `HELPSPOT_DEBUG`: Transport debug level (default `0`)
    /// - `HELPSPOT_TIMEOUT_SECS`: Per-request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns `HelpSpotError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, HelpSpotError> {
        let base_url = Self::get_required_env("HELPSPOT_URL")?;
        let username = Self::get_required_env("HELPSPOT_USER")?;
        let password = Self::get_required_env("HELPSPOT_PASSWORD")?;

        Self::validate_password(&password)?;

        let debug_level = Self::parse_debug_level(env::var("HELPSPOT_DEBUG").ok().as_deref())?;
        let timeout = Self::parse_timeout(env::var("HELPSPOT_TIMEOUT_SECS").ok().as_deref())?;

        let mut config = Config::new(base_url, username, password)?.with_debug_level(debug_level);
        config.timeout = timeout;
        Ok(config)
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, HelpSpotError> {
        env::var(name)
            .map_err(|_| HelpSpotError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(HelpSpotError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, HelpSpotError> {
        let url = url.trim().trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(HelpSpotError::invalid_config(
                "HELPSPOT_URL must start with http:// or https://",
            ));
        }

        url::Url::parse(&url)
            .map_err(|e| HelpSpotError::invalid_config(format!("invalid HELPSPOT_URL: {}", e)))?;

        Ok(url)
    }

    /// Rejects passwords copied verbatim from sample `.env` files.
    fn validate_password(password: &str) -> Result<(), HelpSpotError> {
        let lower = password.to_lowercase();
        let placeholder_patterns = ["your_password", "placeholder", "changeme", "idontknow"];

        if placeholder_patterns.iter().any(|p| lower.contains(p)) {
            return Err(HelpSpotError::invalid_config(
                "HELPSPOT_PASSWORD appears to be a placeholder value",
            ));
        }

        Ok(())
    }

    fn parse_debug_level(value: Option<&str>) -> Result<u8, HelpSpotError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(0),
            Some(v) => v.parse::<u8>().map_err(|_| {
                HelpSpotError::invalid_config(format!(
                    "HELPSPOT_DEBUG must be a small non-negative integer, got {:?}",
                    v
                ))
            }),
        }
    }

    fn parse_timeout(value: Option<&str>) -> Result<Option<Duration>, HelpSpotError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(v) => match v.parse::<u64>() {
                Ok(0) | Err(_) => Err(HelpSpotError::invalid_config(format!(
                    "HELPSPOT_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
                    v
                ))),
                Ok(secs) => Ok(Some(Duration::from_secs(secs))),
            },
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("debug_level", &self.debug_level)
            .field("timeout", &self.timeout)
            .finish()
    }
}
