//! Translation of failed HTTP exchanges into [`HelpSpotError`] values.
//!
//! HelpSpot reports (most) rejected calls with HTTP 400 and a body like:
//!
//! ```json
//! {"error": [{"description": "Bad token", "id": 42}]}
//! ```
//!
//! [`decode_error_body`] turns that body into [`HelpSpotError::Api`]. It
//! never fails: anything it cannot make sense of becomes the generic
//! "Unknown API error" with id 0, so the 400 is never masked by a parse error.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::error::{HelpSpotError, UNKNOWN_API_ERROR};

/// Maximum length kept from non-400 error bodies.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Error envelope returned with HTTP 400.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Vec<ErrorEntry>,
}

/// A single entry of the `error` array.
///
/// Fields are kept as raw JSON so an unexpected type degrades to the fallback
/// instead of failing the whole envelope.
#[derive(Debug, Default, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    description: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
}

impl ErrorEntry {
    fn description(&self) -> Option<String> {
        match self.description.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    fn id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Decodes the body of a 400 response into a service error.
///
/// Only the first entry of the `error` array is used. A missing description
/// falls back to "Unknown API error" and a missing id to 0.
pub fn decode_error_body(body: &str) -> HelpSpotError {
    let envelope: ErrorEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(error = %e, "400 response body is not a HelpSpot error envelope");
            return HelpSpotError::unknown_api_error();
        }
    };

    let Some(first) = envelope.error.first() else {
        return HelpSpotError::unknown_api_error();
    };

    HelpSpotError::api(
        first
            .description()
            .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string()),
        first.id().unwrap_or(0),
    )
}

/// Passes successful responses through and converts failures to errors.
///
/// HTTP 400 is decoded by [`decode_error_body`], even if its body cannot be
/// read. Any other failure status becomes [`HelpSpotError::HttpStatus`] with a
/// sanitized, truncated body, or [`HelpSpotError::Http`] if reading it fails.
pub(crate) async fn intercept(response: Response, secret: &str) -> Result<Response, HelpSpotError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await;

    if status == StatusCode::BAD_REQUEST {
        let err = decode_error_body(&body.unwrap_or_default());
        tracing::debug!(error = %err.sanitized_display(secret), "HelpSpot rejected the call");
        return Err(err);
    }

    let body = body.map_err(HelpSpotError::Http)?;
    let body = HelpSpotError::sanitize_message(&body, secret);
    let body = truncate_body(body);
    tracing::warn!(status = %status, "HelpSpot returned an HTTP error status");
    Err(HelpSpotError::HttpStatus { status, body })
}

fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(err: HelpSpotError) -> (String, i64) {
        match err {
            HelpSpotError::Api { description, id } => (description, id),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_decodes_first_error() {
        let body = r#"{"error":[{"description":"Bad token","id":42},{"description":"Other","id":7}]}"#;
        assert_eq!(parts(decode_error_body(body)), ("Bad token".to_string(), 42));
    }

    #[test]
    fn test_empty_error_array_falls_back() {
        let body = r#"{"error":[]}"#;
        assert_eq!(
            parts(decode_error_body(body)),
            ("Unknown API error".to_string(), 0)
        );
    }

    #[test]
    fn test_missing_error_key_falls_back() {
        assert_eq!(
            parts(decode_error_body(r#"{"something":"else"}"#)),
            ("Unknown API error".to_string(), 0)
        );
    }

    #[test]
    fn test_non_json_body_falls_back() {
        assert_eq!(
            parts(decode_error_body("<html>Bad Request</html>")),
            ("Unknown API error".to_string(), 0)
        );
        assert_eq!(parts(decode_error_body("")), ("Unknown API error".to_string(), 0));
    }

    #[test]
    fn test_missing_keys_fall_back_per_field() {
        assert_eq!(
            parts(decode_error_body(r#"{"error":[{"id":3}]}"#)),
            ("Unknown API error".to_string(), 3)
        );
        assert_eq!(
            parts(decode_error_body(r#"{"error":[{"description":"No id"}]}"#)),
            ("No id".to_string(), 0)
        );
    }

    #[test]
    fn test_string_id_is_parsed() {
        assert_eq!(
            parts(decode_error_body(r#"{"error":[{"description":"Bad","id":"101"}]}"#)),
            ("Bad".to_string(), 101)
        );
    }

    #[test]
    fn test_non_array_error_falls_back() {
        assert_eq!(
            parts(decode_error_body(r#"{"error":"nope"}"#)),
            ("Unknown API error".to_string(), 0)
        );
    }

    #[test]
    fn test_truncate_body() {
        let short = "short".to_string();
        assert_eq!(truncate_body(short.clone()), short);

        let long = "é".repeat(400);
        let truncated = truncate_body(long);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= MAX_ERROR_BODY_LEN + "...[truncated]".len());
    }
}
