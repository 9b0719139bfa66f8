//! # Compute Error Taxonomy
//!
//! Every facade operation returns `Result<_, GceError>`. Provider-reported
//! failures (not-found, permission, quota, invalid state transition) keep the
//! human-readable message the API embeds in its JSON error body; responses
//! that do not match the expected shape are surfaced separately as
//! `MalformedResponse` since they indicate a contract mismatch rather than a
//! provider-reported failure.

use thiserror::Error;

use crate::gcp::gce::types::ErrorBody;

#[derive(Debug, Error)]
pub enum GceError {
    /// A failure reported by the compute API. `message` is the extracted
    /// `error.message` string; `raw` keeps the full response body.
    #[error("{message}")]
    Provider { message: String, raw: String },

    /// The response does not match the expected descriptor contract.
    #[error("malformed compute response: {0}")]
    MalformedResponse(String),

    /// The request never produced a provider response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GceError {
    /// Builds a `Provider` error from a non-2xx response body.
    ///
    /// Bodies that are not the documented `{"error": {"message": ...}}` shape
    /// still become a `Provider` error, with the HTTP status and body text as
    /// the message.
    pub fn provider(status: reqwest::StatusCode, body: &str) -> GceError {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error.message,
            Err(_) => format!("HTTP {} from compute API: {}", status, body.trim()),
        };
        GceError::Provider {
            message,
            raw: body.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_extracts_message() {
        let body = r#"{"error": {"message": "Instance not found", "code": 404}}"#;
        let err = GceError::provider(reqwest::StatusCode::NOT_FOUND, body);
        match err {
            GceError::Provider { ref message, ref raw } => {
                assert_eq!(message, "Instance not found");
                assert_eq!(raw, body);
            }
            other => panic!("expected Provider, got {:?}", other),
        }
        assert_eq!(err.to_string(), "Instance not found");
    }

    #[test]
    fn test_provider_error_unparseable_body() {
        let err = GceError::provider(reqwest::StatusCode::BAD_GATEWAY, "upstream hiccup\n");
        match err {
            GceError::Provider { message, raw } => {
                assert_eq!(message, "HTTP 502 Bad Gateway from compute API: upstream hiccup");
                assert_eq!(raw, "upstream hiccup\n");
            }
            other => panic!("expected Provider, got {:?}", other),
        }
    }
}
