//! Error type shared by the API client and the data sources.

use serde::Deserialize;

/// Everything that can go wrong talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the server's message when it sent one.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (DNS, refused connection, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A success response whose body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected on the client before anything was sent.
    #[error("{0}")]
    Invalid(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build the error for a non-2xx response from its raw body.
    ///
    /// Falls back to `HTTP Error: <status>` when the body is not JSON or carries
    /// no usable `message`.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP Error: {status}"));
        ApiError::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_used() {
        let err = ApiError::from_response(422, br#"{"message":"Email has already been taken"}"#);
        assert_eq!(err.to_string(), "Email has already been taken");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_fallback_for_non_json_body() {
        let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP Error: 502");
    }

    #[test]
    fn test_fallback_for_json_without_message() {
        let err = ApiError::from_response(500, br#"{"error":"boom"}"#);
        assert_eq!(err.to_string(), "HTTP Error: 500");

        let err = ApiError::from_response(500, br#"{"message":""}"#);
        assert_eq!(err.to_string(), "HTTP Error: 500");
    }

    #[test]
    fn test_fallback_for_empty_body() {
        let err = ApiError::from_response(404, b"");
        assert_eq!(err.to_string(), "HTTP Error: 404");
    }
}
