use reqwest::StatusCode;
use serde::Deserialize;

/// Normalized failure for every API call. The client never retries; callers
/// catch this at the call site and surface the message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A bearer-gated call was made without a token. Raised before any
    /// network I/O happens.
    #[error("not authenticated: log in first")]
    NotAuthenticated,

    /// Non-2xx response. `message` carries the server-provided detail when
    /// one was present, otherwise a generic fallback.
    #[error("{message} (HTTP {status})")]
    Status { status: StatusCode, message: String },

    /// Transport failure or a response body that failed to decode.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Build a `Status` error from a non-2xx response, preferring the
    /// server's `detail` field over `message`.
    pub async fn from_response(response: reqwest::Response, fallback: &str) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail.or(b.message))
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Status { status, message }
    }
}
