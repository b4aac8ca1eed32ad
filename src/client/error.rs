use reqwest::StatusCode;
use thiserror::Error;

/// Every way a fetch can fail, normalized so callers only ever see one error type.
/// `Display` is the human readable message placeholders are built from.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx answer. The message is the status text; the JSON error body, if any, rides along.
    #[error("{status_text}")]
    Status {
        status: StatusCode,
        status_text: String,
        body: Option<serde_json::Value>,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid api url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// `reason` is the phrase the service sent on the status line, when it differs from the
    /// canonical one; otherwise the canonical reason, and then the bare code, stand in for it.
    pub fn from_status(status: StatusCode, reason: Option<&str>, body: Option<serde_json::Value>) -> Self {
        let status_text = reason
            .or_else(|| status.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        FetchError::Status { status, status_text, body }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// The `error` field of the service's error payload, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FetchError::Status { body: Some(body), .. } => body.get("error").and_then(|v| v.as_str()),
            _ => None,
        }
    }
}
