use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures reported by the Solcast client.
#[derive(Debug, Error)]
pub enum Error {
    /// The API rejected the request as malformed (HTTP 400).
    #[error("validation error{}", fmt_message(.message))]
    Validation { message: Option<String> },

    /// The addressed site does not exist or is not accessible (HTTP 404).
    #[error("site error{}", fmt_message(.message))]
    Site { message: Option<String> },

    /// The request quota is exhausted (HTTP 429).
    ///
    /// `reset` holds the raw `x-rate-limit-reset` header (Unix epoch seconds).
    #[error("rate limit exceeded, reset time: {}", .reset.as_deref().unwrap_or("unknown"))]
    RateLimitExceeded { reset: Option<String> },

    /// Any status code the API contract does not assign a meaning to.
    #[error("unexpected HTTP {status} from Solcast API\n{body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// Connection, timeout or TLS failure, passed through as-is.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode API response as JSON")]
    Decode(#[source] serde_json::Error),

    #[error("invalid `{field}` value {value:?}: {reason}")]
    Timestamp {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

impl Error {
    /// Whether the service itself rejected the request (as opposed to a
    /// transport, decoding or configuration failure).
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::Site { .. }
                | Error::RateLimitExceeded { .. }
                | Error::UnexpectedStatus { .. }
        )
    }

    pub fn rate_limit_reset(&self) -> Option<&str> {
        match self {
            Error::RateLimitExceeded { reset } => reset.as_deref(),
            _ => None,
        }
    }

    /// The rate-limit reset time as an absolute timestamp, when the header
    /// carried a valid epoch value.
    pub fn rate_limit_reset_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.rate_limit_reset()?.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

fn fmt_message(message: &Option<String>) -> String {
    match message.as_deref() {
        Some(m) if !m.is_empty() => format!(": {}", m),
        _ => String::new(),
    }
}

/// Error body returned by the Solcast API alongside 4xx responses.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub(crate) response_status: Option<ResponseStatus>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ResponseStatus {
    #[serde(default)]
    pub(crate) error_code: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) errors: Vec<FieldError>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct FieldError {
    #[serde(default)]
    pub(crate) error_code: Option<String>,
    #[serde(default)]
    pub(crate) field_name: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

/// Best-effort extraction of a human-readable message from an error body.
pub(crate) fn api_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok()?;
    let status = parsed.response_status?;

    let mut parts = Vec::new();
    if let Some(m) = status.message.as_deref().filter(|m| !m.is_empty()) {
        parts.push(m.to_string());
    } else if let Some(code) = status.error_code.as_deref() {
        parts.push(code.to_string());
    }
    for e in &status.errors {
        let field = e.field_name.as_deref().unwrap_or("");
        let msg = e
            .message
            .as_deref()
            .or(e.error_code.as_deref())
            .unwrap_or("");
        if field.is_empty() {
            parts.push(msg.to_string());
        } else {
            parts.push(format!("{}: {}", field, msg));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Maps a non-200 response onto the error taxonomy.
pub(crate) fn error_for_status(status: StatusCode, reset: Option<String>, body: &str) -> Error {
    match status {
        StatusCode::BAD_REQUEST => Error::Validation {
            message: api_message(body),
        },
        StatusCode::NOT_FOUND => Error::Site {
            message: api_message(body),
        },
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded { reset },
        _ => Error::UnexpectedStatus {
            status,
            body: body.to_string(),
        },
    }
}
