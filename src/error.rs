//! Mapping of Redmine HTTP responses to typed errors.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedmineError {
    #[error("authentication failed (401)")]
    Auth,
    #[error("access forbidden (403)")]
    Forbidden,
    #[error("resource not found (404)")]
    NotFound,
    #[error("conflict (409)")]
    Conflict,
    #[error("request entity too large (413)")]
    TooLarge,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("internal server error (500)")]
    Server,
    #[error("unexpected status {0}")]
    Unknown(StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Pass successful responses through, map everything else to a
/// [`RedmineError`]. A 422 carries error strings in the JSON body.
pub async fn check(resp: Response) -> Result<Response, RedmineError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(match status {
        StatusCode::UNAUTHORIZED => RedmineError::Auth,
        StatusCode::FORBIDDEN => RedmineError::Forbidden,
        StatusCode::NOT_FOUND => RedmineError::NotFound,
        StatusCode::CONFLICT => RedmineError::Conflict,
        StatusCode::PAYLOAD_TOO_LARGE => RedmineError::TooLarge,
        StatusCode::UNPROCESSABLE_ENTITY => {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.render())
                .unwrap_or_default();
            RedmineError::Validation(detail)
        }
        StatusCode::INTERNAL_SERVER_ERROR => RedmineError::Server,
        other => RedmineError::Unknown(other),
    })
}

/// Error body of a 422 response. Entries are either plain strings or
/// `[field, message]` pairs.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<Value>,
}

impl ErrorBody {
    fn render(&self) -> String {
        self.errors
            .iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                Value::Array(parts) => parts
                    .iter()
                    .map(value_str)
                    .collect::<Vec<_>>()
                    .join(": "),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn value_str(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
