use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned to clients in place of any 5xx detail.
pub const PUBLIC_SERVER_ERROR: &str = "internal server error";

/// Errors surfaced by the site core.
///
/// Translation gaps are not errors: a content fallback is reported through
/// `ResolvedContent::is_fallback` and a dictionary fallback is silent.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Fatal misconfiguration (bad base URL, no dictionary loadable at all).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The requested slug does not exist in any resolvable locale.
    #[error("not found: {0}")]
    NotFound(String),

    /// A content item failed to load or parse. Aborts the whole listing.
    #[error("content integrity failure in '{key}': {reason}")]
    ContentIntegrity { key: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteError {
    pub fn integrity(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SiteError::ContentIntegrity {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        // server-side detail (paths, I/O errors) stays in the log
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            PUBLIC_SERVER_ERROR.to_string()
        } else {
            self.to_string()
        };
        let body = json!({
            "ok": false,
            "error": {
                "status": status.as_u16(),
                "message": message,
            }
        });
        (status, axum::Json(body)).into_response()
    }
}
