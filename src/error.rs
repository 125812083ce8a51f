// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failures of a call against the chat API, as seen by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, I/O).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("server returned status {status}")]
    Status { status: u16, body: String },

    /// The body was not JSON of the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A well-formed reply whose discriminator is not `success`.
    #[error("chat rejected (status: {status:?}): {}", .error.as_deref().unwrap_or("unknown error"))]
    Rejected {
        status: Option<String>,
        error: Option<String>,
    },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ClientError {
    /// Business failures are reported by the server; everything else is transport.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ClientError::Rejected { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Errors returned by the companion chat server.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
