//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! The wire shape is `{"executionId": "...", "error": "..."}` so clients can
//! quote the execution id when reporting a failure.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::context::ExecutionId;

/// An error returned by an API handler, tagged with the request's
/// execution id.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ApiError {
  pub execution_id: ExecutionId,
  pub kind:         ErrorKind,
}

#[derive(Debug, Error)]
pub enum ErrorKind {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("already exists: {0}")]
  Conflict(String),

  #[error("write error: {0}")]
  Store(String),
}

impl ApiError {
  pub fn not_found(execution_id: ExecutionId, message: impl Into<String>) -> Self {
    Self { execution_id, kind: ErrorKind::NotFound(message.into()) }
  }

  /// Translate a store failure into its HTTP-facing shape.
  pub fn from_store(execution_id: ExecutionId, err: tenure_core::Error) -> Self {
    let kind = match err {
      tenure_core::Error::NotFound(id) => {
        ErrorKind::NotFound(format!("employee {id} not found"))
      }
      tenure_core::Error::AlreadyExists(id) => {
        ErrorKind::Conflict(format!("employee {id} already exists"))
      }
      tenure_core::Error::Storage(message) => ErrorKind::Store(message),
    };
    Self { execution_id, kind }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self.kind {
      ErrorKind::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ErrorKind::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ErrorKind::Store(m) => (StatusCode::BAD_REQUEST, m.clone()),
    };
    let body = json!({
      "executionId": self.execution_id.0,
      "error": message,
    });
    (status, Json(body)).into_response()
  }
}
