//! Per-request execution id.
//!
//! Every request gets a fresh UUID, carried as an explicit request extension
//! and recorded on the request's tracing span — never as process-global
//! state. Error payloads echo it back so a client report can be correlated
//! with the server logs.

use std::fmt;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument as _;
use uuid::Uuid;

/// Correlation id for one request/response exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionId(pub Uuid);

impl fmt::Display for ExecutionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Middleware: attach a fresh [`ExecutionId`] to the request and run the
/// rest of the stack inside a span carrying it.
pub async fn attach_execution_id(mut req: Request, next: Next) -> Response {
  let id = ExecutionId(Uuid::new_v4());
  req.extensions_mut().insert(id);

  let span = tracing::info_span!(
    "request",
    execution_id = %id,
    method = %req.method(),
    uri = %req.uri(),
  );
  next.run(req).instrument(span).await
}
