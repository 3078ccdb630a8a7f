//! Handler for the `/health` liveness endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tenure_core::store::EmployeeStore;

/// `GET /health` — `{"healthy": bool}` derived from a trivial storage round
/// trip. A failing probe reports unhealthy rather than erroring; this
/// endpoint is operational, not part of the domain.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Json<Value>
where
  S: EmployeeStore,
{
  let healthy = match store.ping().await {
    Ok(ok) => ok,
    Err(e) => {
      tracing::warn!(error = %e, "health probe failed");
      false
    }
  };
  Json(json!({ "healthy": healthy }))
}
