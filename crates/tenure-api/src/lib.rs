//! JSON REST API for the Tenure employee store.
//!
//! Exposes an axum [`Router`] backed by any [`tenure_core::store::EmployeeStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = tenure_api::router(store.clone());
//! ```

pub mod context;
pub mod employees;
pub mod error;
pub mod health;

use std::sync::Arc;

use axum::{
  Router, middleware,
  routing::get,
};
use tenure_core::store::EmployeeStore;

pub use context::ExecutionId;
pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: EmployeeStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(health::handler::<S>))
    .route("/employees", axum::routing::post(employees::create::<S>))
    .route(
      "/employees/{id}",
      get(employees::get_one::<S>)
        .put(employees::update_one::<S>)
        .delete(employees::delete_one::<S>),
    )
    .route("/employees/{id}/history", get(employees::history::<S>))
    .layer(middleware::from_fn(context::attach_execution_id))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tenure_core::employee::EmployeeRecord;
  use tenure_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn analyst(id: &str) -> Value {
    json!({
      "employeeId": id,
      "type": "Associate",
      "firstName": "Arun",
      "middleName": "P",
      "lastName": "Gopalpuri",
      "passportNumber": "M0001111",
      "position": "Analyst",
      "addresses": [{
        "addressLine1": "747 Howard St",
        "addressLine2": "",
        "city": "San Francisco",
        "state": "CA",
        "zipCode": "94105",
      }],
    })
  }

  fn senior_analyst(id: &str) -> Value {
    let mut v = analyst(id);
    v["position"] = json!("Senior Analyst");
    v["addresses"] = json!([{
      "addressLine1": "4900 Marie P DeBartolo Way",
      "addressLine2": "",
      "city": "Santa Clara",
      "state": "CA",
      "zipCode": "95054",
    }]);
    v
  }

  // ── Health ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_reports_healthy() {
    let app = app().await;
    let resp = send(&app, "GET", "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "healthy": true }));
  }

  // ── Create ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_assigned_metadata() {
    let app = app().await;
    let resp = send(&app, "POST", "/employees", Some(analyst("E1"))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let record: EmployeeRecord =
      serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(record.employee_id, "E1");
    assert_eq!(record.version, 1);
    assert!(record.active);
  }

  #[tokio::test]
  async fn create_conflict_returns_409_with_execution_id() {
    let app = app().await;
    send(&app, "POST", "/employees", Some(analyst("E1"))).await;

    let resp = send(&app, "POST", "/employees", Some(analyst("E1"))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body = json_body(resp).await;
    assert!(body["executionId"].is_string(), "body: {body}");
    assert!(
      body["error"].as_str().unwrap().contains("already exists"),
      "body: {body}",
    );
  }

  #[tokio::test]
  async fn caller_supplied_version_metadata_is_ignored() {
    let app = app().await;
    let mut payload = analyst("E1");
    payload["version"] = json!(42);
    payload["active"] = json!(false);
    payload["timestamp"] = json!("1999-01-01T00:00:00Z");

    let resp = send(&app, "POST", "/employees", Some(payload)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let record: EmployeeRecord =
      serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(record.version, 1);
    assert!(record.active);
  }

  // ── Read ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_missing_returns_404() {
    let app = app().await;
    let resp = send(&app, "GET", "/employees/nobody", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = json_body(resp).await;
    assert!(body["executionId"].is_string(), "body: {body}");
  }

  // ── Update ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn put_missing_returns_404() {
    let app = app().await;
    let resp = send(&app, "PUT", "/employees/ghost", Some(analyst("ghost"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Delete ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_is_idempotent_over_http() {
    let app = app().await;
    send(&app, "POST", "/employees", Some(analyst("E1"))).await;

    let first = send(&app, "DELETE", "/employees/E1", None).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = send(&app, "DELETE", "/employees/E1", None).await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);

    // Exactly one tombstone in the history.
    let resp = send(&app, "GET", "/employees/E1/history", None).await;
    let history: Vec<EmployeeRecord> =
      serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(history.len(), 2);
  }

  #[tokio::test]
  async fn history_missing_returns_404() {
    let app = app().await;
    let resp = send(&app, "GET", "/employees/nobody/history", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── End-to-end scenario ─────────────────────────────────────────────────

  #[tokio::test]
  async fn create_read_update_delete_scenario() {
    let app = app().await;

    let resp = send(&app, "POST", "/employees", Some(analyst("E1"))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&app, "GET", "/employees/E1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v1: EmployeeRecord = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(v1.version, 1);
    assert_eq!(v1.position, "Analyst");

    let resp = send(&app, "PUT", "/employees/E1", Some(senior_analyst("E1"))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, "GET", "/employees/E1", None).await;
    let v2: EmployeeRecord = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(v2.version, 2);
    assert_eq!(v2.position, "Senior Analyst");

    let resp = send(&app, "DELETE", "/employees/E1", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, "GET", "/employees/E1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Direct history inspection: v3 is a tombstone carrying v2's attributes.
    let resp = send(&app, "GET", "/employees/E1/history", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let history: Vec<EmployeeRecord> =
      serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].version, 3);
    assert!(!history[2].active);
    assert_eq!(history[2].position, "Senior Analyst");
    assert_eq!(history[2].addresses, v2.addresses);
  }
}
