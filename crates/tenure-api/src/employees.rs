//! Handlers for `/employees` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/employees` | 201 on success, 409 if an active version exists |
//! | `GET`    | `/employees/:id` | 404 when absent (including fully tombstoned) |
//! | `PUT`    | `/employees/:id` | 404 when no active version exists |
//! | `DELETE` | `/employees/:id` | 204 always — idempotent |
//! | `GET`    | `/employees/:id/history` | every version, tombstones included |

use std::sync::Arc;

use axum::{
  Extension, Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use tenure_core::{
  employee::{Employee, EmployeeRecord},
  store::EmployeeStore,
};

use crate::{context::ExecutionId, error::ApiError};

/// `POST /employees` — body: an [`Employee`]; store-managed fields in the
/// payload are ignored by construction (they do not deserialise into
/// [`Employee`] at all).
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Extension(execution_id): Extension<ExecutionId>,
  Json(body): Json<Employee>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EmployeeStore,
{
  tracing::debug!(employee_id = %body.employee_id, "creating employee");
  let record = store
    .create(body)
    .await
    .map_err(|e| ApiError::from_store(execution_id, e.into()))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /employees/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Extension(execution_id): Extension<ExecutionId>,
  Path(id): Path<String>,
) -> Result<Json<EmployeeRecord>, ApiError>
where
  S: EmployeeStore,
{
  let record = store
    .read(&id)
    .await
    .map_err(|e| ApiError::from_store(execution_id, e.into()))?
    .ok_or_else(|| {
      ApiError::not_found(execution_id, format!("employee {id} not found"))
    })?;
  Ok(Json(record))
}

/// `PUT /employees/:id` — the path id wins over any id in the payload.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Extension(execution_id): Extension<ExecutionId>,
  Path(id): Path<String>,
  Json(body): Json<Employee>,
) -> Result<Json<EmployeeRecord>, ApiError>
where
  S: EmployeeStore,
{
  tracing::debug!(employee_id = %id, "updating employee");
  let record = store
    .update(&id, body)
    .await
    .map_err(|e| ApiError::from_store(execution_id, e.into()))?;
  Ok(Json(record))
}

/// `DELETE /employees/:id` — idempotent; absent and already-tombstoned ids
/// both yield 204 with no new tombstone.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Extension(execution_id): Extension<ExecutionId>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: EmployeeStore,
{
  tracing::debug!(employee_id = %id, "deleting employee");
  store
    .delete(&id)
    .await
    .map_err(|e| ApiError::from_store(execution_id, e.into()))?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /employees/:id/history` — 404 only when the id has no history at
/// all; a tombstoned id still has inspectable history.
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Extension(execution_id): Extension<ExecutionId>,
  Path(id): Path<String>,
) -> Result<Json<Vec<EmployeeRecord>>, ApiError>
where
  S: EmployeeStore,
{
  let records = store
    .history(&id)
    .await
    .map_err(|e| ApiError::from_store(execution_id, e.into()))?;
  if records.is_empty() {
    return Err(ApiError::not_found(
      execution_id,
      format!("employee {id} has no history"),
    ));
  }
  Ok(Json(records))
}
