//! Error type for `tenure-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tenure_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("row decode error: {0}")]
  Decode(String),

  /// `update` was called for an id with no active current version.
  #[error("employee not found: {0}")]
  NotFound(String),

  /// `create` was called for an id that already has an active current
  /// version.
  #[error("employee already exists: {0}")]
  AlreadyExists(String),

  /// A concurrent writer reserved the same (employee_id, version) pair;
  /// the composite primary key rejected this insert.
  #[error("version conflict for employee {0}")]
  Conflict(String),
}

impl From<Error> for tenure_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(inner) => inner,
      Error::NotFound(id) => tenure_core::Error::NotFound(id),
      Error::AlreadyExists(id) => tenure_core::Error::AlreadyExists(id),
      other => tenure_core::Error::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
