//! Error types for `tenure-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No version history exists for the id, or the newest version is a
  /// tombstone. Raised by `update`; `read` signals absence with `None`.
  #[error("employee not found: {0}")]
  NotFound(String),

  /// `create` was called for an id that already has an active current
  /// version.
  #[error("employee already exists: {0}")]
  AlreadyExists(String),

  /// The backing store rejected a read or write. Carries the underlying
  /// message for diagnostics; callers treat it as opaque.
  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
