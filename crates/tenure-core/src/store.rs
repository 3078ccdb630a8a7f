//! The `EmployeeStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tenure-store-sqlite`).
//! Higher layers (`tenure-api`, `tenure-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::employee::{Employee, EmployeeRecord};

/// Abstraction over a Tenure employee store backend.
///
/// All writes are append-only: `create` and `update` add a new active
/// version, `delete` adds a tombstone version. No operation ever mutates or
/// removes an existing version.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EmployeeStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Liveness probe: a trivial round trip against the backing storage.
  /// Never surfaces business errors.
  fn ping(&self) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Append a new active version for `employee.employee_id`.
  ///
  /// For a fresh id this writes version 1. For an id whose history ends in
  /// a tombstone it resurrects the employee at the next version — the only
  /// resurrection path. Fails if an active current version already exists.
  fn create(
    &self,
    employee: Employee,
  ) -> impl Future<Output = Result<EmployeeRecord, Self::Error>> + Send + '_;

  /// Resolve the current version: the active version with the greatest
  /// timestamp, together with its own address set. `None` if no active
  /// version exists — including when only tombstones remain.
  fn read<'a>(
    &'a self,
    employee_id: &'a str,
  ) -> impl Future<Output = Result<Option<EmployeeRecord>, Self::Error>> + Send + 'a;

  /// Append a new active version carrying `employee`'s attributes.
  ///
  /// Requires an active current version: fails with not-found both for ids
  /// with no history and for tombstoned ids. Writes nothing on failure.
  fn update<'a>(
    &'a self,
    employee_id: &'a str,
    employee: Employee,
  ) -> impl Future<Output = Result<EmployeeRecord, Self::Error>> + Send + 'a;

  /// Append one tombstone version: a carbon copy of the current version's
  /// attributes and addresses with `active = false`. No-op returning `None`
  /// when no active version exists, so repeated deletes are idempotent.
  fn delete<'a>(
    &'a self,
    employee_id: &'a str,
  ) -> impl Future<Output = Result<Option<EmployeeRecord>, Self::Error>> + Send + 'a;

  /// The full version history for an id, ascending, tombstones included,
  /// each version with its own address set.
  fn history<'a>(
    &'a self,
    employee_id: &'a str,
  ) -> impl Future<Output = Result<Vec<EmployeeRecord>, Self::Error>> + Send + 'a;
}
