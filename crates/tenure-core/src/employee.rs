//! Employee domain types.
//!
//! An employee is never mutated in place: every accepted write appends a new
//! [`EmployeeRecord`] version carrying a full copy of the business attributes
//! and the address set. [`Employee`] is the caller-supplied shape — the same
//! attributes without the store-managed version metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of employee. Persisted and serialised by variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeKind {
  Associate,
  Manager,
}

/// An address owned by exactly one employee version.
///
/// Addresses have no identity of their own: each new parent version receives
/// a fresh, full copy of the set, and no address is ever shared between
/// versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAddress {
  pub address_line1: String,
  pub address_line2: String,
  pub city:          String,
  pub state:         String,
  pub zip_code:      String,
}

/// Caller-supplied employee attributes for `create` and `update`.
///
/// `version`, `timestamp`, and `active` are store-managed and deliberately
/// absent here — anything a caller sends for them on the wire is discarded
/// before this type is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub employee_id:     String,
  #[serde(rename = "type")]
  pub kind:            EmployeeKind,
  pub first_name:      String,
  pub middle_name:     String,
  pub last_name:       String,
  pub passport_number: String,
  pub position:        String,
  pub addresses:       Vec<EmployeeAddress>,
}

/// One persisted version of an employee: the business attributes plus the
/// store-assigned version metadata.
///
/// A record with `active = false` is a tombstone — a full, valid copy of the
/// attributes it logically deletes, not a stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
  pub employee_id:     String,
  /// Positive, gap-free, ascending per id; assigned solely by the store.
  pub version:         i64,
  /// Issued by the store at write time; strictly monotonic per id.
  pub timestamp:       DateTime<Utc>,
  pub active:          bool,
  #[serde(rename = "type")]
  pub kind:            EmployeeKind,
  pub first_name:      String,
  pub middle_name:     String,
  pub last_name:       String,
  pub passport_number: String,
  pub position:        String,
  pub addresses:       Vec<EmployeeAddress>,
}

impl EmployeeRecord {
  /// The caller-shaped view of this version's attributes.
  pub fn attributes(&self) -> Employee {
    Employee {
      employee_id:     self.employee_id.clone(),
      kind:            self.kind,
      first_name:      self.first_name.clone(),
      middle_name:     self.middle_name.clone(),
      last_name:       self.last_name.clone(),
      passport_number: self.passport_number.clone(),
      position:        self.position.clone(),
      addresses:       self.addresses.clone(),
    }
  }
}
