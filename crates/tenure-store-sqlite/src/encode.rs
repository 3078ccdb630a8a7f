//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with fixed-width microsecond
//! precision and a `Z` suffix, so lexicographic ordering in SQL (`MAX`,
//! `ORDER BY`) agrees with chronological ordering. Employee kinds are stored
//! by variant name.

use chrono::{DateTime, SecondsFormat, Utc};
use tenure_core::employee::{EmployeeAddress, EmployeeKind, EmployeeRecord};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── EmployeeKind ────────────────────────────────────────────────────────────

pub fn encode_kind(k: EmployeeKind) -> &'static str {
  match k {
    EmployeeKind::Associate => "Associate",
    EmployeeKind::Manager => "Manager",
  }
}

pub fn decode_kind(s: &str) -> Result<EmployeeKind> {
  match s {
    "Associate" => Ok(EmployeeKind::Associate),
    "Manager" => Ok(EmployeeKind::Manager),
    other => Err(Error::Decode(format!("unknown employee kind: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `employees` row.
pub struct RawEmployee {
  pub employee_id:     String,
  pub version:         i64,
  pub kind:            String,
  pub first_name:      String,
  pub middle_name:     String,
  pub last_name:       String,
  pub passport_number: String,
  pub position:        String,
  pub timestamp:       String,
  pub active:          bool,
}

impl RawEmployee {
  /// Column list matching [`Self::from_row`]; keep the two in sync.
  pub const COLUMNS: &'static str = "employee_id, version, kind, first_name, \
     middle_name, last_name, passport_number, position, timestamp, active";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      employee_id:     row.get(0)?,
      version:         row.get(1)?,
      kind:            row.get(2)?,
      first_name:      row.get(3)?,
      middle_name:     row.get(4)?,
      last_name:       row.get(5)?,
      passport_number: row.get(6)?,
      position:        row.get(7)?,
      timestamp:       row.get(8)?,
      active:          row.get(9)?,
    })
  }

  pub fn into_record(self, addresses: Vec<EmployeeAddress>) -> Result<EmployeeRecord> {
    Ok(EmployeeRecord {
      employee_id: self.employee_id,
      version: self.version,
      timestamp: decode_dt(&self.timestamp)?,
      active: self.active,
      kind: decode_kind(&self.kind)?,
      first_name: self.first_name,
      middle_name: self.middle_name,
      last_name: self.last_name,
      passport_number: self.passport_number,
      position: self.position,
      addresses,
    })
  }
}
