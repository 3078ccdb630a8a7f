//! [`SqliteStore`] — the SQLite implementation of [`EmployeeStore`].

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rusqlite::OptionalExtension as _;

use tenure_core::{
  employee::{Employee, EmployeeAddress, EmployeeRecord},
  store::EmployeeStore,
};

use crate::{
  encode::{RawEmployee, decode_dt, encode_dt, encode_kind},
  schema::SCHEMA,
  Error, Result,
};

// ─── SQL ─────────────────────────────────────────────────────────────────────

/// Current-version resolution for `read`: greatest timestamp among active
/// rows, version as a defensive tie-break.
const CURRENT_BY_TIMESTAMP: &str = "ORDER BY timestamp DESC, version DESC";

/// Current-version resolution for `delete`: greatest version first, then
/// timestamp (defensive double ordering).
const CURRENT_BY_VERSION: &str = "ORDER BY version DESC, timestamp DESC";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tenure employee store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All store
/// calls are serialised onto one database handle, so two in-process mutations
/// of the same id cannot interleave; a cross-process race on version
/// assignment is caught by the composite primary key instead.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Outcomes crossing the closure boundary ──────────────────────────────────

enum CreateOutcome {
  Created(EmployeeRecord),
  /// An active current version already exists for the id.
  ActiveExists,
}

// ─── Transaction-scoped helpers ──────────────────────────────────────────────
//
// These run inside `tokio_rusqlite::Connection::call` closures and therefore
// speak `rusqlite`/`tokio_rusqlite` errors; domain decisions are mapped to
// crate errors on the async side.

fn current_active_row(
  conn: &rusqlite::Connection,
  employee_id: &str,
  order: &str,
) -> rusqlite::Result<Option<RawEmployee>> {
  let sql = format!(
    "SELECT {} FROM employees WHERE employee_id = ?1 AND active = 1 {} LIMIT 1",
    RawEmployee::COLUMNS,
    order,
  );
  conn
    .query_row(&sql, rusqlite::params![employee_id], RawEmployee::from_row)
    .optional()
}

fn load_addresses(
  conn: &rusqlite::Connection,
  employee_id: &str,
  version: i64,
) -> rusqlite::Result<Vec<EmployeeAddress>> {
  let mut stmt = conn.prepare(
    "SELECT address_line_1, address_line_2, city, state, zip_code
     FROM employee_addresses WHERE employee_id = ?1 AND version = ?2",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![employee_id, version], |row| {
      Ok(EmployeeAddress {
        address_line1: row.get(0)?,
        address_line2: row.get(1)?,
        city:          row.get(2)?,
        state:         row.get(3)?,
        zip_code:      row.get(4)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Reserve the next version number for an id: `max(version) + 1`, computed
/// inside the same transaction that inserts it. The composite primary key
/// turns a lost race into a constraint violation rather than a duplicate.
fn next_version(conn: &rusqlite::Connection, employee_id: &str) -> rusqlite::Result<i64> {
  conn.query_row(
    "SELECT COALESCE(MAX(version), 0) + 1 FROM employees WHERE employee_id = ?1",
    rusqlite::params![employee_id],
    |row| row.get(0),
  )
}

/// Issue a write timestamp that is strictly later than every timestamp
/// already recorded for the id. Keeps greatest-timestamp resolution tie-free
/// even when the wall clock has not advanced between writes.
fn issue_timestamp(
  conn: &rusqlite::Connection,
  employee_id: &str,
) -> std::result::Result<DateTime<Utc>, tokio_rusqlite::Error> {
  let last: Option<String> = conn.query_row(
    "SELECT MAX(timestamp) FROM employees WHERE employee_id = ?1",
    rusqlite::params![employee_id],
    |row| row.get(0),
  )?;

  let now = Utc::now();
  match last {
    None => Ok(now),
    Some(s) => {
      let last = decode_dt(&s).map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
      if now > last {
        Ok(now)
      } else {
        Ok(last + Duration::microseconds(1))
      }
    }
  }
}

fn insert_parent_row(
  conn: &rusqlite::Connection,
  row: &RawEmployee,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO employees (
       employee_id, version, kind, first_name, middle_name,
       last_name, passport_number, position, timestamp, active
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    rusqlite::params![
      row.employee_id,
      row.version,
      row.kind,
      row.first_name,
      row.middle_name,
      row.last_name,
      row.passport_number,
      row.position,
      row.timestamp,
      row.active,
    ],
  )?;
  Ok(())
}

fn insert_addresses(
  conn: &rusqlite::Connection,
  employee_id: &str,
  version: i64,
  addresses: &[EmployeeAddress],
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare(
    "INSERT INTO employee_addresses (
       employee_id, version, address_line_1, address_line_2, city, state, zip_code
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
  )?;
  for address in addresses {
    stmt.execute(rusqlite::params![
      employee_id,
      version,
      address.address_line1,
      address.address_line2,
      address.city,
      address.state,
      address.zip_code,
    ])?;
  }
  Ok(())
}

/// Build the record for a freshly appended active version and insert its
/// parent row plus address set.
fn append_active_version(
  conn: &rusqlite::Connection,
  employee: Employee,
  version: i64,
  timestamp: DateTime<Utc>,
) -> std::result::Result<EmployeeRecord, tokio_rusqlite::Error> {
  let row = RawEmployee {
    employee_id:     employee.employee_id.clone(),
    version,
    kind:            encode_kind(employee.kind).to_owned(),
    first_name:      employee.first_name.clone(),
    middle_name:     employee.middle_name.clone(),
    last_name:       employee.last_name.clone(),
    passport_number: employee.passport_number.clone(),
    position:        employee.position.clone(),
    timestamp:       encode_dt(timestamp),
    active:          true,
  };
  insert_parent_row(conn, &row)?;
  insert_addresses(conn, &employee.employee_id, version, &employee.addresses)?;

  Ok(EmployeeRecord {
    employee_id: employee.employee_id,
    version,
    timestamp,
    active: true,
    kind: employee.kind,
    first_name: employee.first_name,
    middle_name: employee.middle_name,
    last_name: employee.last_name,
    passport_number: employee.passport_number,
    position: employee.position,
    addresses: employee.addresses,
  })
}

/// Map a primary-key violation on insert to [`Error::Conflict`]; everything
/// else passes through unchanged.
fn classify_write(employee_id: &str, err: tokio_rusqlite::Error) -> Error {
  if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _)) = &err
    && f.code == rusqlite::ErrorCode::ConstraintViolation
  {
    return Error::Conflict(employee_id.to_owned());
  }
  Error::Database(err)
}

// ─── EmployeeStore impl ──────────────────────────────────────────────────────

impl EmployeeStore for SqliteStore {
  type Error = Error;

  async fn ping(&self) -> Result<bool> {
    let value: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get(0))?))
      .await?;
    Ok(value == 1)
  }

  async fn create(&self, employee: Employee) -> Result<EmployeeRecord> {
    let id = employee.employee_id.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let active_exists: bool = tx.query_row(
          "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ?1 AND active = 1)",
          rusqlite::params![employee.employee_id],
          |row| row.get(0),
        )?;
        if active_exists {
          return Ok(CreateOutcome::ActiveExists);
        }

        // Version 1 for a fresh id; max + 1 when resurrecting a tombstoned
        // history.
        let version = next_version(&tx, &employee.employee_id)?;
        let timestamp = issue_timestamp(&tx, &employee.employee_id)?;
        let record = append_active_version(&tx, employee, version, timestamp)?;

        tx.commit()?;
        Ok(CreateOutcome::Created(record))
      })
      .await
      .map_err(|e| classify_write(&id, e))?;

    match outcome {
      CreateOutcome::Created(record) => Ok(record),
      CreateOutcome::ActiveExists => Err(Error::AlreadyExists(id)),
    }
  }

  async fn read(&self, employee_id: &str) -> Result<Option<EmployeeRecord>> {
    let id = employee_id.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(current) = current_active_row(&tx, &id, CURRENT_BY_TIMESTAMP)? else {
          return Ok(None);
        };
        let addresses = load_addresses(&tx, &id, current.version)?;
        tx.commit()?;
        Ok(Some((current, addresses)))
      })
      .await?;

    found
      .map(|(raw, addresses)| raw.into_record(addresses))
      .transpose()
  }

  async fn update(&self, employee_id: &str, employee: Employee) -> Result<EmployeeRecord> {
    let id = employee_id.to_owned();
    let id_for_err = employee_id.to_owned();
    // The path id wins over whatever id the payload carries.
    let employee = Employee { employee_id: id.clone(), ..employee };

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Update never resurrects: a tombstoned history reads as absent
        // here, exactly as it does for `read` and `delete`.
        if current_active_row(&tx, &id, CURRENT_BY_TIMESTAMP)?.is_none() {
          return Ok(None);
        }

        let version = next_version(&tx, &id)?;
        let timestamp = issue_timestamp(&tx, &id)?;
        let record = append_active_version(&tx, employee, version, timestamp)?;

        tx.commit()?;
        Ok(Some(record))
      })
      .await
      .map_err(|e| classify_write(&id_for_err, e))?;

    updated.ok_or(Error::NotFound(id_for_err))
  }

  async fn delete(&self, employee_id: &str) -> Result<Option<EmployeeRecord>> {
    let id = employee_id.to_owned();
    let id_for_err = employee_id.to_owned();

    let tombstoned = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Already absent or already tombstoned: idempotent no-op.
        let Some(current) = current_active_row(&tx, &id, CURRENT_BY_VERSION)? else {
          return Ok(None);
        };

        let addresses = load_addresses(&tx, &id, current.version)?;
        let version = next_version(&tx, &id)?;
        let timestamp = issue_timestamp(&tx, &id)?;

        // Carbon copy of the current version's attributes, marked inactive.
        let tombstone = RawEmployee {
          version,
          timestamp: encode_dt(timestamp),
          active: false,
          ..current
        };
        insert_parent_row(&tx, &tombstone)?;
        insert_addresses(&tx, &id, version, &addresses)?;

        tx.commit()?;
        Ok(Some((tombstone, addresses)))
      })
      .await
      .map_err(|e| classify_write(&id_for_err, e))?;

    tombstoned
      .map(|(raw, addresses)| raw.into_record(addresses))
      .transpose()
  }

  async fn history(&self, employee_id: &str) -> Result<Vec<EmployeeRecord>> {
    let id = employee_id.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let sql = format!(
          "SELECT {} FROM employees WHERE employee_id = ?1 ORDER BY version ASC",
          RawEmployee::COLUMNS,
        );
        let mut stmt = tx.prepare(&sql)?;
        let versions = stmt
          .query_map(rusqlite::params![id], RawEmployee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        drop(stmt);

        let mut out = Vec::with_capacity(versions.len());
        for raw in versions {
          let addresses = load_addresses(&tx, &id, raw.version)?;
          out.push((raw, addresses));
        }

        tx.commit()?;
        Ok(out)
      })
      .await?;

    rows
      .into_iter()
      .map(|(raw, addresses)| raw.into_record(addresses))
      .collect()
  }
}
