//! SQL schema for the Tenure SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The composite primary key on (employee_id, version) is the backstop for
/// version assignment: a racing writer that loses the max(version) + 1
/// computation hits a constraint violation instead of corrupting history.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Employee versions are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS employees (
    employee_id     TEXT    NOT NULL,
    version         INTEGER NOT NULL,
    kind            TEXT    NOT NULL,   -- 'Associate' | 'Manager'
    first_name      TEXT    NOT NULL,
    middle_name     TEXT    NOT NULL,
    last_name       TEXT    NOT NULL,
    passport_number TEXT    NOT NULL,
    position        TEXT    NOT NULL,
    timestamp       TEXT    NOT NULL,   -- RFC 3339 UTC, fixed-width micros; store-assigned
    active          INTEGER NOT NULL,
    PRIMARY KEY (employee_id, version)
);

-- Each address row belongs to exactly one (employee_id, version) parent.
-- Every new employee version gets a fresh, full copy of its address set.
CREATE TABLE IF NOT EXISTS employee_addresses (
    employee_id    TEXT    NOT NULL,
    version        INTEGER NOT NULL,
    address_line_1 TEXT    NOT NULL,
    address_line_2 TEXT    NOT NULL,
    city           TEXT    NOT NULL,
    state          TEXT    NOT NULL,
    zip_code       TEXT    NOT NULL,
    FOREIGN KEY (employee_id, version) REFERENCES employees(employee_id, version)
);

CREATE INDEX IF NOT EXISTS employees_current_idx
    ON employees(employee_id, active, timestamp);
CREATE INDEX IF NOT EXISTS employee_addresses_parent_idx
    ON employee_addresses(employee_id, version);

PRAGMA user_version = 1;
";
