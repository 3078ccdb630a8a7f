//! SQLite backend for the Tenure employee store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Both tables are strictly append-only:
//! no UPDATE or DELETE statement exists anywhere in this crate.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
