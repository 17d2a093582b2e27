//! Local record persistence for admission inquiries and feedback.
//!
//! Records are kept as one JSON array per category behind a small
//! key-value seam, backed either by memory or by a WAL-mode SQLite file.
//! Every append is validated against the category schema first; a rejected
//! submission leaves storage untouched.

pub mod backend;
pub mod db;
pub mod error;
pub mod migrations;
pub mod records;
pub mod validation;

pub use backend::{KeyValueStore, MemoryStore, SqliteStore};
pub use db::Database;
pub use error::StoreError;
pub use records::RecordStore;
pub use validation::{validate, ValidationError, FEEDBACK_CRITERIA, PROGRAMS};
