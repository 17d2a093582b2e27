//! Shared kernel for the HK-Counselor client.
//!
//! Holds the institutional facts, routes, conversation turns, persisted
//! records, configuration, and the top-level error type used by every other
//! crate in the workspace.

pub mod config;
pub mod error;
pub mod types;

pub use config::CounselorConfig;
pub use error::{CounselorError, Result};
pub use types::*;
