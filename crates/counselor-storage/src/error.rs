//! Error types for record persistence.

use counselor_core::error::CounselorError;

use crate::validation::ValidationError;

/// Why an append or load did not go through.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The submission failed its category schema. Nothing was stored.
    #[error("submission rejected: {0}")]
    Rejected(#[from] ValidationError),
    /// The backing store could not be read or written.
    #[error(transparent)]
    Backend(#[from] CounselorError),
}

impl StoreError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Rejected(_))
    }
}
