//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur in store implementations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// No record exists with the given id.
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    /// A position write was rejected by the store.
    #[error("Write failed for record {id}: {reason}")]
    WriteFailed { id: String, reason: String },
}

impl BackendError {
    /// Check if this error indicates a record was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::RecordNotFound { .. })
    }

    /// Check if this error is a failed position write.
    pub fn is_write_failed(&self) -> bool {
        matches!(self, BackendError::WriteFailed { .. })
    }

    /// Get the record id associated with this error.
    pub fn record_id(&self) -> &str {
        match self {
            BackendError::RecordNotFound { id } | BackendError::WriteFailed { id, .. } => id,
        }
    }
}

// Conversion from BackendError to the main Error type
impl From<BackendError> for crate::Error {
    fn from(err: BackendError) -> Self {
        crate::Error::Backend(err)
    }
}
