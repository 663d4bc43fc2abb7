//! Error types for the session module.

use thiserror::Error;

/// Errors that can occur during session operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// No owner has been selected yet.
    #[error("No active sequence. Call select() first")]
    NoActiveSequence,
}

impl SessionError {
    /// Check if this error indicates no sequence has been selected yet.
    pub fn is_no_active_sequence(&self) -> bool {
        matches!(self, SessionError::NoActiveSequence)
    }
}

// Conversion from SessionError to the main Error type
impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}
