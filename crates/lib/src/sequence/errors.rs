//! Error types for ordered sequence operations.

use thiserror::Error;

/// Errors that can occur while manipulating a sequence.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SequenceError {
    /// A move index fell outside the collection bounds.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SequenceError {
    /// Check if this error is a rejected move index.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SequenceError::IndexOutOfRange { .. })
    }
}

// Conversion from SequenceError to the main Error type
impl From<SequenceError> for crate::Error {
    fn from(err: SequenceError) -> Self {
        crate::Error::Sequence(err)
    }
}
