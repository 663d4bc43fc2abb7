//!
//! Resequence: client-side reconciliation for remotely persisted ordered collections.
//! This library manages a locally held ordered sequence that mirrors a remote
//! collection in which every record carries a persisted integer position field.
//!
//! ## Core Concepts
//!
//! * **Sequenced items (`sequence::SequencedItem`)**: The unit of data. An opaque id, a
//!   1-based position rank, and an uninterpreted payload.
//! * **Sequences (`sequence::Sequence`)**: An owner-scoped ordered collection of items,
//!   loaded from stored order and reordered locally via `move_item`.
//! * **Diff & reconcile (`reconcile`)**: Computes the minimal set of position changes
//!   between two snapshots and persists them through concurrent, non-transactional
//!   update calls, aggregating per-item failures.
//! * **Stores (`backend::SequenceStore`)**: A pluggable capability for fetching
//!   owner-scoped records and writing individual position updates.
//! * **Sessions (`session::SequenceSession`)**: Per-context state tying it together:
//!   owner selection, a persisted-position baseline, and discarding of saves that
//!   complete after their sequence has been superseded.

pub mod backend;
pub mod clock;
pub mod record;
pub mod reconcile;
pub mod sequence;
pub mod session;

/// Re-export the core collection types for easier access.
pub use sequence::{Sequence, SequencedItem};

/// Re-export the session entry point.
pub use session::{SaveOutcome, SequenceSession};

pub use clock::{Clock, SystemClock};

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Result type used throughout the resequence library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the resequence library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured ordering errors from the sequence module
    #[error(transparent)]
    Sequence(sequence::SequenceError),

    /// Structured record-mapping errors from the record module
    #[error(transparent)]
    Record(record::RecordError),

    /// Structured store errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),

    /// Structured session errors from the session module
    #[error(transparent)]
    Session(session::SessionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Sequence(_) => "sequence",
            Error::Record(_) => "record",
            Error::Backend(_) => "backend",
            Error::Session(_) => "session",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error is a rejected move index.
    pub fn is_out_of_range(&self) -> bool {
        match self {
            Error::Sequence(seq_err) => seq_err.is_out_of_range(),
            _ => false,
        }
    }

    /// Check if this error indicates a record was not found in the store.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a failed position write.
    pub fn is_write_failed(&self) -> bool {
        match self {
            Error::Backend(backend_err) => backend_err.is_write_failed(),
            _ => false,
        }
    }

    /// Check if this error is record-mapping related.
    pub fn is_record_error(&self) -> bool {
        matches!(self, Error::Record(_))
    }

    /// Check if this error indicates no sequence has been selected yet.
    pub fn is_no_active_sequence(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_no_active_sequence(),
            _ => false,
        }
    }
}
