//! Store capabilities consumed by the reconciler.
//!
//! The library is agnostic to transport, authentication, and the shape of any
//! field other than id and position. Everything it needs from its environment
//! is captured by two traits: [`PositionWriter`], the single update call used
//! during reconciliation, and [`SequenceStore`], which adds owner-scoped
//! fetching for the session layer.

mod errors;
pub use errors::BackendError;

mod memory;
pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::Result;
use crate::sequence::SequencedItem;

/// Write access to the position field of remote records.
///
/// This models a generic remote object-update call: one record, one new
/// position value. Implementations must tolerate concurrent invocations for
/// distinct records; a reconciliation batch dispatches its writes in
/// parallel.
#[async_trait]
pub trait PositionWriter: Send + Sync {
    /// Persist a new position for a single record.
    ///
    /// # Errors
    /// A failure applies to this record only; the error's display form is
    /// surfaced to callers as the per-item failure detail.
    async fn update_position(&self, id: &str, position: u64) -> Result<()>;
}

/// Full store access for sequences: owner-scoped listing plus position writes.
#[async_trait]
pub trait SequenceStore<T>: PositionWriter {
    /// Fetch all records belonging to `owner`.
    ///
    /// Order is arbitrary; loading sorts by stored position. An unknown owner
    /// yields an empty list, not an error.
    async fn fetch(&self, owner: &str) -> Result<Vec<SequencedItem<T>>>;
}
