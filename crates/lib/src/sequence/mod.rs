//! Ordered collections of remotely persisted items.
//!
//! A [`Sequence`] mirrors a remote collection in which every record carries a
//! persisted integer position field. Loading trusts the stored order as given;
//! [`Sequence::move_item`] is the only operation that rewrites positions, and
//! it always leaves them contiguous from 1.

mod errors;
pub use errors::SequenceError;


use serde::{Deserialize, Serialize};

use crate::Result;

/// A single remotely persisted item within an ordered collection.
///
/// The `id` is assigned by the remote store and stays stable for the item's
/// lifetime. The `payload` is opaque to this library: it is carried through
/// loads and reorders untouched and never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencedItem<T> {
    /// Opaque unique identifier, stable across the item's lifetime.
    pub id: String,
    /// 1-based integer rank within the owning collection.
    pub position: u64,
    /// Associated data, not interpreted by the reconciler.
    pub payload: T,
}

impl<T> SequencedItem<T> {
    /// Create a new item with the given id, position, and payload.
    pub fn new(id: impl Into<String>, position: u64, payload: T) -> Self {
        Self {
            id: id.into(),
            position,
            payload,
        }
    }
}

/// An owner-scoped ordered collection of [`SequencedItem`]s.
///
/// Kept sorted by `position` ascending at all times except during an
/// in-progress move. The in-memory order is the single source of truth once a
/// move has happened; persisted positions catch up at reconciliation time,
/// never the other way around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence<T> {
    owner: String,
    items: Vec<SequencedItem<T>>,
}

impl<T> Sequence<T> {
    /// Build a sequence from items as currently stored remotely.
    ///
    /// Sorts ascending by stored position. The sort is stable, so records
    /// sharing a position keep their input order and the result is
    /// deterministic. Positions are NOT rewritten here: the stored order is
    /// trusted as given, even when it is not contiguous from 1 (e.g. after
    /// manual backend edits). The first `move_item` normalizes it.
    pub fn load(owner: impl Into<String>, mut items: Vec<SequencedItem<T>>) -> Self {
        items.sort_by_key(|item| item.position);
        Self {
            owner: owner.into(),
            items,
        }
    }

    /// Identifier of the parent entity this sequence belongs to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The items in display order.
    pub fn items(&self) -> &[SequencedItem<T>] {
        &self.items
    }

    /// Number of items in the sequence.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&SequencedItem<T>> {
        self.items.get(index)
    }

    /// Find an item by its id.
    pub fn find(&self, id: &str) -> Option<&SequencedItem<T>> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The position values in item order.
    pub fn positions(&self) -> Vec<u64> {
        self.items.iter().map(|item| item.position).collect()
    }

    /// Check whether positions are exactly `1..=len` in order.
    ///
    /// Freshly loaded sequences may not be normalized; any completed
    /// `move_item` leaves the sequence normalized.
    pub fn is_normalized(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(index, item)| item.position == index as u64 + 1)
    }

    /// Move the item at `source` to `target`, shifting the items between them
    /// by one slot (single-element list reorder, not a swap).
    ///
    /// Every position is then recomputed to `index + 1`, restoring the
    /// contiguous 1-based shape regardless of what the sequence looked like
    /// before. A move with `source == target` returns without touching
    /// anything, positions included.
    ///
    /// Purely local and synchronous: no I/O, and the sequence is render-ready
    /// on return.
    ///
    /// # Errors
    /// Returns [`SequenceError::IndexOutOfRange`] if either index is out of
    /// bounds. No state is mutated in that case.
    pub fn move_item(&mut self, source: usize, target: usize) -> Result<()> {
        let len = self.items.len();
        if source >= len {
            return Err(SequenceError::IndexOutOfRange { index: source, len }.into());
        }
        if target >= len {
            return Err(SequenceError::IndexOutOfRange { index: target, len }.into());
        }
        if source == target {
            return Ok(());
        }

        let item = self.items.remove(source);
        self.items.insert(target, item);

        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index as u64 + 1;
        }
        Ok(())
    }
}
