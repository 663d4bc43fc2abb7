//! In-memory sequence store implementation
//!
//! This module provides an in-memory implementation of [`SequenceStore`],
//! suitable for testing, development, or scenarios where the authoritative
//! store lives elsewhere and this process only mirrors it.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::Result;
use crate::backend::{BackendError, PositionWriter, SequenceStore};
use crate::sequence::SequencedItem;

/// A simple in-memory store keeping records grouped by owner.
///
/// Records are held behind `RwLock`s for concurrent access. Two hooks support
/// exercising failure paths without a real backend:
///
/// - [`InMemoryStore::fail_writes_for`] rejects position writes for chosen
///   ids with a [`BackendError::WriteFailed`].
/// - [`InMemoryStore::write_log`] returns every attempted position write in
///   completion order, including rejected ones.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    /// Records grouped by owner, in insertion order
    records: RwLock<HashMap<String, Vec<SequencedItem<T>>>>,
    /// Ids whose position writes are rejected
    failing: RwLock<HashSet<String>>,
    /// Attempted position writes, including rejected ones
    write_log: RwLock<Vec<(String, u64)>>,
}

impl<T> InMemoryStore<T> {
    /// Creates a new, empty `InMemoryStore`.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            failing: RwLock::new(HashSet::new()),
            write_log: RwLock::new(Vec::new()),
        }
    }

    /// Insert a record under `owner` with a generated id, returning the id.
    pub fn insert(&self, owner: &str, position: u64, payload: T) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_record(owner, SequencedItem::new(id.clone(), position, payload));
        id
    }

    /// Insert a fully specified record under `owner`.
    pub fn insert_record(&self, owner: &str, item: SequencedItem<T>) {
        let mut records = self.records.write().unwrap();
        records.entry(owner.to_string()).or_default().push(item);
    }

    /// Reject subsequent position writes for `id`.
    pub fn fail_writes_for(&self, id: &str) {
        self.failing.write().unwrap().insert(id.to_string());
    }

    /// Accept position writes again for all ids.
    pub fn clear_injected_failures(&self) {
        self.failing.write().unwrap().clear();
    }

    /// Every attempted position write so far, in completion order.
    pub fn write_log(&self) -> Vec<(String, u64)> {
        self.write_log.read().unwrap().clone()
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> PositionWriter for InMemoryStore<T>
where
    T: Send + Sync,
{
    async fn update_position(&self, id: &str, position: u64) -> Result<()> {
        self.write_log
            .write()
            .unwrap()
            .push((id.to_string(), position));

        if self.failing.read().unwrap().contains(id) {
            return Err(BackendError::WriteFailed {
                id: id.to_string(),
                reason: "injected write failure".to_string(),
            }
            .into());
        }

        let mut records = self.records.write().unwrap();
        for items in records.values_mut() {
            if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                item.position = position;
                return Ok(());
            }
        }
        Err(BackendError::RecordNotFound { id: id.to_string() }.into())
    }
}

#[async_trait]
impl<T> SequenceStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn fetch(&self, owner: &str) -> Result<Vec<SequencedItem<T>>> {
        let records = self.records.read().unwrap();
        Ok(records.get(owner).cloned().unwrap_or_default())
    }
}
