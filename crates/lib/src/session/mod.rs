//! Owner-scoped editing sessions over a sequence store.
//!
//! A [`SequenceSession`] ties the pieces together for one UI context: it
//! owns the currently selected sequence, remembers which positions the remote
//! store is known to hold (the baseline), and reconciles local reorders back
//! through the store. Selecting another owner replaces the sequence wholesale
//! and supersedes any save still in flight; a superseded save's results are
//! discarded, never applied to the successor sequence.
//!
//! The session is a cloneable handle; clones share state. Mutations are
//! serialized under an internal lock that is never held across an await.
//! Callers still own move ordering: indices passed to [`SequenceSession::move_item`]
//! are only meaningful against the sequence as it was when they were computed,
//! so two logical writers must not interleave moves without resynchronizing.

mod errors;
pub use errors::SessionError;


use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::backend::SequenceStore;
use crate::clock::{Clock, SystemClock};
use crate::reconcile::{self, PositionChange, ReconcileReport};
use crate::sequence::Sequence;

/// Outcome of a [`SequenceSession::save`] call.
///
/// Distinguishes the three cases a caller must handle differently: fully
/// persisted, partially persisted (with the failing ids), and superseded.
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// Every pending position change was written, or nothing was pending.
    Persisted,
    /// Some writes failed. The report names the failing ids; they stay
    /// pending and the next save re-sends them.
    Partial(ReconcileReport),
    /// The sequence was replaced while the save was in flight. The results
    /// were discarded; nothing was applied locally.
    Superseded,
}

/// Counters and timestamps for save activity within a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveStats {
    /// Number of saves that dispatched at least one write.
    pub attempts: u64,
    /// Total position writes confirmed by the store.
    pub persisted_items: u64,
    /// Total position writes that failed.
    pub failed_items: u64,
    /// Timestamp of the last save that dispatched writes.
    pub last_attempt_at: Option<String>,
    /// Timestamp of the last save in which every write succeeded.
    pub last_success_at: Option<String>,
}

/// The active sequence plus the positions the store is known to hold.
struct ActiveSequence<T> {
    sequence: Sequence<T>,
    /// id -> position as last confirmed persisted
    baseline: HashMap<String, u64>,
}

struct SessionState<T> {
    active: Option<ActiveSequence<T>>,
    /// Incremented whenever the active sequence is replaced
    generation: u64,
    stats: SaveStats,
}

struct SessionInner<T> {
    store: Arc<dyn SequenceStore<T>>,
    clock: Arc<dyn Clock>,
    state: Mutex<SessionState<T>>,
}

/// A per-context handle for loading, reordering, and saving one owner's
/// sequence at a time.
pub struct SequenceSession<T> {
    inner: Arc<SessionInner<T>>,
}

impl<T> Clone for SequenceSession<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SequenceSession<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a session over the given store.
    pub fn new(store: Arc<dyn SequenceStore<T>>) -> Self {
        Self::build(store, Arc::new(SystemClock))
    }

    /// Create a session with an explicit time source for its statistics.
    #[cfg(any(test, feature = "testing"))]
    pub fn with_clock(store: Arc<dyn SequenceStore<T>>, clock: Arc<dyn Clock>) -> Self {
        Self::build(store, clock)
    }

    fn build(store: Arc<dyn SequenceStore<T>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store,
                clock,
                state: Mutex::new(SessionState {
                    active: None,
                    generation: 0,
                    stats: SaveStats::default(),
                }),
            }),
        }
    }

    /// Select an owner: fetch its records, load them into a fresh sequence,
    /// and make it the active one.
    ///
    /// The previous sequence, if any, is discarded along with its unsaved
    /// reorders, and any save still in flight for it becomes superseded. The
    /// baseline is reset to the positions as fetched.
    pub async fn select(&self, owner: &str) -> Result<()> {
        let items = self.inner.store.fetch(owner).await?;
        let sequence = Sequence::load(owner, items);
        let baseline = reconcile::position_index(&sequence);

        let mut state = self.inner.state.lock().unwrap();
        state.generation += 1;
        tracing::info!(
            "Selected owner {owner}: {} items (generation {})",
            sequence.len(),
            state.generation
        );
        state.active = Some(ActiveSequence { sequence, baseline });
        Ok(())
    }

    /// Re-fetch the active owner's records, replacing the sequence wholesale.
    ///
    /// Unsaved local reorders are lost; this is the explicit way back to
    /// authoritative state after a partial save failure.
    ///
    /// # Errors
    /// Returns [`SessionError::NoActiveSequence`] if no owner is selected.
    pub async fn reload(&self) -> Result<()> {
        let owner = self.owner().ok_or(SessionError::NoActiveSequence)?;
        self.select(&owner).await
    }

    /// Move the item at `source` to `target` in the active sequence.
    ///
    /// Synchronous and strictly ordered: each call is applied to the sequence
    /// as the previous one left it.
    ///
    /// # Errors
    /// Returns [`SessionError::NoActiveSequence`] if no owner is selected,
    /// or the underlying index error with no state mutated.
    pub fn move_item(&self, source: usize, target: usize) -> Result<()> {
        let mut state = self.inner.state.lock().unwrap();
        let active = state
            .active
            .as_mut()
            .ok_or(SessionError::NoActiveSequence)?;
        active.sequence.move_item(source, target)?;
        tracing::debug!(
            "Moved item {source} -> {target} for owner {}",
            active.sequence.owner()
        );
        Ok(())
    }

    /// Persist the pending position changes of the active sequence.
    ///
    /// Computes the diff between the baseline and the current sequence and
    /// reconciles it through the store, all writes in parallel. If the
    /// sequence was replaced while the writes were in flight, the results
    /// are discarded and [`SaveOutcome::Superseded`] is returned: the store
    /// calls were allowed to complete, but they no longer describe the
    /// active sequence. Otherwise the baseline advances for the ids that
    /// were confirmed written, so failed ids are re-sent by the next save.
    ///
    /// Overlapping saves are tolerated (each works from its own snapshot)
    /// but may issue redundant writes; callers wanting strict ordering
    /// await each save before triggering the next.
    ///
    /// # Errors
    /// Returns [`SessionError::NoActiveSequence`] if no owner is selected.
    /// Per-item persistence failures are reported in the outcome, never as
    /// an error.
    pub async fn save(&self) -> Result<SaveOutcome> {
        let (generation, owner, changes) = {
            let mut state = self.inner.state.lock().unwrap();
            let active = state
                .active
                .as_ref()
                .ok_or(SessionError::NoActiveSequence)?;
            let owner = active.sequence.owner().to_string();
            let changes = reconcile::diff_against(&active.baseline, &active.sequence);
            if changes.is_empty() {
                tracing::debug!("Nothing to save for owner {owner}");
                return Ok(SaveOutcome::Persisted);
            }
            state.stats.attempts += 1;
            state.stats.last_attempt_at = Some(self.inner.clock.now_rfc3339());
            (state.generation, owner, changes)
        };

        tracing::debug!("Saving {} position changes for owner {owner}", changes.len());
        let report = reconcile::reconcile(changes, Arc::clone(&self.inner.store)).await;

        let mut state = self.inner.state.lock().unwrap();
        if state.generation != generation {
            tracing::info!("Discarding save results for superseded sequence of owner {owner}");
            return Ok(SaveOutcome::Superseded);
        }

        state.stats.persisted_items += report.persisted.len() as u64;
        state.stats.failed_items += report.failures.len() as u64;
        if let Some(active) = state.active.as_mut() {
            for change in &report.persisted {
                active.baseline.insert(change.id.clone(), change.position);
            }
        }

        if report.all_succeeded() {
            state.stats.last_success_at = Some(self.inner.clock.now_rfc3339());
            Ok(SaveOutcome::Persisted)
        } else {
            tracing::warn!(
                "{} of {} position writes failed for owner {owner}",
                report.failures.len(),
                report.attempted()
            );
            Ok(SaveOutcome::Partial(report))
        }
    }

    /// The position changes a save would send right now.
    ///
    /// # Errors
    /// Returns [`SessionError::NoActiveSequence`] if no owner is selected.
    pub fn pending_changes(&self) -> Result<Vec<PositionChange>> {
        let state = self.inner.state.lock().unwrap();
        let active = state
            .active
            .as_ref()
            .ok_or(SessionError::NoActiveSequence)?;
        Ok(reconcile::diff_against(&active.baseline, &active.sequence))
    }

    /// A clone of the active sequence for rendering, if any.
    pub fn snapshot(&self) -> Option<Sequence<T>> {
        let state = self.inner.state.lock().unwrap();
        state.active.as_ref().map(|active| active.sequence.clone())
    }

    /// The active owner, if any.
    pub fn owner(&self) -> Option<String> {
        let state = self.inner.state.lock().unwrap();
        state
            .active
            .as_ref()
            .map(|active| active.sequence.owner().to_string())
    }

    /// The current sequence generation. Incremented by every
    /// [`SequenceSession::select`] and [`SequenceSession::reload`].
    pub fn generation(&self) -> u64 {
        self.inner.state.lock().unwrap().generation
    }

    /// Save activity counters for this session.
    pub fn stats(&self) -> SaveStats {
        self.inner.state.lock().unwrap().stats.clone()
    }
}
