//! Position diffing and persistence reconciliation.
//!
//! [`diff`] computes the minimal set of position changes between two
//! snapshots of the same collection. [`reconcile`] pushes such a set through
//! a [`PositionWriter`], dispatching every write concurrently: positions are
//! independent scalar fields, not a linked structure, so serializing the
//! calls would only add latency.
//!
//! Reconciliation is not transactional. A partial failure leaves the remote
//! store mixed between old and new positions; the local sequence already
//! reflects the user's intended order and is never rolled back. The
//! [`ReconcileReport`] tells the caller exactly which ids failed so it can
//! retry, warn, or re-fetch authoritative state. No retry happens here.


use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backend::PositionWriter;
use crate::sequence::Sequence;

/// A single position update destined for the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    /// Id of the record to update.
    pub id: String,
    /// The new position value to persist.
    pub position: u64,
}

/// Aggregated outcome of one reconciliation batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Changes confirmed written by the store.
    pub persisted: Vec<PositionChange>,
    /// Failure detail per record id, for every write that did not succeed.
    pub failures: BTreeMap<String, String>,
}

impl ReconcileReport {
    /// True iff every write in the batch succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of writes attempted in the batch.
    pub fn attempted(&self) -> usize {
        self.persisted.len() + self.failures.len()
    }
}

/// Compute the minimal set of items whose position differs between two
/// snapshots of the same collection, matched by id.
///
/// Items absent from `after` are ignored; deletion is outside this
/// component's scope. Items new in `after` are included, since their stored
/// position is unknown to the snapshot pair. Output order is unspecified;
/// consumers treat the result as a set.
pub fn diff<T>(before: &Sequence<T>, after: &Sequence<T>) -> Vec<PositionChange> {
    diff_against(&position_index(before), after)
}

/// Index a snapshot's positions by id.
pub(crate) fn position_index<T>(sequence: &Sequence<T>) -> HashMap<String, u64> {
    sequence
        .items()
        .iter()
        .map(|item| (item.id.clone(), item.position))
        .collect()
}

/// Diff a sequence against a known id-to-position baseline.
pub(crate) fn diff_against<T>(
    before: &HashMap<String, u64>,
    after: &Sequence<T>,
) -> Vec<PositionChange> {
    after
        .items()
        .iter()
        .filter(|item| before.get(&item.id) != Some(&item.position))
        .map(|item| PositionChange {
            id: item.id.clone(),
            position: item.position,
        })
        .collect()
}

/// Persist a set of position changes, invoking the writer exactly once per
/// change.
///
/// All writes are dispatched concurrently via [`tokio::task::JoinSet`]; a
/// failing write never aborts its siblings. Failures are aggregated into the
/// report rather than returned as errors, so one slow or broken record cannot
/// hide the outcome of the others.
pub async fn reconcile<W>(changes: Vec<PositionChange>, writer: Arc<W>) -> ReconcileReport
where
    W: PositionWriter + ?Sized + 'static,
{
    let mut report = ReconcileReport::default();
    if changes.is_empty() {
        return report;
    }

    let mut set = tokio::task::JoinSet::new();
    for change in changes {
        let writer = Arc::clone(&writer);
        set.spawn(async move {
            let outcome = writer.update_position(&change.id, change.position).await;
            (change, outcome)
        });
    }

    while let Some(join_result) = set.join_next().await {
        match join_result {
            Ok((change, Ok(()))) => report.persisted.push(change),
            Ok((change, Err(e))) => {
                tracing::warn!("Failed to persist position for {}: {e}", change.id);
                report.failures.insert(change.id, e.to_string());
            }
            Err(e) => {
                // A write task that panicked cannot name its record; the
                // sibling writes still settle normally.
                tracing::error!("Position write task failed to join: {e}");
            }
        }
    }
    report
}
