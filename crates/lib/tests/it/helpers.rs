//! Shared helpers for the integration suite.

use std::sync::Arc;

use serde_json::{Value, json};

use resequence::backend::InMemoryStore;
use resequence::{Sequence, SequencedItem};

/// A raw store record the way a hosted backend would return it.
pub fn stop_record(id: &str, position: u64, customer: &str) -> Value {
    json!({
        "_id": id,
        "sequence_number": position,
        "customer_name_text": customer,
        "completed_boolean": false,
    })
}

/// An in-memory store seeded with one owner's records.
pub fn seeded_store(owner: &str, stops: &[(&str, u64, &str)]) -> Arc<InMemoryStore<Value>> {
    let store = InMemoryStore::new();
    for (id, position, customer) in stops {
        store.insert_record(
            owner,
            SequencedItem::new(*id, *position, stop_record(id, *position, customer)),
        );
    }
    Arc::new(store)
}

/// Item ids in display order.
pub fn ids<T>(sequence: &Sequence<T>) -> Vec<String> {
    sequence.items().iter().map(|item| item.id.clone()).collect()
}
