//! Diff minimality and concurrent persistence semantics.

use std::sync::Arc;

use resequence::backend::SequenceStore;
use resequence::reconcile::{diff, reconcile};

use crate::helpers::seeded_store;

#[tokio::test]
async fn head_insertion_shifts_everyone() {
    // Three stops [A@1, B@2, C@3]; dragging C to the front changes all three
    let store = seeded_store("tour-1", &[("A", 1, "Nord"), ("B", 2, "Ost"), ("C", 3, "Süd")]);

    let before = resequence::Sequence::load("tour-1", store.fetch("tour-1").await.unwrap());
    let mut after = before.clone();
    after.move_item(2, 0).unwrap();

    let changes = diff(&before, &after);
    assert_eq!(changes.len(), 3);

    let report = reconcile(changes, store.clone()).await;
    assert!(report.all_succeeded());

    let stored = store.fetch("tour-1").await.unwrap();
    let position_of = |id: &str| stored.iter().find(|i| i.id == id).unwrap().position;
    assert_eq!(position_of("C"), 1);
    assert_eq!(position_of("A"), 2);
    assert_eq!(position_of("B"), 3);
}

#[tokio::test]
async fn tail_to_middle_move_writes_only_the_span() {
    let store = seeded_store(
        "tour-1",
        &[
            ("a", 1, "1"),
            ("b", 2, "2"),
            ("c", 3, "3"),
            ("d", 4, "4"),
            ("e", 5, "5"),
        ],
    );

    let before = resequence::Sequence::load("tour-1", store.fetch("tour-1").await.unwrap());
    let mut after = before.clone();
    after.move_item(4, 2).unwrap();

    let changes = diff(&before, &after);
    let mut changed: Vec<&str> = changes.iter().map(|c| c.id.as_str()).collect();
    changed.sort_unstable();
    assert_eq!(changed, vec!["c", "d", "e"], "a and b are outside the span");

    reconcile(changes, store.clone()).await;
    assert_eq!(store.write_log().len(), 3);
}

#[tokio::test]
async fn one_broken_record_does_not_block_the_rest() {
    let store = seeded_store(
        "tour-1",
        &[("a", 1, "1"), ("b", 2, "2"), ("c", 3, "3"), ("d", 4, "4")],
    );
    store.fail_writes_for("c");

    let before = resequence::Sequence::load("tour-1", store.fetch("tour-1").await.unwrap());
    let mut after = before.clone();
    after.move_item(3, 0).unwrap();

    let report = reconcile(diff(&before, &after), store.clone()).await;
    assert!(!report.all_succeeded());
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures.contains_key("c"));

    // All four writes were attempted regardless of the failure
    let mut attempted: Vec<String> = store.write_log().into_iter().map(|(id, _)| id).collect();
    attempted.sort_unstable();
    assert_eq!(attempted, vec!["a", "b", "c", "d"]);
}
