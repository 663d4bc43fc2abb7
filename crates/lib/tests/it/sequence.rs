//! Ordering behavior through the public API.

use resequence::record::RecordMapping;
use resequence::{Sequence, SequencedItem};
use serde_json::json;

use crate::helpers::{ids, stop_record};

#[test]
fn load_is_a_stable_sort_on_stored_positions() {
    // Ties keep input order: b precedes c at position 1
    let sequence = Sequence::load(
        "tour-1",
        vec![
            SequencedItem::new("a", 2, ()),
            SequencedItem::new("b", 1, ()),
            SequencedItem::new("c", 1, ()),
        ],
    );
    assert_eq!(ids(&sequence), vec!["b", "c", "a"]);
}

#[test]
fn any_move_yields_contiguous_one_based_positions() {
    let items: Vec<SequencedItem<()>> = (1..=6)
        .map(|position| SequencedItem::new(format!("item-{position}"), position, ()))
        .collect();
    for source in 0..6 {
        for target in 0..6 {
            let mut sequence = Sequence::load("tour-1", items.clone());
            sequence.move_item(source, target).expect("valid indices");
            let expected: Vec<u64> = (1..=6).collect();
            assert_eq!(sequence.positions(), expected);
        }
    }
}

#[test]
fn rejected_moves_surface_as_input_errors() {
    let mut sequence = Sequence::load("tour-1", vec![SequencedItem::new("a", 1, ())]);
    let err = sequence.move_item(1, 0).expect_err("out of range");
    assert!(err.is_out_of_range());
    assert_eq!(err.module(), "sequence");
}

#[test]
fn raw_records_map_into_a_loadable_sequence() {
    let mapping = RecordMapping::default();
    let items = mapping
        .items_from_values(vec![
            stop_record("s2", 2, "Vogel AG"),
            stop_record("s1", 1, "Müller GmbH"),
            // Manually created record without a sequence number yet
            json!({"_id": "s0", "customer_name_text": "Neu"}),
        ])
        .expect("well-formed records");

    let sequence = Sequence::load("tour-1", items);
    assert_eq!(ids(&sequence), vec!["s0", "s1", "s2"]);
    assert_eq!(
        sequence.find("s1").unwrap().payload["customer_name_text"],
        "Müller GmbH"
    );
}
