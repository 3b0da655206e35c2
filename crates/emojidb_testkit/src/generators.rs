//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random stores that respect the
//! encoding rules: entity names and markers are standalone symbols, and
//! text values never contain a marker or decode as a number.

use emojidb_codec::{check_text, is_digit_symbol, tokenize, Value};
use proptest::prelude::*;

/// Symbols used as entity names.
pub const ENTITY_POOL: [&str; 8] = ["📑", "🗒", "🍴", "📂", "🗂", "👨‍🍳", "E", "F"];

/// Symbols used as field markers.
pub const MARKER_POOL: [&str; 8] = ["🆔", "🕓", "🪑", "🍽", "🔢", "🧟", "A", "B"];

/// Symbols text values are built from. Disjoint from [`MARKER_POOL`].
pub const TEXT_POOL: [&str; 14] = [
    "🥗", "🥩", "🍌", "✅", "❌", "👮‍♂️", "🌞", "🌧", "🦀", "x", "y", " ", "-", "1️⃣",
];

/// An entity to be created and filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpec {
    /// Entity name.
    pub name: String,
    /// Field markers in schema order.
    pub fields: Vec<String>,
    /// Records, each a row of values in schema order.
    pub records: Vec<Vec<Value>>,
}

/// A whole store to be created and filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSpec {
    /// Entities in creation order, with distinct names.
    pub entities: Vec<EntitySpec>,
}

/// A mutation applied to a single entity.
#[derive(Debug, Clone)]
pub enum RecordOp {
    /// Insert a record at the back.
    Append(Vec<Value>),
    /// Insert a record at the front.
    Prepend(Vec<Value>),
    /// Remove the head record.
    RemoveFirst,
    /// Remove every record.
    RemoveAll,
}

/// Strategy for integers, biased toward the edges of the digit encoding.
pub fn integer_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(7u64),
        Just(42u64),
        Just(1_000_000u64),
        Just(u64::MAX),
        any::<u64>(),
    ]
}

/// Strategy for text values that are valid in any field of a schema drawn
/// from [`MARKER_POOL`].
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TEXT_POOL.to_vec()), 1..5)
        .prop_map(|symbols| symbols.concat())
        .prop_filter("text must be encodable", |text| {
            check_text(text, MARKER_POOL[0], Some(MARKER_POOL[1]), &MARKER_POOL).is_ok()
                && check_text(text, MARKER_POOL[0], None, &MARKER_POOL).is_ok()
        })
}

/// Strategy for field values.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        integer_strategy().prop_map(Value::Integer),
        text_strategy().prop_map(Value::Text),
    ]
}

/// Strategy for an ordered, duplicate-free list of field markers.
pub fn fields_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(MARKER_POOL.to_vec(), 1..=4)
        .prop_shuffle()
        .prop_map(|fields| fields.into_iter().map(String::from).collect())
}

/// Strategy for one record of the given width.
pub fn record_strategy(width: usize) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(value_strategy(), width)
}

/// Strategy for a filled entity.
pub fn entity_spec_strategy() -> impl Strategy<Value = EntitySpec> {
    (prop::sample::select(ENTITY_POOL.to_vec()), fields_strategy()).prop_flat_map(
        |(name, fields)| {
            let records = prop::collection::vec(record_strategy(fields.len()), 0..6);
            (Just(name.to_string()), Just(fields), records).prop_map(|(name, fields, records)| {
                EntitySpec {
                    name,
                    fields,
                    records,
                }
            })
        },
    )
}

/// Strategy for a store of up to four entities with distinct names.
pub fn store_spec_strategy() -> impl Strategy<Value = StoreSpec> {
    prop::collection::vec(entity_spec_strategy(), 0..5).prop_map(|specs| {
        let mut entities: Vec<EntitySpec> = Vec::new();
        for spec in specs {
            if !entities.iter().any(|e| e.name == spec.name) {
                entities.push(spec);
            }
        }
        StoreSpec { entities }
    })
}

/// Strategy for a sequence of mutations on an entity of the given width.
pub fn record_ops_strategy(width: usize, max_len: usize) -> impl Strategy<Value = Vec<RecordOp>> {
    let op = prop_oneof![
        4 => record_strategy(width).prop_map(RecordOp::Append),
        3 => record_strategy(width).prop_map(RecordOp::Prepend),
        2 => Just(RecordOp::RemoveFirst),
        1 => Just(RecordOp::RemoveAll),
    ];
    prop::collection::vec(op, 0..max_len)
}

/// Returns true if `text` consists of digit symbols only.
#[must_use]
pub fn is_digit_text(text: &str) -> bool {
    let tokens = tokenize(text);
    !tokens.is_empty() && tokens.iter().all(|t| is_digit_symbol(t))
}
