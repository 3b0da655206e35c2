//! Property tests over generated stores.

use emojidb_core::{CoreError, Database, Value};
use emojidb_testkit::prelude::*;
use proptest::prelude::*;
use std::collections::VecDeque;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn reload_reconstructs_store(spec in store_spec_strategy()) {
        let mut store = TestStore::memory();
        populate(&mut store, &spec).unwrap();
        store.flush().unwrap();

        prop_assert_eq!(snapshot(&store), spec.clone());
        prop_assert_eq!(snapshot(&store.reopen()), spec);
    }

    #[test]
    fn flushing_twice_is_byte_identical(spec in store_spec_strategy()) {
        let mut store = TestStore::memory();
        populate(&mut store, &spec).unwrap();

        store.flush().unwrap();
        let first = store.persisted().unwrap();
        store.flush().unwrap();
        prop_assert_eq!(store.persisted().unwrap(), first.clone());

        // A reloaded store writes the same bytes again.
        let reloaded = store.reopen();
        prop_assert_eq!(reloaded.render(), first);
    }

    #[test]
    fn operations_match_queue_model(
        (fields, ops) in fields_strategy()
            .prop_flat_map(|fields| {
                let width = fields.len();
                (Just(fields), record_ops_strategy(width, 24))
            })
    ) {
        let mut store = TestStore::memory();
        store.create_entity("E", fields.iter().cloned()).unwrap();
        let mut model: VecDeque<Vec<Value>> = VecDeque::new();

        for op in &ops {
            let mut entity = store.entity_mut("E").unwrap();
            let result = apply(&mut entity, op);
            match op {
                RecordOp::Append(values) => model.push_back(values.clone()),
                RecordOp::Prepend(values) => model.push_front(values.clone()),
                RecordOp::RemoveFirst => {
                    if model.pop_front().is_none() {
                        prop_assert!(
                            matches!(result, Err(CoreError::RecordNotFound { .. })),
                            "expected RecordNotFound on empty entity, got {:?}",
                            result
                        );
                        continue;
                    }
                }
                RecordOp::RemoveAll => model.clear(),
            }
            prop_assert!(result.is_ok());
        }

        let expected: Vec<_> = model.into_iter().collect();
        prop_assert_eq!(rows(store.entity("E").unwrap().records()), expected.clone());
        prop_assert_eq!(rows(store.reopen().entity("E").unwrap().records()), expected);
    }

    #[test]
    fn priority_record_is_removed_first(
        records in prop::collection::vec(record_strategy(2), 0..6),
        head in record_strategy(2),
    ) {
        let mut store = TestStore::memory();
        let mut entity = store.create_entity("E", ["A", "B"]).unwrap();
        for record in &records {
            insert(&mut entity, record, false).unwrap();
        }
        insert(&mut entity, &head, true).unwrap();

        prop_assert_eq!(entity.get(0).unwrap().values(), head.as_slice());
        let removed = entity.remove_first().unwrap();
        prop_assert_eq!(removed.values(), head.as_slice());
        prop_assert_eq!(rows(entity.records()), records);
    }

    #[test]
    fn records_where_returns_matching_subset(
        records in prop::collection::vec(record_strategy(2), 0..8),
        probe in value_strategy(),
    ) {
        let mut store = TestStore::memory();
        let mut entity = store.create_entity("E", ["A", "B"]).unwrap();
        for record in &records {
            insert(&mut entity, record, false).unwrap();
        }
        // Make a hit likely.
        if let Some(first) = records.first() {
            insert(&mut entity, first, false).unwrap();
        }

        for target in records.first().map(|r| r[0].clone()).into_iter().chain([probe]) {
            let found = rows(entity.records_where("A", target.clone()).unwrap().into_iter());
            let expected: Vec<_> = rows(entity.records())
                .into_iter()
                .filter(|r| r[0] == target)
                .collect();
            prop_assert_eq!(found, expected);
        }
    }

    #[test]
    fn remove_all_returns_previous_length(
        records in prop::collection::vec(record_strategy(1), 0..8),
    ) {
        let mut store = TestStore::memory();
        let mut entity = store.create_entity("E", ["A"]).unwrap();
        for record in &records {
            insert(&mut entity, record, false).unwrap();
        }

        prop_assert_eq!(entity.remove_all().unwrap(), records.len());
        prop_assert!(entity.is_empty());
        prop_assert!(store.persisted().unwrap().contains("EA#️⃣0️⃣"));
    }

    #[test]
    fn integers_survive_reload(n in integer_strategy()) {
        let mut store = TestStore::memory();
        store.create_entity("E", ["A"]).unwrap();
        insert(&mut store.entity_mut("E").unwrap(), &[Value::Integer(n)], false).unwrap();

        let reloaded = store.reopen();
        let record = reloaded.entity("E").unwrap().get(0).unwrap();
        prop_assert_eq!(record.get("A").unwrap(), &Value::Integer(n));
    }
}

#[test]
fn header_counts_survive_reload() {
    for count in [0usize, 7, 42, 120] {
        let mut store = TestStore::memory();
        let mut entity = store.create_entity("E", ["A"]).unwrap();
        for i in 0..count {
            insert(&mut entity, &[Value::Integer(i as u64)], false).unwrap();
        }
        assert_eq!(store.reopen().entity("E").unwrap().len(), count);
    }
}

#[test]
fn force_create_then_flush_discards_old_contents() {
    let store = TestStore::memory();
    let backend = store.backend().unwrap().clone();
    {
        let mut db = store.reopen();
        db.create_entity("E", ["A"]).unwrap();
    }

    let db = Database::open_with_backend(
        TEST_STORE,
        emojidb_core::OpenMode::ForceCreate,
        Box::new(backend),
    )
    .unwrap();
    assert!(db.entities().is_empty());
    db.flush().unwrap();
    assert!(store.reopen().entities().is_empty());
}
