//! Integration tests for the owning list model.

mod common;

use std::sync::Arc;

use common::{Event, Person, init_tracing, names, record, take};
use horizon_objlist::prelude::*;
use horizon_objlist::{ObjlistError, PropertyError};

static_assertions::assert_impl_all!(ObjectListModel<Person>: Send, Sync);

fn model_of(labels: &[&str]) -> Arc<ObjectListModel<Person>> {
    let model = ObjectListModel::<Person>::new();
    model.append_all(labels.iter().map(|label| Person::new(label)));
    model
}

// =========================================================================
// Count and queries
// =========================================================================

#[test]
fn count_changed_fires_only_when_length_changes() {
    init_tracing();
    let model = model_of(&["a", "b"]);
    let log = record(&model);

    model.move_item(0, 1);
    model.remove_at(5);
    assert!(
        !take(&log).iter().any(|event| matches!(event, Event::Count(_))),
        "moves and no-ops leave the count alone"
    );

    model.append(Person::new("c"));
    model.remove_at(0);
    let counts: Vec<_> = take(&log)
        .into_iter()
        .filter_map(|event| match event {
            Event::Count(count) => Some(count),
            _ => None,
        })
        .collect();
    assert_eq!(counts, vec![3, 2]);
    assert_eq!(model.count(), 2);
    assert_eq!(model.size(), model.length());
}

#[test]
fn appended_item_is_last() {
    let model = model_of(&["a", "b"]);
    let item = Person::new("c");
    model.append(item.clone());

    assert_eq!(model.index_of(&item), Some(model.count() - 1));
    assert!(model.last().is_some_and(|last| Arc::ptr_eq(&last, &item)));
    assert_eq!(model.first().map(|first| first.name.get()).as_deref(), Some("a"));
    assert!(model.contains(&item));
    assert!(!model.contains(&Person::new("c")));
}

#[test]
fn empty_model_queries() {
    let model = ObjectListModel::<Person>::new();
    assert!(model.is_empty());
    assert!(model.first().is_none());
    assert!(model.last().is_none());
    assert!(model.at(0).is_none());
    assert!(model.to_list().is_empty());
    assert!(!model.index(0).is_valid());
}

// =========================================================================
// Notification brackets
// =========================================================================

#[test]
fn single_insert_sequence() {
    let model = model_of(&["a", "b"]);
    let log = record(&model);

    model.insert(1, Person::new("x"));
    assert_eq!(
        take(&log),
        vec![
            Event::AboutToInsert("x".into(), 1),
            Event::BeginInsert(1, 1),
            Event::Count(3),
            Event::EndInsert(1, 1),
            Event::Inserted("x".into(), 1),
        ]
    );
    assert_eq!(names(&model), vec!["a", "x", "b"]);
}

#[test]
fn batch_insert_uses_one_bracket() {
    let model = model_of(&["a"]);
    let log = record(&model);

    model.prepend_all([Person::new("x"), Person::new("y")]);
    assert_eq!(
        take(&log),
        vec![
            Event::AboutToInsert("x".into(), 0),
            Event::AboutToInsert("y".into(), 1),
            Event::BeginInsert(0, 1),
            Event::Count(3),
            Event::EndInsert(0, 1),
            Event::Inserted("x".into(), 0),
            Event::Inserted("y".into(), 1),
        ]
    );
    assert_eq!(names(&model), vec!["x", "y", "a"]);

    model.insert_all(2, [Person::new("p"), Person::new("q")]);
    assert_eq!(names(&model), vec!["x", "y", "p", "q", "a"]);
    assert!(take(&log).contains(&Event::BeginInsert(2, 3)));

    model.append_all(Vec::new());
    model.insert_all(0, Vec::new());
    assert!(take(&log).is_empty());
}

#[test]
fn remove_sequence() {
    let model = model_of(&["a", "b", "c"]);
    let log = record(&model);

    model.remove_at(1);
    assert_eq!(
        take(&log),
        vec![
            Event::AboutToRemove("b".into(), 1),
            Event::BeginRemove(1, 1),
            Event::Count(2),
            Event::EndRemove(1, 1),
            Event::Removed("b".into(), 1),
        ]
    );

    let stranger = Person::new("z");
    model.remove(&stranger);
    model.remove_at(9);
    assert!(take(&log).is_empty());
    assert_eq!(names(&model), vec!["a", "c"]);
}

#[test]
fn clear_brackets_the_whole_range_once() {
    let model = model_of(&["a", "b", "c"]);
    let log = record(&model);

    model.clear();
    assert_eq!(
        take(&log),
        vec![
            Event::AboutToRemove("a".into(), 0),
            Event::AboutToRemove("b".into(), 1),
            Event::AboutToRemove("c".into(), 2),
            Event::BeginRemove(0, 2),
            Event::Count(0),
            Event::EndRemove(0, 2),
            Event::Removed("a".into(), 0),
            Event::Removed("b".into(), 1),
            Event::Removed("c".into(), 2),
        ]
    );
    assert!(model.is_empty());

    model.clear();
    assert!(take(&log).is_empty());
}

// =========================================================================
// Moves
// =========================================================================

#[test]
fn move_forward_announces_insert_before_row() {
    let model = model_of(&["A", "B", "C"]);
    let log = record(&model);

    model.move_item(0, 2);
    assert_eq!(names(&model), vec!["B", "C", "A"]);
    assert_eq!(
        take(&log),
        vec![
            Event::AboutToMove("A".into(), 0, 2),
            Event::BeginMove(0, 0, 3),
            Event::EndMove(0, 0, 3),
            Event::Moved("A".into(), 0, 2),
        ]
    );
}

#[test]
fn move_backward_keeps_destination() {
    let model = model_of(&["A", "B", "C"]);
    let log = record(&model);

    model.move_item(2, 0);
    assert_eq!(names(&model), vec!["C", "A", "B"]);
    assert!(take(&log).contains(&Event::BeginMove(2, 2, 0)));
}

#[test]
fn move_matches_remove_then_insert() {
    let model = model_of(&["A", "B", "C", "D", "E"]);
    let log = record(&model);

    model.move_item(1, 3);
    assert_eq!(names(&model), vec!["A", "C", "D", "B", "E"]);
    assert!(take(&log).contains(&Event::BeginMove(1, 1, 4)));

    let reference = model_of(&["A", "B", "C", "D", "E"]);
    if let Some(item) = reference.at(1) {
        reference.remove_at(1);
        reference.insert(3, item);
    }
    assert_eq!(names(&reference), names(&model));
}

#[test]
fn invalid_moves_are_silent() {
    let model = model_of(&["A", "B", "C"]);
    let log = record(&model);

    model.move_item(1, 1);
    model.move_item(3, 0);
    model.move_item(0, 3);
    model.move_up(0);
    model.move_down(2);

    assert!(take(&log).is_empty());
    assert_eq!(names(&model), vec!["A", "B", "C"]);
}

#[test]
fn move_down_from_the_last_possible_row_is_silent() {
    let model = model_of(&["A"]);
    let log = record(&model);

    model.move_down(usize::MAX);
    model.move_up(usize::MAX);

    assert!(take(&log).is_empty());
    assert_eq!(names(&model), vec!["A"]);
}

#[test]
fn move_up_and_down() {
    let model = model_of(&["A", "B", "C"]);

    model.move_down(0);
    assert_eq!(names(&model), vec!["B", "A", "C"]);
    model.move_up(2);
    assert_eq!(names(&model), vec!["B", "C", "A"]);
}

#[test]
fn moved_item_keeps_reporting_its_new_row() {
    let model = model_of(&["A", "B", "C"]);
    let log = record(&model);
    let a = model.first();

    model.move_item(0, 2);
    take(&log);
    if let Some(a) = a {
        a.set_name("A2");
    }
    assert_eq!(take(&log), vec![Event::DataChanged(2, vec![ItemRole::User(1)])]);
}

// =========================================================================
// Change propagation
// =========================================================================

#[test]
fn property_change_reports_row_and_role() {
    let model = model_of(&["a", "b"]);
    let log = record(&model);
    let b = model.at(1);

    if let Some(b) = &b {
        b.set_key("k1");
        b.set_key("k1");
    }
    assert_eq!(take(&log), vec![Event::DataChanged(1, vec![ItemRole::User(3)])]);

    let index = model.index(1);
    assert_eq!(model.data(&index, ItemRole::User(3)), ItemData::from("k1"));
}

#[test]
fn removed_item_stops_reporting() {
    let model = model_of(&["a"]);
    let item = model.at(0);
    model.remove_at(0);
    let log = record(&model);

    if let Some(item) = &item {
        item.set_name("again");
        assert_eq!(item.name_changed.connection_count(), 0);
        assert_eq!(item.key_changed.connection_count(), 0);
    }
    assert!(take(&log).is_empty());
}

#[test]
fn display_backing_property_also_reports_display() {
    let model = ObjectListModel::<Person>::with_config(ModelConfig::new().with_display_role("name"));
    model.append(Person::new("a"));
    let log = record(&model);

    if let Some(item) = model.at(0) {
        item.set_name("b");
        item.set_key("k");
    }
    assert_eq!(
        take(&log),
        vec![
            Event::DataChanged(0, vec![ItemRole::User(1), ItemRole::Display]),
            Event::DataChanged(0, vec![ItemRole::User(3)]),
        ]
    );
    assert_eq!(model.display_text(&model.index(0)), Some("b".to_string()));
}

#[test]
fn item_added_twice_is_wired_once() {
    let model = ObjectListModel::<Person>::new();
    let item = Person::new("dup");
    model.append(item.clone());
    model.append(item.clone());
    let log = record(&model);

    assert_eq!(item.name_changed.connection_count(), 1);
    item.set_name("dup2");
    assert_eq!(
        take(&log),
        vec![Event::DataChanged(0, vec![ItemRole::User(1)])],
        "the first occurrence reports"
    );
}

#[test]
fn slot_may_mutate_model_during_notification() {
    let model = model_of(&["a", "b"]);
    let weak = Arc::downgrade(&model);
    model.list_signals().item_inserted.connect(move |(_, row)| {
        if let Some(model) = weak.upgrade()
            && *row == 2
        {
            model.remove_at(0);
        }
    });

    model.append(Person::new("c"));
    assert_eq!(names(&model), vec!["b", "c"]);
}

// =========================================================================
// Value access
// =========================================================================

#[test]
fn data_by_role() {
    let model = ObjectListModel::<Person>::with_config(ModelConfig::new().with_display_role("name"));
    let item = Person::new("ada");
    item.age.set(36);
    model.append(item.clone());
    let index = model.index(0);

    assert_eq!(model.data(&index, ItemRole::Display), ItemData::from("ada"));
    assert_eq!(model.data(&index, ItemRole::User(2)), ItemData::Int(36));
    assert_eq!(model.data(&index, ItemRole::User(42)), ItemData::None);
    assert_eq!(model.data(&ModelIndex::invalid(), ItemRole::Display), ItemData::None);

    let object = model.data(&index, ItemRole::OBJECT);
    assert!(
        object
            .downcast_object::<Person>()
            .is_some_and(|found| Arc::ptr_eq(&found, &item))
    );
}

#[test]
fn set_data_writes_through_the_item() {
    let model = ObjectListModel::<Person>::with_config(ModelConfig::new().with_display_role("name"));
    model.append(Person::new("a"));
    let index = model.index(0);
    let log = record(&model);

    assert!(model.set_data(&index, "b".into(), ItemRole::User(1)));
    assert!(model.set_data(&index, "c".into(), ItemRole::Display));
    assert!(model.set_data(&index, 7.into(), ItemRole::User(2)));
    assert_eq!(model.property(0, "name"), Ok(ItemData::from("c")));
    assert_eq!(model.role_value(0, "age"), Ok(ItemData::Int(7)));

    assert!(!model.set_data(&index, "x".into(), ItemRole::OBJECT));
    assert!(!model.set_data(&index, "not a number".into(), ItemRole::User(2)));
    assert!(!model.set_data(&index, 1.into(), ItemRole::User(99)));
    assert!(!model.set_data(&model.index(4), "x".into(), ItemRole::User(1)));

    // Only the notifying property reaches the view.
    let changes: Vec<_> = take(&log)
        .into_iter()
        .filter(|event| matches!(event, Event::DataChanged(..)))
        .collect();
    assert_eq!(changes.len(), 2);
}

#[test]
fn set_property_by_name() {
    let model = model_of(&["a"]);
    assert_eq!(model.set_property(0, "name", "b".into()), Ok(true));
    assert_eq!(model.set_property(0, "name", "b".into()), Ok(false));
    assert!(matches!(
        model.set_property(0, "age", "old".into()),
        Err(ObjlistError::Property(PropertyError::TypeMismatch { .. }))
    ));
    assert_eq!(
        model.set_property(1, "name", "c".into()),
        Err(ObjlistError::RowOutOfRange { row: 1, count: 1 })
    );
}

// =========================================================================
// Unique-id index
// =========================================================================

fn keyed_model() -> Arc<ObjectListModel<Person>> {
    ObjectListModel::<Person>::with_config(ModelConfig::new().with_uid_role("key"))
}

#[test]
fn uid_lookup_follows_changes() {
    let model = keyed_model();
    let item = Person::with_key("x", "a");
    model.append(Person::with_key("y", "other"));
    model.append(item.clone());

    assert_eq!(model.uid_role(), Some("key"));
    assert!(model.get_by_uid("a").is_some_and(|found| Arc::ptr_eq(&found, &item)));
    assert_eq!(model.index_of_uid("a"), Some(1));

    item.set_key("b");
    assert!(model.get_by_uid("a").is_none());
    assert!(model.get_by_uid("b").is_some_and(|found| Arc::ptr_eq(&found, &item)));

    model.remove(&item);
    assert!(model.get_by_uid("b").is_none());
    assert_eq!(model.index_of_uid("b"), None);
}

#[test]
fn uid_collision_last_indexed_wins() {
    let model = keyed_model();
    let first = Person::with_key("first", "same");
    let second = Person::with_key("second", "same");

    model.append(first.clone());
    model.append(second.clone());
    assert!(model.get_by_uid("same").is_some_and(|found| Arc::ptr_eq(&found, &second)));

    model.remove(&first);
    assert!(model.get_by_uid("same").is_some_and(|found| Arc::ptr_eq(&found, &second)));
}

#[test]
fn uid_lookup_without_index() {
    let model = model_of(&["a"]);
    assert_eq!(model.uid_role(), None);
    assert!(model.get_by_uid("a").is_none());

    let unknown = ObjectListModel::<Person>::with_config(ModelConfig::new().with_uid_role("nope"));
    assert_eq!(unknown.uid_role(), None);
}

// =========================================================================
// Ownership
// =========================================================================

#[test]
fn unparented_items_are_adopted() {
    let model = ObjectListModel::<Person>::new();
    let item = Person::new("a");
    model.append(item.clone());
    assert_eq!(item.base.parent(), Some(model.id()));

    let created = model.append_new();
    assert_eq!(created.base.parent(), Some(model.id()));
    let inserted = model.insert_new(0);
    assert!(model.first().is_some_and(|first| Arc::ptr_eq(&first, &inserted)));
}

#[test]
fn removal_defers_release_of_owned_items() {
    let model = ObjectListModel::<Person>::new();
    let item = Person::new("a");
    model.append(item.clone());
    let weak = Arc::downgrade(&item);
    drop(item);

    model.remove_at(0);
    assert!(model.has_pending_deletes());
    assert!(weak.upgrade().is_some(), "release waits for the idle point");

    assert_eq!(model.process_deferred_deletes(), 1);
    assert!(!model.has_pending_deletes());
    assert!(weak.upgrade().is_none());
}

#[test]
fn released_item_held_elsewhere_is_unparented() {
    let model = ObjectListModel::<Person>::new();
    let item = Person::new("a");
    model.append(item.clone());

    model.remove(&item);
    model.process_deferred_deletes();
    assert!(!item.base.has_parent());
}

#[test]
fn reinserted_item_stays_owned_across_the_drain() {
    let model = ObjectListModel::<Person>::new();
    let item = Person::new("a");
    model.append(item.clone());

    model.remove_at(0);
    model.append(item.clone());
    model.process_deferred_deletes();
    assert_eq!(item.base.parent(), Some(model.id()));

    model.remove_at(0);
    assert!(model.has_pending_deletes());
    assert!(!item.base.has_parent());
}

#[test]
fn item_moved_to_another_model_is_adopted_there() {
    let first = ObjectListModel::<Person>::new();
    let second = ObjectListModel::<Person>::new();
    let item = Person::new("a");
    first.append(item.clone());

    first.remove_at(0);
    second.append(item.clone());
    assert_eq!(item.base.parent(), Some(second.id()));

    first.process_deferred_deletes();
    assert_eq!(item.base.parent(), Some(second.id()));
    assert!(second.contains(&item));
}

#[test]
fn foreign_parented_items_are_not_released() {
    let model = ObjectListModel::<Person>::new();
    let owner = ObjectId::next();
    let item = Person::new("a");
    item.base.set_parent(Some(owner));

    model.append(item.clone());
    assert_eq!(item.base.parent(), Some(owner));

    model.remove_at(0);
    assert!(!model.has_pending_deletes());
    assert_eq!(item.base.parent(), Some(owner));
}

#[test]
fn dropping_the_model_releases_everything() {
    let item = Person::new("a");
    let weak_model = {
        let model = ObjectListModel::<Person>::new();
        model.append(item.clone());
        model.remove_at(0);
        model.append(Person::new("b"));
        Arc::downgrade(&model)
    };

    assert!(weak_model.upgrade().is_none());
    assert!(!item.base.has_parent());
    assert_eq!(item.name_changed.connection_count(), 0);
}
