//! Shared fixtures for the list model integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use horizon_objlist::model::{ItemRole, ListAdapter, OwnershipPolicy};
use horizon_objlist::downcast_object;
use horizon_objlist::prelude::*;
use parking_lot::Mutex;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_objlist=trace,horizon_objlist_core=debug")
        .with_test_writer()
        .try_init();
}

#[derive(Default, ListItem)]
pub struct Person {
    pub base: ObjectBase,

    #[property(notify = "name_changed")]
    pub name: Property<String>,

    #[property]
    pub age: Property<i32>,

    #[property(notify = "key_changed")]
    pub key: Property<String>,

    #[signal]
    pub name_changed: Signal<String>,

    #[signal]
    pub key_changed: Signal<String>,
}

impl Person {
    pub fn new(name: &str) -> Arc<Self> {
        Self::with_key(name, "")
    }

    pub fn with_key(name: &str, key: &str) -> Arc<Self> {
        let person = Self::default();
        person.name.set(name.to_string());
        person.key.set(key.to_string());
        Arc::new(person)
    }

    pub fn set_name(&self, name: &str) {
        if self.name.set(name.to_string()) {
            self.name_changed.emit(name.to_string());
        }
    }

    pub fn set_key(&self, key: &str) {
        if self.key.set(key.to_string()) {
            self.key_changed.emit(key.to_string());
        }
    }
}

/// Everything a model reports, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AboutToInsert(String, usize),
    Inserted(String, usize),
    AboutToMove(String, usize, usize),
    Moved(String, usize, usize),
    AboutToRemove(String, usize),
    Removed(String, usize),
    Count(usize),
    BeginInsert(usize, usize),
    EndInsert(usize, usize),
    BeginRemove(usize, usize),
    EndRemove(usize, usize),
    BeginMove(usize, usize, usize),
    EndMove(usize, usize, usize),
    DataChanged(usize, Vec<ItemRole>),
}

pub type Log = Arc<Mutex<Vec<Event>>>;

fn name_of(item: &ObjectRef) -> String {
    downcast_object::<Person>(item)
        .map(|person| person.name.get())
        .unwrap_or_default()
}

/// Connect a recorder to every signal of the model.
pub fn record<P: OwnershipPolicy<Person>>(model: &ListAdapter<Person, P>) -> Log {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let domain = model.list_signals();
    let view = model.signals();

    let l = log.clone();
    domain
        .item_about_to_be_inserted
        .connect(move |(item, row)| l.lock().push(Event::AboutToInsert(name_of(item), *row)));
    let l = log.clone();
    domain
        .item_inserted
        .connect(move |(item, row)| l.lock().push(Event::Inserted(name_of(item), *row)));
    let l = log.clone();
    domain.item_about_to_be_moved.connect(move |(item, from, to)| {
        l.lock().push(Event::AboutToMove(name_of(item), *from, *to))
    });
    let l = log.clone();
    domain
        .item_moved
        .connect(move |(item, from, to)| l.lock().push(Event::Moved(name_of(item), *from, *to)));
    let l = log.clone();
    domain
        .item_about_to_be_removed
        .connect(move |(item, row)| l.lock().push(Event::AboutToRemove(name_of(item), *row)));
    let l = log.clone();
    domain
        .item_removed
        .connect(move |(item, row)| l.lock().push(Event::Removed(name_of(item), *row)));
    let l = log.clone();
    domain
        .count_changed
        .connect(move |count| l.lock().push(Event::Count(*count)));

    let l = log.clone();
    view.rows_about_to_be_inserted
        .connect(move |(first, last)| l.lock().push(Event::BeginInsert(*first, *last)));
    let l = log.clone();
    view.rows_inserted
        .connect(move |(first, last)| l.lock().push(Event::EndInsert(*first, *last)));
    let l = log.clone();
    view.rows_about_to_be_removed
        .connect(move |(first, last)| l.lock().push(Event::BeginRemove(*first, *last)));
    let l = log.clone();
    view.rows_removed
        .connect(move |(first, last)| l.lock().push(Event::EndRemove(*first, *last)));
    let l = log.clone();
    view.rows_about_to_be_moved.connect(move |(first, last, dest)| {
        l.lock().push(Event::BeginMove(*first, *last, *dest))
    });
    let l = log.clone();
    view.rows_moved.connect(move |(first, last, dest)| {
        l.lock().push(Event::EndMove(*first, *last, *dest))
    });
    let l = log.clone();
    view.data_changed.connect(move |(top_left, _, roles)| {
        l.lock()
            .push(Event::DataChanged(top_left.row(), roles.clone()))
    });

    log
}

/// Names of the model's items in row order.
pub fn names<P: OwnershipPolicy<Person>>(model: &ListAdapter<Person, P>) -> Vec<String> {
    model.iter().map(|person| person.name.get()).collect()
}

/// Drain the recorded events.
pub fn take(log: &Log) -> Vec<Event> {
    std::mem::take(&mut *log.lock())
}
