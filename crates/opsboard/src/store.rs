//! In-memory record store.
//!
//! A [`RecordStore`] owns the ordered records for one list. Every mutation
//! builds a new collection and swaps it in, bumps the revision counter, and
//! sends a confirmation to the store's [`Notifier`]. Nothing is persisted.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::record::{validate_ids, Entity, Record};

/// How new record ids are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Random UUID v4 strings.
    #[default]
    Uuid,
    /// Incrementing integers, continuing after the largest numeric id seen.
    ///
    /// Falls back to UUIDs once the integer range is used up.
    Sequential,
}

#[derive(Debug, Clone)]
enum IdGenerator {
    Uuid,
    /// `None` once `u64::MAX` has been handed out or seen.
    Sequential { next: Option<u64> },
}

impl IdGenerator {
    fn new<R: Record>(strategy: IdStrategy, existing: &[R]) -> Self {
        match strategy {
            IdStrategy::Uuid => Self::Uuid,
            IdStrategy::Sequential => {
                let max = existing
                    .iter()
                    .filter_map(|r| r.id().parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);
                Self::Sequential {
                    next: max.checked_add(1),
                }
            }
        }
    }

    fn next_id(&mut self) -> String {
        match self {
            Self::Uuid => Uuid::new_v4().to_string(),
            Self::Sequential { next } => match *next {
                Some(n) => {
                    *next = n.checked_add(1);
                    n.to_string()
                }
                None => {
                    debug!("sequential ids exhausted, using a uuid");
                    Uuid::new_v4().to_string()
                }
            },
        }
    }
}

/// A user-visible confirmation of a store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A record was added.
    Added {
        /// Entity name.
        entity: &'static str,
        /// Id assigned to the new record.
        id: String,
    },
    /// A record was replaced.
    Updated {
        /// Entity name.
        entity: &'static str,
        /// Id of the replaced record.
        id: String,
    },
    /// A record was removed.
    Deleted {
        /// Entity name.
        entity: &'static str,
        /// Id of the removed record.
        id: String,
    },
    /// A record moved to a new workflow status.
    StatusChanged {
        /// Entity name.
        entity: &'static str,
        /// Id of the record.
        id: String,
        /// The new status.
        status: String,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { entity, id } => write!(f, "Added {entity} record {id}"),
            Self::Updated { entity, id } => write!(f, "Updated {entity} record {id}"),
            Self::Deleted { entity, id } => write!(f, "Deleted {entity} record {id}"),
            Self::StatusChanged { entity, id, status } => {
                write!(f, "{entity} record {id} is now {status}")
            }
        }
    }
}

/// Receiver for mutation confirmations (the dashboard's toast area).
pub trait Notifier {
    /// Deliver one confirmation.
    fn notify(&self, notice: &Notice);
}

/// Notifier that writes confirmations to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        info!("{notice}");
    }
}

/// A store mutation, as read from a mutation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation<R> {
    /// Append a record under a freshly generated id.
    Add {
        /// The record; any id it carries is replaced.
        record: R,
    },
    /// Replace the record with the same id.
    Update {
        /// The replacement record.
        record: R,
    },
    /// Remove a record.
    Delete {
        /// Id of the record to remove.
        id: String,
    },
    /// Change a record's workflow status.
    SetStatus {
        /// Id of the record.
        id: String,
        /// The new status.
        status: String,
    },
}

/// Ordered, in-memory collection of one entity's records.
pub struct RecordStore<R> {
    records: Vec<R>,
    ids: IdGenerator,
    notifier: Box<dyn Notifier>,
    revision: u64,
}

impl<R> fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("len", &self.records.len())
            .field("ids", &self.ids)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<R: Entity> RecordStore<R> {
    /// An empty store.
    #[must_use]
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            records: Vec::new(),
            ids: IdGenerator::new::<R>(strategy, &[]),
            notifier: Box::new(TracingNotifier),
            revision: 0,
        }
    }

    /// A store holding `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if a record has an empty id or two records share one.
    pub fn from_records(records: Vec<R>, strategy: IdStrategy) -> Result<Self> {
        validate_ids(&records)?;
        debug!(entity = R::schema().name, count = records.len(), "Store seeded");
        Ok(Self {
            ids: IdGenerator::new(strategy, &records),
            records,
            notifier: Box::new(TracingNotifier),
            revision: 0,
        })
    }

    /// A store holding the entity's built-in mock data.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data has missing or duplicate ids.
    pub fn seeded(strategy: IdStrategy) -> Result<Self> {
        Self::from_records(R::seed(), strategy)
    }

    /// Builder: send confirmations to `notifier` instead of the log.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// The records, in store order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Whether a record with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Incremented by every mutation that changed the store.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append `record` under a new unique id and return that id.
    pub fn add(&mut self, mut record: R) -> String {
        let id = loop {
            let candidate = self.ids.next_id();
            if !self.contains(&candidate) {
                break candidate;
            }
        };
        record.set_id(id.clone());

        let mut next = std::mem::take(&mut self.records);
        next.push(record);
        self.commit(next, Notice::Added {
            entity: R::schema().name,
            id: id.clone(),
        });
        id
    }

    /// Replace the record with the same id as `record`.
    ///
    /// Does nothing and returns `false` if no record has that id.
    pub fn update(&mut self, record: R) -> bool {
        if !self.contains(record.id()) {
            debug!(entity = R::schema().name, id = record.id(), "Update ignored, no such record");
            return false;
        }
        let id = record.id().to_string();
        let mut replacement = Some(record);
        let next = std::mem::take(&mut self.records)
            .into_iter()
            .map(|existing| {
                if existing.id() == id {
                    replacement.take().unwrap_or(existing)
                } else {
                    existing
                }
            })
            .collect();
        self.commit(next, Notice::Updated {
            entity: R::schema().name,
            id,
        });
        true
    }

    /// Like [`update`](Self::update), but a missing id is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has the id.
    pub fn try_update(&mut self, record: R) -> Result<()> {
        let id = record.id().to_string();
        if self.update(record) {
            Ok(())
        } else {
            Err(Error::record_not_found(R::schema().name, id))
        }
    }

    /// Remove the record with `id`. Returns `false` if there was none.
    pub fn delete(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            debug!(entity = R::schema().name, id, "Delete ignored, no such record");
            return false;
        }
        let next = std::mem::take(&mut self.records)
            .into_iter()
            .filter(|r| r.id() != id)
            .collect();
        self.commit(next, Notice::Deleted {
            entity: R::schema().name,
            id: id.to_string(),
        });
        true
    }

    /// Move the record with `id` to `status`.
    ///
    /// Returns `Ok(false)` if there is no such record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoStatusField`] if the entity has no workflow status
    /// and [`Error::InvalidStatus`] if `status` is not one of its options.
    pub fn set_status(&mut self, id: &str, status: &str) -> Result<bool> {
        let schema = R::schema();
        if schema.status_field.is_none() {
            return Err(Error::NoStatusField {
                entity: schema.name,
            });
        }
        if !schema.status_options().contains(&status) {
            return Err(Error::InvalidStatus {
                entity: schema.name,
                status: status.to_string(),
            });
        }
        let Some(current) = self.get(id) else {
            debug!(entity = schema.name, id, "Status change ignored, no such record");
            return Ok(false);
        };

        let mut changed = current.clone();
        match changed.status_mut() {
            Some(field) => status.clone_into(field),
            None => {
                return Err(Error::NoStatusField {
                    entity: schema.name,
                })
            }
        }
        let next = std::mem::take(&mut self.records)
            .into_iter()
            .map(|existing| {
                if existing.id() == id {
                    changed.clone()
                } else {
                    existing
                }
            })
            .collect();
        self.commit(next, Notice::StatusChanged {
            entity: schema.name,
            id: id.to_string(),
            status: status.to_string(),
        });
        Ok(true)
    }

    /// Apply one scripted mutation.
    ///
    /// # Errors
    ///
    /// Only status changes can fail; see [`set_status`](Self::set_status).
    pub fn apply(&mut self, mutation: Mutation<R>) -> Result<()> {
        match mutation {
            Mutation::Add { record } => {
                self.add(record);
            }
            Mutation::Update { record } => {
                self.update(record);
            }
            Mutation::Delete { id } => {
                self.delete(&id);
            }
            Mutation::SetStatus { id, status } => {
                self.set_status(&id, &status)?;
            }
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<R>, notice: Notice) {
        self.records = next;
        self.revision += 1;
        debug!(
            entity = R::schema().name,
            revision = self.revision,
            len = self.records.len(),
            "Store updated"
        );
        self.notifier.notify(&notice);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::entities::{Contact, LendingItem};

    #[derive(Debug, Default, Clone)]
    struct RecordingNotifier(Rc<RefCell<Vec<Notice>>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.0.borrow_mut().push(notice.clone());
        }
    }

    fn item(id: &str, status: &str) -> LendingItem {
        LendingItem {
            id: id.to_string(),
            status: status.to_string(),
            ..LendingItem::default()
        }
    }

    fn two_items() -> RecordStore<LendingItem> {
        RecordStore::from_records(
            vec![item("1", "Active"), item("2", "Returned")],
            IdStrategy::Sequential,
        )
        .unwrap()
    }

    #[test]
    fn test_seeded_store() {
        let store = RecordStore::<LendingItem>::seeded(IdStrategy::Uuid).unwrap();
        assert_eq!(store.len(), LendingItem::seed().len());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RecordStore::<LendingItem>::new(IdStrategy::Uuid);
        assert!(store.is_empty());
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let result = RecordStore::from_records(
            vec![item("1", "Active"), item("1", "Returned")],
            IdStrategy::Uuid,
        );
        assert!(matches!(result, Err(Error::DuplicateId { .. })));
    }

    #[test]
    fn test_add_assigns_unique_id() {
        let mut store = two_items();
        let id = store.add(item("", "Active"));
        assert_eq!(id, "3");
        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[2].id, "3");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_add_replaces_supplied_id() {
        let mut store = two_items();
        let id = store.add(item("1", "Active"));
        assert_ne!(id, "1");
        assert!(validate_ids(store.records()).is_ok());
    }

    #[test]
    fn test_add_with_uuid() {
        let mut store = RecordStore::<LendingItem>::seeded(IdStrategy::Uuid).unwrap();
        let id = store.add(LendingItem::default());
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(store.contains(&id));
    }

    #[test]
    fn test_sequential_skips_past_numeric_ids() {
        let mut store = RecordStore::from_records(
            vec![item("7", "Active"), item("x-9", "Active")],
            IdStrategy::Sequential,
        )
        .unwrap();
        assert_eq!(store.add(LendingItem::default()), "8");
    }

    #[test]
    fn test_sequential_exhausted_falls_back_to_uuid() {
        let mut store = RecordStore::from_records(
            vec![item(&(u64::MAX - 1).to_string(), "Active")],
            IdStrategy::Sequential,
        )
        .unwrap();
        assert_eq!(store.add(LendingItem::default()), u64::MAX.to_string());

        let first = store.add(LendingItem::default());
        let second = store.add(LendingItem::default());
        assert!(Uuid::parse_str(&first).is_ok());
        assert!(Uuid::parse_str(&second).is_ok());
        assert_ne!(first, second);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_sequential_starts_exhausted_at_max_id() {
        let mut store = RecordStore::from_records(
            vec![item(&u64::MAX.to_string(), "Active")],
            IdStrategy::Sequential,
        )
        .unwrap();
        let id = store.add(LendingItem::default());
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(store.contains(&id));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = two_items();
        let mut changed = item("1", "Overdue");
        changed.borrower = "Shelter 4".to_string();
        assert!(store.update(changed));
        assert_eq!(store.records()[0].borrower, "Shelter 4");
        assert_eq!(store.records()[0].status, "Overdue");
        assert_eq!(store.records()[1].id, "2");
    }

    #[test]
    fn test_update_missing_is_noop() {
        let mut store = two_items();
        assert!(!store.update(item("99", "Active")));
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_try_update_missing_errors() {
        let mut store = two_items();
        let err = store.try_update(item("99", "Active")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_then_delete_again() {
        let mut store = two_items();
        assert!(store.delete("2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].id, "1");

        assert!(!store.delete("2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_set_status() {
        let mut store = two_items();
        assert!(store.set_status("1", "Returned").unwrap());
        assert_eq!(store.get("1").unwrap().status, "Returned");
    }

    #[test]
    fn test_set_status_missing_record() {
        let mut store = two_items();
        assert!(!store.set_status("42", "Returned").unwrap());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_set_status_invalid() {
        let mut store = two_items();
        let err = store.set_status("1", "Misplaced").unwrap_err();
        assert!(matches!(err, Error::InvalidStatus { .. }));
    }

    #[test]
    fn test_set_status_without_status_field() {
        let mut store = RecordStore::<Contact>::seeded(IdStrategy::Uuid).unwrap();
        let id = store.records()[0].id.clone();
        let err = store.set_status(&id, "Active").unwrap_err();
        assert!(matches!(err, Error::NoStatusField { .. }));
    }

    #[test]
    fn test_notifications() {
        let notifier = RecordingNotifier::default();
        let mut store = two_items().with_notifier(notifier.clone());

        let id = store.add(item("", "Active"));
        store.set_status(&id, "Overdue").unwrap();
        store.delete("1");
        store.delete("1");

        let notices = notifier.0.borrow();
        assert_eq!(notices.len(), 3);
        assert_eq!(
            notices[0],
            Notice::Added {
                entity: "lending",
                id: id.clone()
            }
        );
        assert_eq!(notices[1].to_string(), format!("lending record {id} is now Overdue"));
        assert_eq!(notices[2].to_string(), "Deleted lending record 1");
    }

    #[test]
    fn test_apply_script() {
        let script = r#"[
            {"op": "add", "record": {"itemName": "Generator", "status": "Active"}},
            {"op": "set_status", "id": "1", "status": "Overdue"},
            {"op": "delete", "id": "2"}
        ]"#;
        let mutations: Vec<Mutation<LendingItem>> = serde_json::from_str(script).unwrap();
        let mut store = two_items();
        for mutation in mutations {
            store.apply(mutation).unwrap();
        }
        let ids: Vec<_> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(store.get("1").unwrap().status, "Overdue");
        assert_eq!(store.get("3").unwrap().item_name, "Generator");
    }

    #[test]
    fn test_debug_output() {
        let store = two_items();
        let debug_str = format!("{store:?}");
        assert!(debug_str.contains("RecordStore"));
        assert!(debug_str.contains("len: 2"));
    }
}
