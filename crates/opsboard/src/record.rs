//! Core record abstractions.
//!
//! Every list-managed entity (incidents, personnel, lending items, ...) is a
//! [`Record`]: something with a unique string id and named fields. The list
//! pipeline only ever reaches into a record through [`Record::field`], so one
//! filter and one comparator serve every entity.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::schema::EntitySchema;

/// A borrowed view of a single field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Free or enumerated text.
    Text(&'a str),
    /// Counts, quantities, years of experience.
    Number(f64),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// A calendar date without time of day.
    Date(NaiveDate),
}

impl FieldValue<'_> {
    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Case-insensitive substring test. `needle` must already be lowercase.
    #[must_use]
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            Self::Text(s) => s.to_lowercase().contains(needle),
            other => other.to_string().to_lowercase().contains(needle),
        }
    }

    /// Exact, case-sensitive equality against a filter option.
    #[must_use]
    pub fn equals_option(&self, option: &str) -> bool {
        match self {
            Self::Text(s) => *s == option,
            other => other.to_string() == option,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M")),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// A list-managed record with a unique id and named fields.
pub trait Record {
    /// The record's id, unique within its store.
    fn id(&self) -> &str;

    /// Look up a field by its wire name (`"title"`, `"itemName"`, ...).
    ///
    /// Returns `None` for fields the record does not have.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// A concrete dashboard entity: a record with a static schema and seed data.
pub trait Entity: Record + Clone + Serialize + DeserializeOwned {
    /// The schema describing this entity's fields, filters and sort keys.
    fn schema() -> &'static EntitySchema;

    /// Replace the record's id. Only the store calls this, when adding.
    fn set_id(&mut self, id: String);

    /// Mutable access to the workflow status field, if the entity has one.
    fn status_mut(&mut self) -> Option<&mut String> {
        None
    }

    /// Static mock data the dashboard starts with.
    fn seed() -> Vec<Self>;
}

/// Check that every record has a non-empty id and that no id repeats.
///
/// # Errors
///
/// Returns [`Error::MissingId`] or [`Error::DuplicateId`] for the first
/// offending record.
pub fn validate_ids<R: Entity>(records: &[R]) -> Result<()> {
    let entity = R::schema().name;
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if id.is_empty() {
            return Err(Error::MissingId { entity });
        }
        if !seen.insert(id) {
            return Err(Error::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
