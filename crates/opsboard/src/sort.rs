//! Comparator sort stage.
//!
//! The comparator is chosen by the field's declared [`FieldKind`]: numbers
//! compare numerically, ranked enumerations by their rank table, timestamps
//! chronologically, and everything else as text. Missing values compare as
//! the empty string (or zero for numeric fields). Descending order reverses
//! the ascending comparison.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::record::{FieldValue, Record};
use crate::schema::{EntitySchema, FieldKind};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orient an ascending comparison result.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// The field and direction a list is ordered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Field to compare.
    pub field: String,
    /// Direction of the ordering.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// Create a sort state.
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Sort ascending by `field`.
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Sort descending by `field`.
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Column-header click: same field flips direction, a new field starts
    /// ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            field.clone_into(&mut self.field);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Check that the sort field is declared on the entity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownField`] if it is not.
    pub fn validate(&self, schema: &EntitySchema) -> Result<()> {
        schema.require_field(&self.field).map(|_| ())
    }

    /// Order `records` in place.
    ///
    /// Fields not declared on the schema fall back to text comparison.
    pub fn apply<R: Record>(&self, records: &mut [&R], schema: &EntitySchema) {
        let kind = schema.field_kind(&self.field).unwrap_or(FieldKind::Text);
        records.sort_by(|a, b| {
            let ordering = compare_values(kind, a.field(&self.field), b.field(&self.field));
            self.direction.apply(ordering)
        });
        trace!(
            entity = schema.name,
            field = %self.field,
            direction = %self.direction,
            "Sort applied"
        );
    }
}

/// Compare two possibly-missing field values as a field of `kind`.
///
/// This is a total order and never panics.
#[must_use]
pub fn compare_values(kind: FieldKind, a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
    if let FieldKind::Ranked(table) = kind {
        return table.rank(&text_or_empty(a)).cmp(&table.rank(&text_or_empty(b)));
    }

    match (a, b) {
        (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => x.total_cmp(&y),
        (Some(FieldValue::Timestamp(x)), Some(FieldValue::Timestamp(y))) => x.cmp(&y),
        (Some(FieldValue::Date(x)), Some(FieldValue::Date(y))) => x.cmp(&y),
        _ if kind == FieldKind::Numeric => number_or_zero(a).total_cmp(&number_or_zero(b)),
        _ => compare_text(&text_or_empty(a), &text_or_empty(b)),
    }
}

fn number_or_zero(value: Option<FieldValue<'_>>) -> f64 {
    value.and_then(|v| v.as_number()).unwrap_or(0.0)
}

fn text_or_empty(value: Option<FieldValue<'_>>) -> Cow<'_, str> {
    match value {
        Some(FieldValue::Text(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
        None => Cow::Borrowed(""),
    }
}

// Case-folded order, raw bytes break ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
