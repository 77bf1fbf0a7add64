//! Entity schemas.
//!
//! A schema declares, per entity, which fields exist and how each one sorts,
//! which fields free-text search looks at, and which categorical filters are
//! offered together with their valid options. The comparator dispatches on
//! [`FieldKind`] instead of guessing from runtime values.

use std::fmt;

use crate::error::{Error, Result};
use crate::sort::{SortDirection, SortState};

/// Filter value meaning "no constraint on this field".
pub const ALL: &str = "all";

/// Fixed ordering for an enumerated field such as severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTable {
    /// Name shown in schema descriptions.
    pub name: &'static str,
    /// Known values and their rank, lowest first.
    pub ranks: &'static [(&'static str, u8)],
    /// Rank given to values not in the table.
    pub unknown: u8,
}

impl RankTable {
    /// Rank of `value`. Lookup ignores ASCII case.
    #[must_use]
    pub fn rank(&self, value: &str) -> u8 {
        self.ranks
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map_or(self.unknown, |(_, rank)| *rank)
    }

    /// The known values in rank order.
    pub fn values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ranks.iter().map(|(name, _)| *name)
    }
}

/// Severity and urgency ranking shared by incidents, alerts and help requests.
pub static SEVERITY: RankTable = RankTable {
    name: "severity",
    ranks: &[("Critical", 0), ("High", 1), ("Medium", 2), ("Low", 3)],
    unknown: 4,
};

/// How a field compares when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Lexicographic text comparison.
    Text,
    /// Numeric comparison; missing values count as zero.
    Numeric,
    /// Chronological comparison of timestamps or dates.
    Temporal,
    /// Fixed-rank lookup.
    Ranked(&'static RankTable),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Numeric => write!(f, "numeric"),
            Self::Temporal => write!(f, "temporal"),
            Self::Ranked(table) => write!(f, "ranked({})", table.name),
        }
    }
}

/// A field declared on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    /// How the field sorts.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Declare a text field.
    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
        }
    }

    /// Declare a numeric field.
    #[must_use]
    pub const fn numeric(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Numeric,
        }
    }

    /// Declare a timestamp or date field.
    #[must_use]
    pub const fn temporal(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Temporal,
        }
    }

    /// Declare a field ordered by a rank table.
    #[must_use]
    pub const fn ranked(name: &'static str, table: &'static RankTable) -> Self {
        Self {
            name,
            kind: FieldKind::Ranked(table),
        }
    }
}

/// A categorical filter and its valid options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    /// Field the filter constrains.
    pub key: &'static str,
    /// Values the filter may take besides [`ALL`].
    pub options: &'static [&'static str],
}

impl FilterSpec {
    /// Whether `value` is an option of this filter or the [`ALL`] sentinel.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        value == ALL || self.options.contains(&value)
    }
}

/// Everything the list pipeline needs to know about one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    /// Entity name, as used on the command line and for seed files.
    pub name: &'static str,
    /// Declared fields, in display order.
    pub fields: &'static [FieldSpec],
    /// Fields searched by the free-text query.
    pub searchable: &'static [&'static str],
    /// Categorical filters.
    pub filters: &'static [FilterSpec],
    /// Workflow field targeted by status transitions.
    pub status_field: Option<&'static str>,
    /// Sort applied when none is selected.
    pub default_sort: (&'static str, SortDirection),
}

impl EntitySchema {
    /// Look up a declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Sort kind of a field, or `None` if it is not declared.
    #[must_use]
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|f| f.kind)
    }

    /// Look up a field, failing if it is not declared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the field does not exist.
    pub fn require_field(&self, name: &str) -> Result<&FieldSpec> {
        self.field(name)
            .ok_or_else(|| Error::unknown_field(self.name, name))
    }

    /// Look up a categorical filter.
    #[must_use]
    pub fn filter(&self, key: &str) -> Option<&FilterSpec> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Valid statuses for status transitions. Empty if the entity has none.
    #[must_use]
    pub fn status_options(&self) -> &'static [&'static str] {
        self.status_field
            .and_then(|key| self.filter(key))
            .map(|spec| spec.options)
            .unwrap_or_default()
    }

    /// The sort applied when the user has not picked one.
    #[must_use]
    pub fn default_sort(&self) -> SortState {
        let (field, direction) = self.default_sort;
        SortState::new(field, direction)
    }
}
