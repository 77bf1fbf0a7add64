//! Predicate filter stage.
//!
//! A [`FilterState`] holds the free-text query and the categorical
//! constraints a user has selected. Applying it keeps records that match the
//! query on at least one searchable field and satisfy every constraint that
//! is not the [`ALL`] sentinel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::{EntitySchema, ALL};

/// Current search text and categorical selections for one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Free-text query. Empty matches everything.
    pub query: String,
    /// Filter key to selected value. [`ALL`] means unconstrained.
    pub constraints: BTreeMap<String, String>,
}

impl FilterState {
    /// An empty filter state: no query, no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The initial state for an entity: every declared filter set to [`ALL`].
    #[must_use]
    pub fn for_schema(schema: &EntitySchema) -> Self {
        Self {
            query: String::new(),
            constraints: schema
                .filters
                .iter()
                .map(|f| (f.key.to_string(), ALL.to_string()))
                .collect(),
        }
    }

    /// Builder: set the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Builder: select a value for a filter key.
    #[must_use]
    pub fn with_constraint(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_constraint(key, value);
        self
    }

    /// Replace the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select a value for a filter key.
    pub fn set_constraint(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.constraints.insert(key.into(), value.into());
    }

    /// Clear the query and set every constraint back to [`ALL`].
    pub fn reset(&mut self) {
        self.query.clear();
        for value in self.constraints.values_mut() {
            ALL.clone_into(value);
        }
    }

    /// Constraints that actually restrict the result.
    pub fn active_constraints(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constraints
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// True when applying this state cannot remove anything.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_empty() && self.active_constraints().next().is_none()
    }

    /// Parse a `key=value` command-line constraint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterSyntax`] if there is no `=` or the key is empty.
    pub fn parse_constraint(arg: &str) -> Result<(String, String)> {
        match arg.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(Error::FilterSyntax(arg.to_string())),
        }
    }

    /// Check every constraint against the entity schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFilter`] for a key the schema does not declare
    /// and [`Error::InvalidFilterValue`] for a value that is neither an
    /// option nor [`ALL`].
    pub fn validate(&self, schema: &EntitySchema) -> Result<()> {
        for (key, value) in &self.constraints {
            let spec = schema.filter(key).ok_or_else(|| Error::UnknownFilter {
                entity: schema.name,
                key: key.clone(),
            })?;
            if !spec.accepts(value) {
                return Err(Error::InvalidFilterValue {
                    key: key.clone(),
                    value: value.clone(),
                    expected: spec.options.join(", "),
                });
            }
        }
        Ok(())
    }

    /// Whether a single record passes this filter.
    #[must_use]
    pub fn matches<R: Record>(&self, record: &R, schema: &EntitySchema) -> bool {
        let needle = self.query.to_lowercase();
        self.matches_prepared(record, schema.searchable, &needle)
    }

    fn matches_prepared<R: Record>(&self, record: &R, searchable: &[&str], needle: &str) -> bool {
        let query_ok = needle.is_empty()
            || searchable
                .iter()
                .filter_map(|name| record.field(name))
                .any(|value| value.contains_lowercase(needle));

        query_ok
            && self.active_constraints().all(|(key, expected)| {
                record
                    .field(key)
                    .is_some_and(|value| value.equals_option(expected))
            })
    }

    /// Apply the filter, keeping the input order.
    pub fn apply<'a, R, I>(&self, records: I, schema: &EntitySchema) -> Vec<&'a R>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let needle = self.query.to_lowercase();
        let kept: Vec<&R> = records
            .into_iter()
            .filter(|record| self.matches_prepared(*record, schema.searchable, &needle))
            .collect();
        trace!(
            entity = schema.name,
            query = %self.query,
            kept = kept.len(),
            "Filter applied"
        );
        kept
    }
}
