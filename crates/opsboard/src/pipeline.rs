//! The list-view pipeline: filter, then sort, then page.
//!
//! [`run`] is a pure function of the records and the [`ListQuery`]; it never
//! fails and re-running it with the same inputs gives the same output.
//! [`run_checked`] validates the query at the boundary first, which is where
//! programmer errors such as a misspelled sort field surface.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::filter::FilterState;
use crate::record::{validate_ids, Entity};
use crate::schema::EntitySchema;
use crate::sort::SortState;

/// Window into the ordered result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Number of leading matches to skip.
    pub offset: usize,
    /// Maximum number of matches to return. Zero means no limit.
    pub limit: usize,
}

impl Page {
    /// Create a page window.
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Everything, no window.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    fn window<T>(self, items: Vec<T>) -> Vec<T> {
        let rest = items.into_iter().skip(self.offset);
        if self.limit == 0 {
            rest.collect()
        } else {
            rest.take(self.limit).collect()
        }
    }
}

/// Full description of what a list should show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Search text and categorical constraints.
    pub filter: FilterState,
    /// Ordering. `None` keeps store order.
    pub sort: Option<SortState>,
    /// Window into the ordered result.
    pub page: Page,
}

impl ListQuery {
    /// The state a freshly opened list starts in for entity `R`: every
    /// filter at "all", the entity's default sort, no paging.
    #[must_use]
    pub fn for_entity<R: Entity>() -> Self {
        let schema = R::schema();
        Self {
            filter: FilterState::for_schema(schema),
            sort: Some(schema.default_sort()),
            page: Page::unlimited(),
        }
    }

    /// Check the query against the entity schema.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown filter key, a filter value
    /// outside the declared options, or an unknown sort field.
    pub fn validate(&self, schema: &EntitySchema) -> Result<()> {
        self.filter.validate(schema)?;
        if let Some(sort) = &self.sort {
            sort.validate(schema)?;
        }
        Ok(())
    }
}

/// The pipeline's output: one page of ordered records plus the match count.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a, R> {
    /// Records on this page, in display order.
    pub items: Vec<&'a R>,
    /// Number of records that matched the filter, before paging.
    pub total: usize,
    /// The window that produced `items`.
    pub page: Page,
}

impl<R> ListView<'_, R> {
    /// Number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Run the pipeline. Never fails; unknown fields degrade to empty values.
#[must_use]
pub fn run<'a, R: Entity>(records: &'a [R], query: &ListQuery) -> ListView<'a, R> {
    let schema = R::schema();
    let mut matched = query.filter.apply(records, schema);
    if let Some(sort) = &query.sort {
        sort.apply(&mut matched, schema);
    }
    let total = matched.len();
    let items = query.page.window(matched);
    debug!(
        entity = schema.name,
        records = records.len(),
        matched = total,
        shown = items.len(),
        "List pipeline run"
    );
    ListView {
        items,
        total,
        page: query.page,
    }
}

/// Validate ids and the query, then run the pipeline.
///
/// With `strict` set a validation failure is returned as an error. Otherwise
/// it is logged and the pipeline runs anyway.
///
/// # Errors
///
/// In strict mode, returns the first validation error found.
pub fn run_checked<'a, R: Entity>(
    records: &'a [R],
    query: &ListQuery,
    strict: bool,
) -> Result<ListView<'a, R>> {
    let checked = validate_ids(records).and_then(|()| query.validate(R::schema()));
    if let Err(err) = checked {
        if strict {
            return Err(err);
        }
        warn!(entity = R::schema().name, error = %err, "Invalid list query, continuing");
    }
    Ok(run(records, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Incident, Personnel};
    use crate::error::Error;
    use crate::sort::SortDirection;

    #[test]
    fn test_page_window() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(Page::new(1, 2).window(items.clone()), vec![2, 3]);
        assert_eq!(Page::new(3, 0).window(items.clone()), vec![4, 5]);
        assert_eq!(Page::new(10, 2).window(items.clone()), Vec::<i32>::new());
        assert_eq!(Page::unlimited().window(items), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_for_entity_defaults() {
        let query = ListQuery::for_entity::<Incident>();
        assert!(query.filter.is_unconstrained());
        assert_eq!(query.sort, Some(Incident::schema().default_sort()));
        assert_eq!(query.page, Page::unlimited());
        assert!(query.validate(Incident::schema()).is_ok());
    }

    #[test]
    fn test_run_reports_total_before_paging() {
        let records = Personnel::seed();
        let query = ListQuery {
            page: Page::new(0, 2),
            ..ListQuery::default()
        };
        let view = run(&records, &query);
        assert_eq!(view.total, records.len());
        assert_eq!(view.len(), 2);
        assert!(!view.is_empty());
    }

    #[test]
    fn test_run_filters_then_sorts() {
        let records = Personnel::seed();
        let query = ListQuery {
            filter: FilterState::new().with_constraint("status", "Available"),
            sort: Some(SortState::descending("experience")),
            page: Page::unlimited(),
        };
        let view = run(&records, &query);
        assert!(view.items.iter().all(|p| p.status == "Available"));
        let years: Vec<u32> = view.items.iter().map(|p| p.experience).collect();
        let mut expected = years.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(years, expected);
    }

    #[test]
    fn test_run_without_sort_keeps_store_order() {
        let records = Incident::seed();
        let view = run(&records, &ListQuery::default());
        let ids: Vec<_> = view.items.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_run_is_deterministic() {
        let records = Incident::seed();
        let query = ListQuery::for_entity::<Incident>();
        assert_eq!(run(&records, &query), run(&records, &query));
    }

    #[test]
    fn test_unknown_sort_field_degrades() {
        let records = Incident::seed();
        let query = ListQuery {
            sort: Some(SortState::new("colour", SortDirection::Descending)),
            ..ListQuery::default()
        };
        let view = run(&records, &query);
        assert_eq!(view.total, records.len());
    }

    #[test]
    fn test_run_checked_strict_rejects() {
        let records = Incident::seed();
        let query = ListQuery {
            sort: Some(SortState::ascending("colour")),
            ..ListQuery::default()
        };
        let err = run_checked(&records, &query, true).unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_run_checked_lenient_continues() {
        crate::logging::init_test_logging();
        let records = Incident::seed();
        let query = ListQuery {
            filter: FilterState::new().with_constraint("status", "Bogus"),
            ..ListQuery::default()
        };
        let view = run_checked(&records, &query, false).unwrap();
        assert_eq!(view.total, 0);
    }

    #[test]
    fn test_run_checked_strict_rejects_duplicate_ids() {
        let mut records = Incident::seed();
        records.push(records[0].clone());
        let err = run_checked(&records, &ListQuery::default(), true).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
    }

    #[test]
    fn test_run_checked_lenient_keeps_duplicate_ids() {
        crate::logging::init_test_logging();
        let mut records = Incident::seed();
        records.push(records[0].clone());
        let view = run_checked(&records, &ListQuery::default(), false).unwrap();
        assert_eq!(view.total, records.len());
    }

    #[test]
    fn test_list_query_serde() {
        let json = r#"{"filter": {"query": "flood"}, "sort": {"field": "severity"}}"#;
        let query: ListQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.filter.query, "flood");
        assert_eq!(query.sort, Some(SortState::ascending("severity")));
        assert_eq!(query.page, Page::unlimited());
    }
}
