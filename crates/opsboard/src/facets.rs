//! Per-option record counts for a categorical field.
//!
//! Dashboards show these as summary cards ("3 Active, 1 Overdue, ...").

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Record;
use crate::schema::EntitySchema;

/// Number of records holding one value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    /// The field value.
    pub value: String,
    /// How many records hold it.
    pub count: usize,
}

/// Count records per value of `field`.
///
/// If the schema declares a filter for `field`, every declared option is
/// listed in declaration order, including options with a zero count. Values
/// outside the declared options follow in sorted order. Records without the
/// field are not counted.
pub fn facet_counts<'a, R, I>(records: I, field: &str, schema: &EntitySchema) -> Vec<FacetCount>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        if let Some(value) = record.field(field) {
            *tally.entry(value.to_string()).or_default() += 1;
        }
    }

    let declared = schema.filter(field).map(|f| f.options).unwrap_or_default();
    let mut counts: Vec<FacetCount> = declared
        .iter()
        .map(|option| FacetCount {
            value: (*option).to_string(),
            count: tally.remove(*option).unwrap_or(0),
        })
        .collect();
    counts.extend(
        tally
            .into_iter()
            .map(|(value, count)| FacetCount { value, count }),
    );
    counts
}
