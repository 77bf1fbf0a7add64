//! `opsboard` - list views for a disaster-operations dashboard
//!
//! This library provides the filter, sort and paging pipeline behind the
//! dashboard's list pages, the in-memory record store those pages mutate,
//! and the entity schemas and seed data for each list.
//!
//! ```
//! use opsboard::entities::Incident;
//! use opsboard::{pipeline, Entity, FilterState, ListQuery};
//!
//! let records = Incident::seed();
//! let query = ListQuery {
//!     filter: FilterState::for_schema(Incident::schema()).with_query("flood"),
//!     ..ListQuery::for_entity::<Incident>()
//! };
//! let view = pipeline::run(&records, &query);
//! assert!(view.items.iter().all(|i| i.title.to_lowercase().contains("flood")
//!     || i.location.to_lowercase().contains("flood")
//!     || i.description.to_lowercase().contains("flood")));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod facets;
pub mod filter;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod schema;
pub mod seed;
pub mod sort;
pub mod store;

pub use config::Config;
pub use entities::{EntityKind, EntityVisitor};
pub use error::{Error, Result};
pub use facets::{facet_counts, FacetCount};
pub use filter::FilterState;
pub use logging::init_logging;
pub use pipeline::{ListQuery, ListView, Page};
pub use record::{Entity, FieldValue, Record};
pub use schema::{EntitySchema, FieldKind, ALL};
pub use sort::{SortDirection, SortState};
pub use store::{IdStrategy, Mutation, Notice, Notifier, RecordStore};
