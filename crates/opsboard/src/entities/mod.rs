//! Dashboard entities.
//!
//! Each entity is a plain serde struct implementing [`Entity`], with a static
//! schema and a handful of mock records the dashboard starts from.

mod alert;
mod contact;
mod help_request;
mod incident;
mod lending;
mod personnel;
mod resource;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use alert::Alert;
pub use contact::Contact;
pub use help_request::HelpRequest;
pub use incident::Incident;
pub use lending::LendingItem;
pub use personnel::Personnel;
pub use resource::Resource;

use crate::record::Entity;
use crate::schema::EntitySchema;

/// Every list-managed entity on the dashboard.
///
/// On the command line the names are kebab-case (`help-requests`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Public warnings.
    Alerts,
    /// Reported incidents.
    Incidents,
    /// Responders and staff.
    Personnel,
    /// Stockpiled supplies.
    Resources,
    /// Equipment lent to partner organisations.
    Lending,
    /// Requests for assistance from the public.
    HelpRequests,
    /// Partner and agency contacts.
    Contacts,
}

/// Generic work to run against whichever entity an [`EntityKind`] names.
pub trait EntityVisitor {
    /// What the visit produces.
    type Output;

    /// Run against entity type `R`.
    fn visit<R: Entity>(self) -> Self::Output;
}

impl EntityKind {
    /// All entities, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Alerts,
        Self::Incidents,
        Self::Personnel,
        Self::Resources,
        Self::Lending,
        Self::HelpRequests,
        Self::Contacts,
    ];

    /// Dispatch `visitor` to the concrete record type.
    pub fn visit<V: EntityVisitor>(self, visitor: V) -> V::Output {
        match self {
            Self::Alerts => visitor.visit::<Alert>(),
            Self::Incidents => visitor.visit::<Incident>(),
            Self::Personnel => visitor.visit::<Personnel>(),
            Self::Resources => visitor.visit::<Resource>(),
            Self::Lending => visitor.visit::<LendingItem>(),
            Self::HelpRequests => visitor.visit::<HelpRequest>(),
            Self::Contacts => visitor.visit::<Contact>(),
        }
    }

    /// The entity's schema.
    #[must_use]
    pub fn schema(self) -> &'static EntitySchema {
        struct SchemaOf;
        impl EntityVisitor for SchemaOf {
            type Output = &'static EntitySchema;
            fn visit<R: Entity>(self) -> Self::Output {
                R::schema()
            }
        }
        self.visit(SchemaOf)
    }

    /// The entity name, as used for seed files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.schema().name
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seed timestamp helper. Invalid dates fall back to the Unix epoch.
pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Seed date helper. Invalid dates fall back to the Unix epoch.
pub(crate) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
