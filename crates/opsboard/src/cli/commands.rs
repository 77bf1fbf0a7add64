//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::entities::EntityKind;
use crate::error::Result;
use crate::filter::FilterState;
use crate::pipeline::{ListQuery, Page};
use crate::record::Entity;
use crate::render::OutputFormat;
use crate::sort::{SortDirection, SortState};

/// Filter, sort and paging options shared by `list` and `apply`.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Free-text search across the entity's searchable fields
    #[arg(short = 'Q', long)]
    pub query: Option<String>,

    /// Categorical filter, e.g. `status=Active` (repeatable)
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Field to sort by (defaults to the entity's default sort)
    #[arg(short, long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Maximum number of rows (0 for all; defaults to the configured page size)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Number of matching rows to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ListArgs {
    /// Build the list query for entity `R`.
    ///
    /// Starts from the entity's initial state and applies the options on
    /// top. `--desc` without `--sort` flips the default sort field to
    /// descending.
    ///
    /// # Errors
    ///
    /// Returns an error if a `--filter` argument is not `KEY=VALUE`.
    pub fn to_query<R: Entity>(&self, default_limit: usize) -> Result<ListQuery> {
        let mut filter = FilterState::for_schema(R::schema());
        if let Some(query) = &self.query {
            filter.set_query(query.as_str());
        }
        for arg in &self.filters {
            let (key, value) = FilterState::parse_constraint(arg)?;
            filter.set_constraint(key, value);
        }

        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let sort = match &self.sort {
            Some(field) => SortState::new(field.as_str(), direction),
            None if self.desc => SortState::new(R::schema().default_sort.0, direction),
            None => R::schema().default_sort(),
        };

        Ok(ListQuery {
            filter,
            sort: Some(sort),
            page: Page::new(self.offset, self.limit.unwrap_or(default_limit)),
        })
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Entity to list
    #[arg(value_enum)]
    pub entity: EntityKind,

    /// Filter, sort and paging options
    #[command(flatten)]
    pub list: ListArgs,
}

/// Apply command arguments.
#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Entity the script mutates
    #[arg(value_enum)]
    pub entity: EntityKind,

    /// JSON mutation script
    pub script: PathBuf,

    /// Filter, sort and paging options for the resulting list
    #[command(flatten)]
    pub list: ListArgs,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Entity to summarize
    #[arg(value_enum)]
    pub entity: EntityKind,

    /// Field to count by (defaults to the status field, then the first filter)
    #[arg(short, long, value_name = "FIELD")]
    pub by: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Entities command arguments.
#[derive(Debug, Args)]
pub struct EntitiesCommand {
    /// Describe only this entity
    #[arg(value_enum)]
    pub entity: Option<EntityKind>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
