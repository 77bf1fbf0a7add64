//! Command-line interface for opsboard.
//!
//! This module provides the CLI structure for the `opsboard` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ApplyCommand, ConfigCommand, EntitiesCommand, ListArgs, ListCommand, StatsCommand,
};

/// opsboard - Filter, sort and page disaster-operations records
///
/// Lists incidents, personnel, resources, alerts, help requests, lending
/// records and contacts from seed data, with search, categorical filters and
/// type-aware sorting.
#[derive(Debug, Parser)]
#[command(name = "opsboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List records of an entity
    List(ListCommand),

    /// Apply a mutation script, then list the result
    Apply(ApplyCommand),

    /// Count records per value of a field
    Stats(StatsCommand),

    /// Describe entity schemas
    Entities(EntitiesCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
