//! `opsboard` - CLI for the disaster-operations list views
//!
//! Loads seed data for one entity, optionally applies a mutation script, and
//! prints the filtered, sorted and paged list.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;

use opsboard::cli::{Cli, Command, ConfigCommand, ListArgs};
use opsboard::render::{render_facets, render_list, render_schema, OutputFormat};
use opsboard::{
    facet_counts, init_logging, pipeline, seed, Config, Entity, EntityKind, EntityVisitor,
    RecordStore,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::List(cmd) => cmd.entity.visit(ListRun {
            config: &config,
            args: &cmd.list,
            script: None,
        }),
        Command::Apply(cmd) => cmd.entity.visit(ListRun {
            config: &config,
            args: &cmd.list,
            script: Some(cmd.script.as_path()),
        }),
        Command::Stats(cmd) => cmd.entity.visit(StatsRun {
            config: &config,
            by: cmd.by.as_deref(),
            format: cmd.format.unwrap_or(config.display.format),
        }),
        Command::Entities(cmd) => handle_entities(cmd.entity, cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Load, optionally mutate, and print one entity's list.
struct ListRun<'a> {
    config: &'a Config,
    args: &'a ListArgs,
    script: Option<&'a Path>,
}

impl EntityVisitor for ListRun<'_> {
    type Output = anyhow::Result<()>;

    fn visit<R: Entity>(self) -> Self::Output {
        let records = seed::load_records::<R>(self.config.seed_dir())?;
        let mut store = RecordStore::from_records(records, self.config.store.id_strategy)?;

        if let Some(path) = self.script {
            for mutation in seed::load_script::<R>(path)? {
                store
                    .apply(mutation)
                    .with_context(|| format!("applying {}", path.display()))?;
            }
        }

        let query = self.args.to_query::<R>(self.config.display.page_size)?;
        let view = pipeline::run_checked(store.records(), &query, self.config.pipeline.strict)?;

        let format = self.args.format.unwrap_or(self.config.display.format);
        let mut out = io::stdout().lock();
        render_list(&mut out, &view, format)?;
        out.flush()?;
        Ok(())
    }
}

/// Print facet counts for one entity field.
struct StatsRun<'a> {
    config: &'a Config,
    by: Option<&'a str>,
    format: OutputFormat,
}

impl EntityVisitor for StatsRun<'_> {
    type Output = anyhow::Result<()>;

    fn visit<R: Entity>(self) -> Self::Output {
        let schema = R::schema();
        let field = match self
            .by
            .or(schema.status_field)
            .or_else(|| schema.filters.first().map(|f| f.key))
        {
            Some(field) => field,
            None => bail!("{} has no categorical field; pass --by FIELD", schema.name),
        };
        schema.require_field(field)?;

        let records = seed::load_records::<R>(self.config.seed_dir())?;
        let counts = facet_counts(&records, field, schema);

        let mut out = io::stdout().lock();
        render_facets(&mut out, schema, field, &counts, self.format)?;
        out.flush()?;
        Ok(())
    }
}

fn handle_entities(only: Option<EntityKind>, json: bool) -> anyhow::Result<()> {
    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain
    };
    let kinds: Vec<EntityKind> = only.map_or_else(|| EntityKind::ALL.to_vec(), |kind| vec![kind]);

    let mut out = io::stdout().lock();
    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 && !json {
            writeln!(out)?;
        }
        render_schema(&mut out, kind.schema(), format)?;
    }
    out.flush()?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Pipeline]");
                println!("  Strict:             {}", config.pipeline.strict);
                println!();
                println!("[Store]");
                println!("  Id strategy:        {:?}", config.store.id_strategy);
                println!();
                println!("[Display]");
                println!("  Page size:          {}", config.display.page_size);
                println!("  Format:             {:?}", config.display.format);
                println!();
                println!("[Data]");
                match config.seed_dir() {
                    Some(dir) => println!("  Seed dir:           {}", dir.display()),
                    None => println!("  Seed dir:           (built-in seeds)"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
