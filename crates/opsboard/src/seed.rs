//! Seed data and mutation scripts.
//!
//! A seed directory may hold `<entity>.json` files, each a JSON array of
//! records, that replace the built-in mock data for that entity. Mutation
//! scripts are JSON arrays of [`Mutation`] objects.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{validate_ids, Entity};
use crate::store::Mutation;

/// Path of the seed file for entity `R` inside `dir`.
#[must_use]
pub fn seed_path<R: Entity>(dir: &Path) -> PathBuf {
    dir.join(format!("{}.json", R::schema().name))
}

/// Initial records for entity `R`.
///
/// Reads `<seed_dir>/<entity>.json` when it exists, otherwise returns the
/// built-in seed.
///
/// # Errors
///
/// Returns [`Error::SeedLoad`] if the file cannot be read or parsed, or holds
/// records with missing or duplicate ids.
pub fn load_records<R: Entity>(seed_dir: Option<&Path>) -> Result<Vec<R>> {
    let Some(path) = seed_dir.map(seed_path::<R>).filter(|p| p.is_file()) else {
        return Ok(R::seed());
    };

    let records: Vec<R> = read_json(&path)?;
    validate_ids(&records).map_err(|err| Error::seed_load(&path, err.to_string()))?;
    debug!(path = %path.display(), count = records.len(), "Loaded seed file");
    Ok(records)
}

/// Read a mutation script for entity `R`.
///
/// # Errors
///
/// Returns [`Error::SeedLoad`] if the file cannot be read or parsed.
pub fn load_script<R: Entity>(path: &Path) -> Result<Vec<Mutation<R>>> {
    let script: Vec<Mutation<R>> = read_json(path)?;
    debug!(path = %path.display(), steps = script.len(), "Loaded mutation script");
    Ok(script)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|err| Error::seed_load(path, err.to_string()))?;
    serde_json::from_str(&text).map_err(|err| Error::seed_load(path, err.to_string()))
}
