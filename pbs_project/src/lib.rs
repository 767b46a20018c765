#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! Project layer for PBS editing: configuration, directory discovery and the
//! load/export workflow on top of `pbs_format`.

pub const PBS_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod data_paths;
pub mod store;

pub use config::{ProjectConfig, load_config};
pub use data_paths::{ProjectPaths, discover_schemas, schema_files};
pub use store::{FsStore, PartialWriteError, RecordSetReader, RecordSetWriter};

use anyhow::{Context, Result};
use log::info;
use pbs_data::{Record, RecordSet};
use pbs_format::forms::{FormWarning, forbidden_key_warnings, strip_forbidden_keys};
use pbs_format::{Schema, SpeciesIndex, export_record_set, normalize_forms};
use std::path::{Path, PathBuf};

/// Build a filesystem store for the project at `root`.
pub fn open_project(root: &Path, output: Option<&Path>) -> Result<FsStore> {
    let config = load_config(root);
    let paths = ProjectPaths::resolve(root, &config, output)?;
    Ok(FsStore::new(paths))
}

/// Load `schema`, merging split files. Forms come back normalized against the
/// project's species.
pub fn load(reader: &impl RecordSetReader, schema: Schema) -> Result<RecordSet> {
    let set = reader.read(schema).with_context(|| format!("loading {schema}"))?;
    if schema != Schema::Forms {
        return Ok(set);
    }
    match set {
        RecordSet::Generic(forms) => {
            let species = read_species(reader)?;
            let index = SpeciesIndex::new(&species);
            Ok(RecordSet::Generic(normalize_forms(&forms, &index)))
        },
        other => Ok(other),
    }
}

/// Split, serialize and write `set`. Returns the written paths.
pub fn export(
    reader: &impl RecordSetReader,
    writer: &impl RecordSetWriter,
    schema: Schema,
    set: &RecordSet,
) -> Result<Vec<PathBuf>> {
    let species = if schema == Schema::Forms { read_species(reader)? } else { Vec::new() };
    let index = SpeciesIndex::new(&species);
    let files = export_record_set(schema, set, Some(&index)).with_context(|| format!("exporting {schema}"))?;
    let written = writer.write(schema, &files)?;
    info!("{schema}: exported {} record(s)", set.len());
    Ok(written)
}

/// Species keys found on form records.
pub fn lint_forms(reader: &impl RecordSetReader) -> Result<Vec<FormWarning>> {
    match reader.read(Schema::Forms)? {
        RecordSet::Generic(forms) => Ok(forbidden_key_warnings(&forms)),
        _ => Ok(Vec::new()),
    }
}

/// Remove species keys from every form; returns the cleaned set and how many
/// fields were dropped.
pub fn strip_forms(reader: &impl RecordSetReader) -> Result<(RecordSet, usize)> {
    match load(reader, Schema::Forms)? {
        RecordSet::Generic(mut forms) => {
            let removed = forms.iter_mut().map(strip_forbidden_keys).sum();
            Ok((RecordSet::Generic(forms), removed))
        },
        other => Ok((other, 0)),
    }
}

fn read_species(reader: &impl RecordSetReader) -> Result<Vec<Record>> {
    match reader.read(Schema::Species).context("loading species for form inheritance")? {
        RecordSet::Generic(species) => Ok(species),
        _ => Ok(Vec::new()),
    }
}
