//! Schemas spread across `stem.txt` plus `stem_<suffix>.txt` continuations.
//!
//! Loading merges every file into one collection and tags each record with the
//! file it came from. Exporting splits on that tag again and writes one file
//! per group, each renumbered from zero.

use std::collections::BTreeMap;

use log::{debug, info};
use pbs_data::{Provenance, RecordSet, renumber};

use crate::FormatError;
use crate::forms::SpeciesIndex;
use crate::parser::parse_schema;
use crate::schema::Schema;
use crate::writer::{check_collection, encode_for_disk, write_record_set};

/// Essentials files whose names would otherwise look like continuations of a
/// shorter stem (`pokemon_forms.txt` vs `pokemon.txt`).
const OTHER_STEMS: &[&str] = &["pokemon_forms", "pokemon_metrics", "pokemon_server", "trainer_types", "berry_plants"];

/// Raw text of one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

/// Encoded contents of one output file (BOM + CRLF applied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub contents: String,
}

/// Whether `file_name` is the primary file or a continuation of `schema`.
///
/// Only bare file names qualify; anything carrying a path separator or drive
/// prefix is rejected.
pub fn belongs_to(schema: Schema, file_name: &str) -> bool {
    if file_name.contains(['/', '\\', ':']) {
        return false;
    }
    let stem = schema.file_stem();
    let Some(base) = file_name.strip_suffix(".txt") else {
        return false;
    };
    if base == stem {
        return true;
    }
    let Some(suffix) = base.strip_prefix(stem).and_then(|rest| rest.strip_prefix('_')) else {
        return false;
    };
    if suffix.is_empty() {
        return false;
    }
    !OTHER_STEMS
        .iter()
        .filter(|other| other.len() > stem.len())
        .any(|other| base == *other || base.starts_with(&format!("{other}_")))
}

/// Keep the names that belong to `schema`, primary first, continuations
/// sorted lexically.
pub fn order_source_names<S: AsRef<str>>(schema: Schema, names: &[S]) -> Vec<String> {
    let primary = schema.primary_file();
    let mut continuations: Vec<String> = names
        .iter()
        .map(|n| n.as_ref())
        .filter(|name: &&str| *name != primary && belongs_to(schema, name))
        .map(str::to_string)
        .collect();
    continuations.sort();
    continuations.dedup();
    let mut out = Vec::with_capacity(continuations.len() + 1);
    if names.iter().any(|n| n.as_ref() == primary) {
        out.push(primary);
    }
    out.extend(continuations);
    out
}

/// Stamp every record with the file it was read from.
pub fn tag_source<T: Provenance>(file_name: &str, records: &mut [T]) {
    for rec in records {
        rec.set_source_file(Some(file_name.to_string()));
    }
}

/// Parse every file of `schema` in `sources` into one tagged collection.
///
/// Files that do not belong to the schema are ignored. Each record keeps the
/// `order` it had inside its own file.
pub fn merge_sources(schema: Schema, sources: &[SourceFile]) -> RecordSet {
    let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
    let ordered = order_source_names(schema, &names);
    let file_count = ordered.len();
    let mut merged = parse_schema(schema, "");
    for name in ordered {
        let Some(source) = sources.iter().find(|s| s.name == name) else {
            continue;
        };
        let parsed = parse_schema(schema, &source.text);
        debug!("{}: {} records", name, parsed.len());
        append_tagged(&mut merged, parsed, &name);
    }
    info!("{schema}: merged {} records from {file_count} files", merged.len());
    merged
}

fn append_tagged(into: &mut RecordSet, parsed: RecordSet, file_name: &str) {
    match (into, parsed) {
        (RecordSet::Generic(all), RecordSet::Generic(mut more)) => {
            tag_source(file_name, &mut more);
            all.extend(more);
        },
        (RecordSet::Encounters(all), RecordSet::Encounters(mut more)) => {
            tag_source(file_name, &mut more);
            all.extend(more);
        },
        (RecordSet::Trainers(all), RecordSet::Trainers(mut more)) => {
            tag_source(file_name, &mut more);
            all.extend(more);
        },
        // parse_schema returns the same shape for the same schema.
        _ => {},
    }
}

/// Group records by source file (untagged records go to the primary file),
/// sort each group by `order` and renumber it densely.
///
/// Groups come back primary first, then by file name.
pub fn split_by_source<T: Provenance + Clone>(schema: Schema, records: &[T]) -> Vec<(String, Vec<T>)> {
    let primary = schema.primary_file();
    let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for rec in records {
        let file = rec.source_file().unwrap_or(&primary).to_string();
        let mut rec = rec.clone();
        rec.set_source_file(Some(file.clone()));
        groups.entry(file).or_default().push(rec);
    }
    let mut out: Vec<(String, Vec<T>)> = Vec::with_capacity(groups.len());
    if let Some(first) = groups.remove(&primary) {
        out.push((primary, first));
    }
    out.extend(groups);
    for (_, group) in &mut out {
        group.sort_by_key(Provenance::order);
        renumber(group);
    }
    out
}

/// Split `set` by source file and write each group with `schema`'s writer.
///
/// The whole set is checked for emptiness and identity collisions before any
/// file is produced.
pub fn export_record_set(
    schema: Schema,
    set: &RecordSet,
    species: Option<&SpeciesIndex<'_>>,
) -> Result<Vec<OutputFile>, FormatError> {
    match set {
        RecordSet::Generic(records) => {
            let kind = if schema == Schema::Forms { "form" } else { "record" };
            export_groups(schema, kind, records, RecordSet::Generic, species)
        },
        RecordSet::Encounters(entries) => export_groups(schema, "encounter", entries, RecordSet::Encounters, species),
        RecordSet::Trainers(entries) => export_groups(schema, "trainer", entries, RecordSet::Trainers, species),
    }
}

fn export_groups<T: Provenance + Clone>(
    schema: Schema,
    kind: &'static str,
    records: &[T],
    wrap: fn(Vec<T>) -> RecordSet,
    species: Option<&SpeciesIndex<'_>>,
) -> Result<Vec<OutputFile>, FormatError> {
    check_collection(kind, records)?;
    check_source_files(schema, records)?;
    let mut out = Vec::new();
    for (name, group) in split_by_source(schema, records) {
        let text = write_record_set(schema, &wrap(group), species)?;
        out.push(OutputFile {
            name,
            contents: encode_for_disk(&text),
        });
    }
    Ok(out)
}

/// Every tagged record must name a file of `schema` itself, so an export can
/// only ever produce that schema's files inside the output directory.
fn check_source_files<T: Provenance>(schema: Schema, records: &[T]) -> Result<(), FormatError> {
    match records
        .iter()
        .filter_map(Provenance::source_file)
        .find(|file| !belongs_to(schema, file))
    {
        Some(file) => Err(FormatError::ForeignSourceFile {
            schema,
            file: file.to_string(),
        }),
        None => Ok(()),
    }
}
