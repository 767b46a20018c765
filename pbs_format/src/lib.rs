//! pbs_format: reader and writer for Pokémon Essentials PBS text files.
//!
//! Three grammars cover every supported file:
//! - generic `[ID]` sections of `Key = Value` lines (types, moves, items, species, ...)
//! - encounter tables keyed by `[map,version]` with indented slot lines
//! - trainer rosters keyed by `[type,name,version]` with nested Pokémon blocks
//!
//! Parsing never fails; malformed lines are dropped. Writing validates the
//! collection first and produces deterministic text, which [`encode_for_disk`]
//! turns into the BOM + CRLF form Essentials ships with.

pub mod forms;
pub mod multi_file;
pub mod parser;
pub mod schema;
pub mod writer;

pub use forms::{FormKey, FormWarning, SpeciesIndex, normalize_form, normalize_forms, reset_to_species};
pub use multi_file::{OutputFile, SourceFile, export_record_set, merge_sources, split_by_source};
pub use parser::{parse_encounters, parse_records, parse_schema, parse_trainers, split_form_suffix};
pub use schema::{Schema, SchemaKind};
pub use writer::{encode_for_disk, write_encounters, write_forms, write_record_set, write_records, write_trainers};

use thiserror::Error;

/// Errors raised while writing or resolving schemas.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("cannot export an empty record set")]
    EmptyRecordSet,
    #[error("duplicate {kind} identity '{key}'")]
    DuplicateIdentity { kind: &'static str, key: String },
    #[error("{kind} at position {position} has an empty identity")]
    EmptyIdentity { kind: &'static str, position: usize },
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),
    #[error("record source '{file}' is not one of the {schema} files")]
    ForeignSourceFile { schema: Schema, file: String },
    #[error("schema {schema} cannot write {found} records")]
    ShapeMismatch { schema: Schema, found: &'static str },
}
