//! Record → text writers.
//!
//! Writers produce LF text; [`encode_for_disk`] applies the BOM and CRLF
//! endings every exported file carries.

mod encounters;
mod forms;
mod generic;
mod trainers;

pub use encounters::write_encounters;
pub use forms::write_forms;
pub use generic::write_records;
pub use trainers::write_trainers;

use pbs_data::{Provenance, RecordSet, ValidationError, validate_records};

use crate::FormatError;
use crate::forms::SpeciesIndex;
use crate::schema::{Schema, SchemaKind};

pub const FILE_HEADER: &str = "# See the documentation on the wiki to learn how to edit this file.";
pub const SEPARATOR: &str = "#-------------------------------";

const BOM: char = '\u{feff}';

/// Write `set` using `schema`'s writer.
///
/// `species` is only consulted for [`Schema::Forms`]; without it every
/// non-blank form field is treated as an override.
pub fn write_record_set(
    schema: Schema,
    set: &RecordSet,
    species: Option<&SpeciesIndex<'_>>,
) -> Result<String, FormatError> {
    match (schema.kind(), set) {
        (SchemaKind::Generic, RecordSet::Generic(records)) if schema == Schema::Forms => {
            let empty = SpeciesIndex::default();
            write_forms(records, species.unwrap_or(&empty))
        },
        (SchemaKind::Generic, RecordSet::Generic(records)) => write_records(schema, records),
        (SchemaKind::Encounters, RecordSet::Encounters(entries)) => write_encounters(entries),
        (SchemaKind::Trainers, RecordSet::Trainers(entries)) => write_trainers(entries),
        (_, other) => Err(FormatError::ShapeMismatch {
            schema,
            found: other.kind_name(),
        }),
    }
}

/// Prefix a byte-order mark and normalize every line ending to CRLF.
pub fn encode_for_disk(text: &str) -> String {
    let body = text.strip_prefix(BOM).unwrap_or(text).replace("\r\n", "\n");
    let mut out = String::with_capacity(body.len() + body.len() / 16 + 3);
    out.push(BOM);
    out.push_str(&body.replace('\n', "\r\n"));
    out
}

/// Reject empty collections and identity collisions before writing.
pub(crate) fn check_collection<T: Provenance>(kind: &'static str, records: &[T]) -> Result<(), FormatError> {
    if records.is_empty() {
        return Err(FormatError::EmptyRecordSet);
    }
    match validate_records(kind, records).into_iter().next() {
        None => Ok(()),
        Some(ValidationError::DuplicateId { kind, id }) => Err(FormatError::DuplicateIdentity { kind, key: id }),
        Some(ValidationError::EmptyId { kind, position }) => Err(FormatError::EmptyIdentity { kind, position }),
    }
}

/// Two-line banner that opens every file.
pub(crate) fn start_file() -> String {
    let mut out = String::new();
    push_line(&mut out, FILE_HEADER);
    push_line(&mut out, SEPARATOR);
    out
}

pub(crate) fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

pub(crate) fn push_field(out: &mut String, indent: &str, key: &str, value: &str) {
    out.push_str(indent);
    out.push_str(key);
    out.push_str(" = ");
    out.push_str(value);
    out.push('\n');
}
