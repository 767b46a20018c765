//! Text → record parsers.
//!
//! Every grammar is forgiving: malformed lines are dropped rather than
//! reported, so these functions never fail.

mod encounters;
mod generic;
mod lines;
mod trainers;

pub use encounters::{parse_encounters, split_form_suffix};
pub use generic::parse_records;
pub use trainers::parse_trainers;

use pbs_data::RecordSet;

use crate::schema::{Schema, SchemaKind};

/// Parse `source` with the grammar `schema` uses.
pub fn parse_schema(schema: Schema, source: &str) -> RecordSet {
    match schema.kind() {
        SchemaKind::Generic => RecordSet::Generic(parse_records(source)),
        SchemaKind::Encounters => RecordSet::Encounters(parse_encounters(source)),
        SchemaKind::Trainers => RecordSet::Trainers(parse_trainers(source)),
    }
}
