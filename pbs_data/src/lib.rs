//! Shared record model for PBS content files.

pub mod defs;
pub mod provenance;
pub mod validate;

pub use defs::*;
pub use provenance::{Provenance, move_record, renumber, sorted_by_order};
pub use validate::{ValidationError, validate_record_set, validate_records};
