use std::collections::HashSet;
use std::fmt;

use crate::{Provenance, RecordSet};

/// Structural problem found in a collection about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    EmptyId { kind: &'static str, position: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::EmptyId { kind, position } => {
                write!(f, "{kind} at position {position} has an empty id")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check identity-key uniqueness and non-empty ids across one collection.
///
/// ```
/// use pbs_data::{Record, validate_records};
///
/// let records = vec![Record::new("NORMAL"), Record::new("FIRE")];
/// assert!(validate_records("type", &records).is_empty());
///
/// let dupes = vec![Record::new("FIRE"), Record::new("FIRE")];
/// assert_eq!(validate_records("type", &dupes).len(), 1);
/// ```
pub fn validate_records<T: Provenance>(kind: &'static str, records: &[T]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (position, rec) in records.iter().enumerate() {
        let key = rec.identity_key();
        if key.split(',').next().is_none_or(|head| head.trim().is_empty()) {
            errors.push(ValidationError::EmptyId { kind, position });
            continue;
        }
        if !seen.insert(key.clone()) {
            errors.push(ValidationError::DuplicateId { kind, id: key });
        }
    }
    errors
}

/// [`validate_records`] over whichever shape the set holds.
pub fn validate_record_set(set: &RecordSet) -> Vec<ValidationError> {
    match set {
        RecordSet::Generic(records) => validate_records("record", records),
        RecordSet::Encounters(entries) => validate_records("encounter", entries),
        RecordSet::Trainers(entries) => validate_records("trainer", entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncounterEntry, Record, TrainerEntry};

    #[test]
    fn duplicate_generic_ids_reported_once_per_extra() {
        let records = vec![Record::new("A"), Record::new("A"), Record::new("A"), Record::new("B")];
        let errors = validate_records("record", &records);
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], ValidationError::DuplicateId { id, .. } if id == "A"));
    }

    #[test]
    fn encounter_versions_are_distinct_identities() {
        let a = EncounterEntry {
            id: "005".into(),
            ..EncounterEntry::default()
        };
        let b = EncounterEntry {
            version: 1,
            ..a.clone()
        };
        assert!(validate_record_set(&RecordSet::Encounters(vec![a.clone(), b])).is_empty());
        assert_eq!(validate_record_set(&RecordSet::Encounters(vec![a.clone(), a])).len(), 1);
    }

    #[test]
    fn trainer_identity_includes_name() {
        let a = TrainerEntry {
            id: "LASS".into(),
            name: "Ann".into(),
            ..TrainerEntry::default()
        };
        let b = TrainerEntry {
            name: "Beth".into(),
            ..a.clone()
        };
        assert!(validate_records("trainer", &[a, b]).is_empty());
    }

    #[test]
    fn empty_id_flagged() {
        let errors = validate_records("record", &[Record::new("  ")]);
        assert_eq!(errors, vec![ValidationError::EmptyId { kind: "record", position: 0 }]);
        assert_eq!(errors[0].to_string(), "record at position 0 has an empty id");
    }
}
