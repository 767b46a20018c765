//! Map encounter tables (`encounters.txt`).
//!
//! ```text
//! [002,1] # Route 1 (night)
//! Land,21
//!     20,RATTATA,3,5
//!     10,ORICORIO_2,4
//! ```
//!
//! Unlike the generic grammar, text after `#` on a header line is the map's
//! name rather than a comment.

use log::trace;
use pbs_data::{EncounterEntry, EncounterSlot, EncounterType};

use super::lines::{content_lines, is_all_digits};

/// Parse an encounter file into entries ordered as they appear.
pub fn parse_encounters(source: &str) -> Vec<EncounterEntry> {
    let mut out: Vec<EncounterEntry> = Vec::new();
    let mut current: Option<EncounterEntry> = None;

    for line in content_lines(source) {
        if let Some((inner, name)) = encounter_header(line.text) {
            if let Some(done) = current.take() {
                out.push(done);
            }
            let (id, version) = split_map_id(inner);
            current = Some(EncounterEntry {
                id,
                version,
                name,
                order: out.len(),
                source_file: None,
                encounter_types: Vec::new(),
            });
            continue;
        }
        if line.text.starts_with('[') {
            trace!("line {}: dropped, malformed map header", line.number);
            continue;
        }
        let Some(entry) = current.as_mut() else {
            trace!("line {}: dropped, no map section open", line.number);
            continue;
        };
        let parts: Vec<&str> = line.text.split(',').map(str::trim).collect();
        if is_all_digits(parts[0]) {
            match entry.encounter_types.last_mut() {
                Some(block) => block.slots.push(parse_slot(&parts)),
                None => trace!("line {}: slot before any encounter type dropped", line.number),
            }
        } else {
            entry.encounter_types.push(EncounterType {
                kind: parts[0].to_string(),
                probability: parts.get(1).map(|s| (*s).to_string()).unwrap_or_default(),
                slots: Vec::new(),
            });
        }
    }
    if let Some(done) = current {
        out.push(done);
    }
    out
}

/// `[inner]` optionally followed by `# name`.
fn encounter_header(line: &str) -> Option<(&str, String)> {
    let rest = line.strip_prefix('[')?;
    let close = rest.find(']')?;
    let inner = rest[..close].trim();
    if inner.is_empty() {
        return None;
    }
    let tail = rest[close + 1..].trim();
    let name = if tail.is_empty() {
        String::new()
    } else {
        tail.strip_prefix('#')?.trim().to_string()
    };
    Some((inner, name))
}

/// `002` or `002,1`; an unreadable version counts as 0.
fn split_map_id(inner: &str) -> (String, u32) {
    match inner.split_once(',') {
        Some((id, version)) => (id.trim().to_string(), version.trim().parse().unwrap_or(0)),
        None => (inner.to_string(), 0),
    }
}

fn parse_slot(parts: &[&str]) -> EncounterSlot {
    let field = |i: usize| parts.get(i).map(|s| (*s).to_string()).unwrap_or_default();
    let (pokemon, form_number) = split_form_suffix(parts.get(1).copied().unwrap_or_default());
    EncounterSlot {
        chance: field(0),
        pokemon,
        form_number,
        level_min: field(2),
        level_max: field(3),
    }
}

/// Split `EEVEE_2` into `("EEVEE", "2")`. Tokens without a trailing
/// `_<digits>` group come back whole with an empty form.
///
/// A species id that itself ends in `_<digits>` cannot be told apart from a
/// form suffix; the format has no escape for it.
pub fn split_form_suffix(token: &str) -> (String, String) {
    if let Some((species, form)) = token.rsplit_once('_')
        && !species.is_empty()
        && is_all_digits(form)
    {
        return (species.to_string(), form.to_string());
    }
    (token.to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# See the documentation on the wiki to learn how to edit this file.
#-------------------------------
[002] # Route 1
Land,21
    20,RATTATA,3,5
    20,PIDGEY,3
#-------------------------------
[002,1] # Route 1 (night)
LandNight
    50,HOOTHOOT,4,6
Water
    60,EEVEE_2,10,20
";

    #[test]
    fn parses_maps_types_and_slots() {
        let entries = parse_encounters(SAMPLE);
        assert_eq!(entries.len(), 2);

        let day = &entries[0];
        assert_eq!((day.id.as_str(), day.version, day.name.as_str()), ("002", 0, "Route 1"));
        assert_eq!(day.encounter_types[0].kind, "Land");
        assert_eq!(day.encounter_types[0].probability, "21");
        assert_eq!(day.encounter_types[0].slots.len(), 2);
        assert_eq!(day.encounter_types[0].slots[1].level_max, "");

        let night = &entries[1];
        assert_eq!(night.version, 1);
        assert_eq!(night.order, 1);
        assert_eq!(night.encounter_types.len(), 2);
        assert_eq!(night.encounter_types[0].probability, "");
        let eevee = &night.encounter_types[1].slots[0];
        assert_eq!((eevee.pokemon.as_str(), eevee.form_number.as_str()), ("EEVEE", "2"));
    }

    #[test]
    fn slot_before_type_is_dropped() {
        let entries = parse_encounters("[010]\n10,ZUBAT,5\nCave\n10,ZUBAT,5\n");
        assert_eq!(entries[0].encounter_types.len(), 1);
        assert_eq!(entries[0].encounter_types[0].slots.len(), 1);
    }

    #[test]
    fn header_variants() {
        assert_eq!(encounter_header("[003]"), Some(("003", String::new())));
        assert_eq!(encounter_header("[003,2] #  Cave "), Some(("003,2", "Cave".to_string())));
        assert_eq!(encounter_header("[003] trailing"), None);
        assert_eq!(split_map_id("003,x"), ("003".to_string(), 0));
    }

    #[test]
    fn form_suffix_split() {
        assert_eq!(split_form_suffix("EEVEE_2"), ("EEVEE".into(), "2".into()));
        assert_eq!(split_form_suffix("EEVEE"), ("EEVEE".into(), String::new()));
        assert_eq!(split_form_suffix("MR_MIME"), ("MR_MIME".into(), String::new()));
        assert_eq!(split_form_suffix("MR_MIME_1"), ("MR_MIME".into(), "1".into()));
        assert_eq!(split_form_suffix("_3"), ("_3".into(), String::new()));
    }
}
