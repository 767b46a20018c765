use pbs_data::{EncounterEntry, EncounterSlot, sorted_by_order};

use super::{SEPARATOR, check_collection, push_line, start_file};
use crate::FormatError;

const SLOT_INDENT: &str = "    ";

/// Write encounter tables. Incomplete slots (no chance, Pokémon or minimum
/// level) are left out, as are type blocks with a blank type together with
/// their slots.
pub fn write_encounters(entries: &[EncounterEntry]) -> Result<String, FormatError> {
    check_collection("encounter", entries)?;
    let mut out = start_file();
    for entry in sorted_by_order(entries) {
        push_line(&mut out, &map_header(entry));
        for block in entry.encounter_types.iter().filter(|b| !b.kind.trim().is_empty()) {
            let kind = block.kind.trim();
            let probability = block.probability.trim();
            if probability.is_empty() {
                push_line(&mut out, kind);
            } else {
                push_line(&mut out, &format!("{kind},{probability}"));
            }
            for line in block.slots.iter().filter_map(slot_line) {
                push_line(&mut out, &format!("{SLOT_INDENT}{line}"));
            }
        }
        push_line(&mut out, SEPARATOR);
    }
    Ok(out)
}

fn map_header(entry: &EncounterEntry) -> String {
    let mut header = if entry.version == 0 {
        format!("[{}]", entry.id)
    } else {
        format!("[{},{}]", entry.id, entry.version)
    };
    let name = entry.name.trim();
    if !name.is_empty() {
        header.push_str(" # ");
        header.push_str(name);
    }
    header
}

fn slot_line(slot: &EncounterSlot) -> Option<String> {
    let chance = slot.chance.trim();
    let pokemon = slot.pokemon.trim();
    let level_min = slot.level_min.trim();
    if chance.is_empty() || pokemon.is_empty() || level_min.is_empty() {
        return None;
    }
    let mut line = format!("{chance},{}", pokemon_token(pokemon, slot.form_number.trim()));
    line.push(',');
    line.push_str(level_min);
    let level_max = slot.level_max.trim();
    if !level_max.is_empty() {
        line.push(',');
        line.push_str(level_max);
    }
    Some(line)
}

/// Fold a non-zero numeric form back into the species token.
fn pokemon_token(pokemon: &str, form: &str) -> String {
    match form.parse::<u32>() {
        Ok(n) if n > 0 => format!("{pokemon}_{form}"),
        _ => pokemon.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbs_data::EncounterType;

    fn slot(chance: &str, pokemon: &str, form: &str, min: &str, max: &str) -> EncounterSlot {
        EncounterSlot {
            chance: chance.into(),
            pokemon: pokemon.into(),
            form_number: form.into(),
            level_min: min.into(),
            level_max: max.into(),
        }
    }

    #[test]
    fn writes_headers_types_and_slots() {
        let entry = EncounterEntry {
            id: "002".into(),
            version: 1,
            name: "Route 1".into(),
            encounter_types: vec![
                EncounterType {
                    kind: "Land".into(),
                    probability: "21".into(),
                    slots: vec![slot("20", "EEVEE", "2", "3", "5"), slot("10", "PIDGEY", "0", "3", "")],
                },
                EncounterType {
                    kind: "Water".into(),
                    probability: String::new(),
                    slots: vec![slot("60", "MAGIKARP", "", "", "10")],
                },
            ],
            ..EncounterEntry::default()
        };
        let text = write_encounters(&[entry]).unwrap();
        let body: Vec<_> = text.lines().skip(2).collect();
        assert_eq!(
            body,
            vec![
                "[002,1] # Route 1",
                "Land,21",
                "    20,EEVEE_2,3,5",
                "    10,PIDGEY,3",
                "Water",
                SEPARATOR,
            ]
        );
    }

    #[test]
    fn blank_type_block_dropped_with_its_slots() {
        let entry = EncounterEntry {
            id: "003".into(),
            encounter_types: vec![
                EncounterType {
                    kind: "Land".into(),
                    probability: "21".into(),
                    slots: vec![slot("100", "PIDGEY", "", "2", "")],
                },
                EncounterType {
                    kind: "  ".into(),
                    probability: "5".into(),
                    slots: vec![slot("100", "ZUBAT", "", "9", "")],
                },
            ],
            ..EncounterEntry::default()
        };
        let text = write_encounters(&[entry]).unwrap();
        let body: Vec<_> = text.lines().skip(2).collect();
        assert_eq!(body, vec!["[003]", "Land,21", "    100,PIDGEY,2", SEPARATOR]);
    }

    #[test]
    fn version_zero_and_no_name() {
        let entry = EncounterEntry {
            id: "010".into(),
            ..EncounterEntry::default()
        };
        assert_eq!(map_header(&entry), "[010]");
    }

    #[test]
    fn form_token_rules() {
        assert_eq!(pokemon_token("EEVEE", "2"), "EEVEE_2");
        assert_eq!(pokemon_token("EEVEE", "0"), "EEVEE");
        assert_eq!(pokemon_token("EEVEE", ""), "EEVEE");
        assert_eq!(pokemon_token("EEVEE", "x"), "EEVEE");
    }
}
