//! Trainer rosters (`trainers.txt`).
//!
//! A `Pokemon = SPECIES,level` line switches every following property line to
//! that roster slot until the next `Pokemon =` line or trainer header.

use log::trace;
use pbs_data::{MOVE_SLOTS, STAT_COUNT, TrainerEntry, TrainerPokemon};

use super::lines::{content_lines, section_header, split_key_value, split_list};

/// Parse a trainer file into entries ordered as they appear.
pub fn parse_trainers(source: &str) -> Vec<TrainerEntry> {
    let mut out: Vec<TrainerEntry> = Vec::new();
    let mut current: Option<TrainerEntry> = None;

    for line in content_lines(source) {
        if let Some(inner) = section_header(line.text) {
            if let Some(done) = current.take() {
                out.push(done);
            }
            current = Some(trainer_from_header(inner, out.len()));
            continue;
        }
        let Some(trainer) = current.as_mut() else {
            trace!("line {}: dropped, no trainer section open", line.number);
            continue;
        };
        let Some((key, value)) = split_key_value(line.text) else {
            trace!("line {}: dropped, no '=' in {:?}", line.number, line.text);
            continue;
        };
        if key == "Pokemon" {
            let parts = split_list(value);
            let species = parts.first().cloned().unwrap_or_default();
            let level = parts.get(1).cloned().unwrap_or_default();
            trainer.pokemon.push(TrainerPokemon::new(species, level));
            continue;
        }
        match trainer.pokemon.last_mut() {
            Some(mon) => apply_pokemon_property(mon, key, value),
            None => apply_trainer_property(trainer, key, value),
        }
    }
    if let Some(done) = current {
        out.push(done);
    }
    out
}

fn trainer_from_header(inner: &str, order: usize) -> TrainerEntry {
    let mut parts = inner.split(',').map(str::trim);
    let id = parts.next().unwrap_or_default().to_string();
    let name = parts.next().unwrap_or_default().to_string();
    let version = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
    TrainerEntry {
        id,
        name,
        version,
        order,
        ..TrainerEntry::default()
    }
}

fn apply_trainer_property(trainer: &mut TrainerEntry, key: &str, value: &str) {
    match key {
        "Flags" => trainer.flags = split_list(value),
        "Items" => trainer.items = split_list(value),
        "LoseText" => trainer.lose_text = value.to_string(),
        other => trace!("trainer {}: ignoring unknown key {other}", trainer.id),
    }
}

fn apply_pokemon_property(mon: &mut TrainerPokemon, key: &str, value: &str) {
    let value_owned = value.to_string();
    match key {
        "Name" => mon.name = value_owned,
        "Gender" => mon.gender = value_owned,
        "Shiny" => mon.shiny = value_owned,
        "SuperShiny" => mon.super_shiny = value_owned,
        "Shadow" => mon.shadow = value_owned,
        "Moves" => mon.moves = fixed_slots(split_list(value), MOVE_SLOTS),
        "Ability" => mon.ability = value_owned,
        "AbilityIndex" => mon.ability_index = value_owned,
        "Item" => mon.item = value_owned,
        "Nature" => mon.nature = value_owned,
        "IV" => mon.ivs = stat_slots(value),
        "EV" => mon.evs = stat_slots(value),
        "Happiness" => mon.happiness = value_owned,
        "Ball" => mon.ball = value_owned,
        other => trace!("pokemon {}: ignoring unknown key {other}", mon.pokemon_id),
    }
}

/// Truncate or pad with blanks to exactly `len` entries.
fn fixed_slots(mut values: Vec<String>, len: usize) -> Vec<String> {
    values.resize(len, String::new());
    values
}

/// Six stat values; a single value stands for all six.
fn stat_slots(value: &str) -> Vec<String> {
    let values = split_list(value);
    if values.len() == 1 {
        return vec![values[0].clone(); STAT_COUNT];
    }
    fixed_slots(values, STAT_COUNT)
}
