use pbs_data::{DEFAULT_HAPPINESS, STAT_COUNT, TrainerEntry, TrainerPokemon, sorted_by_order};

use super::{SEPARATOR, check_collection, push_field, push_line, start_file};
use crate::FormatError;

const PROPERTY_INDENT: &str = "    ";

/// Write trainer rosters, leaving out properties that hold their default.
pub fn write_trainers(entries: &[TrainerEntry]) -> Result<String, FormatError> {
    check_collection("trainer", entries)?;
    let mut out = start_file();
    for trainer in sorted_by_order(entries) {
        push_line(&mut out, &trainer_header(trainer));
        if let Some(flags) = join_non_blank(&trainer.flags) {
            push_field(&mut out, "", "Flags", &flags);
        }
        if let Some(items) = join_non_blank(&trainer.items) {
            push_field(&mut out, "", "Items", &items);
        }
        let lose_text = trainer.lose_text.trim();
        if !lose_text.is_empty() {
            push_field(&mut out, "", "LoseText", lose_text);
        }
        for mon in &trainer.pokemon {
            write_pokemon(&mut out, mon);
        }
        push_line(&mut out, SEPARATOR);
    }
    Ok(out)
}

fn trainer_header(trainer: &TrainerEntry) -> String {
    if trainer.version == 0 {
        format!("[{},{}]", trainer.id, trainer.name)
    } else {
        format!("[{},{},{}]", trainer.id, trainer.name, trainer.version)
    }
}

fn write_pokemon(out: &mut String, mon: &TrainerPokemon) {
    let species = mon.pokemon_id.trim();
    let level = mon.level.trim();
    if level.is_empty() {
        push_field(out, "", "Pokemon", species);
    } else {
        push_field(out, "", "Pokemon", &format!("{species},{level}"));
    }
    for (key, value) in pokemon_properties(mon) {
        push_field(out, PROPERTY_INDENT, key, &value);
    }
}

/// Property lines in file order, defaults already dropped.
fn pokemon_properties(mon: &TrainerPokemon) -> Vec<(&'static str, String)> {
    let mut props: Vec<(&'static str, String)> = Vec::new();
    let mut text = |key: &'static str, value: &str| {
        let value = value.trim();
        if !value.is_empty() {
            props.push((key, value.to_string()));
        }
    };
    text("Name", &mon.name);
    text("Gender", &mon.gender);
    text("Shiny", flag_value(&mon.shiny));
    text("SuperShiny", flag_value(&mon.super_shiny));
    text("Shadow", flag_value(&mon.shadow));
    if let Some(moves) = join_non_blank(&mon.moves) {
        text("Moves", &moves);
    }
    text("Ability", &mon.ability);
    if mon.ability.trim().is_empty() {
        text("AbilityIndex", &mon.ability_index);
    }
    text("Item", &mon.item);
    text("Nature", &mon.nature);
    if let Some(ivs) = stat_line(&mon.ivs) {
        text("IV", &ivs);
    }
    if let Some(evs) = stat_line(&mon.evs) {
        text("EV", &evs);
    }
    if mon.happiness.trim() != DEFAULT_HAPPINESS {
        text("Happiness", &mon.happiness);
    }
    text("Ball", &mon.ball);
    props
}

/// `no` is the default for the boolean-ish flags, so it reads as blank.
fn flag_value(value: &str) -> &str {
    if value.trim().eq_ignore_ascii_case("no") { "" } else { value }
}

fn join_non_blank(values: &[String]) -> Option<String> {
    let kept: Vec<&str> = values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();
    if kept.is_empty() { None } else { Some(kept.join(",")) }
}

/// Six comma-separated stats with blanks written as `0`, or nothing when every
/// slot is blank.
fn stat_line(values: &[String]) -> Option<String> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return None;
    }
    let stats: Vec<&str> = (0..STAT_COUNT)
        .map(|i| values.get(i).map(|v| v.trim()).filter(|v| !v.is_empty()).unwrap_or("0"))
        .collect();
    Some(stats.join(","))
}
