//! Form inheritance: which form fields fall back to the base species, which
//! are stored explicitly, and which are written back out.
//!
//! A form record (`[PIKACHU,1]`) only stores the fields where it differs from
//! its species. Callers hand in the species collection explicitly through a
//! [`SpeciesIndex`]; nothing here reads global state or mutates species.

use std::collections::{HashMap, HashSet};

use log::warn;
use pbs_data::{Field, Record};

/// Every key a form may carry, in the order the form writer emits them.
pub const FORM_KEYS: [&str; 30] = [
    "FormName",
    "Types",
    "BaseStats",
    "BaseExp",
    "EVs",
    "CatchRate",
    "Happiness",
    "Abilities",
    "HiddenAbilities",
    "Moves",
    "TutorMoves",
    "EggMoves",
    "EggGroups",
    "HatchSteps",
    "Height",
    "Weight",
    "Color",
    "Shape",
    "Category",
    "Pokedex",
    "Generation",
    "WildItemCommon",
    "WildItemUncommon",
    "WildItemRare",
    "Evolutions",
    "PokedexForm",
    "MegaStone",
    "MegaMove",
    "MegaMessage",
    "UnmegaForm",
];

/// Form keys that never fall back to the species; blank means "not applicable".
pub const OWN_ONLY_KEYS: [&str; 6] = [
    "FormName",
    "PokedexForm",
    "MegaStone",
    "MegaMove",
    "MegaMessage",
    "UnmegaForm",
];

/// Species keys that mean nothing on a form.
pub const FORBIDDEN_KEYS: [&str; 4] = ["Name", "GenderRatio", "GrowthRate", "Incense"];

/// Keys the game engine overrides or inherits as a unit.
pub const OVERRIDE_GROUPS: [&[&str]; 2] = [
    &["Abilities", "HiddenAbilities"],
    &["WildItemCommon", "WildItemUncommon", "WildItemRare"],
];

pub fn is_form_key(key: &str) -> bool {
    FORM_KEYS.contains(&key)
}

pub fn is_inherited_key(key: &str) -> bool {
    is_form_key(key) && !OWN_ONLY_KEYS.contains(&key)
}

pub fn is_forbidden_key(key: &str) -> bool {
    FORBIDDEN_KEYS.contains(&key)
}

/// `(species, form)` pair encoded in a form record's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormKey {
    pub species: String,
    pub form: String,
}

impl FormKey {
    /// Split `PIKACHU,1`. An id without a comma is a species with an empty form.
    pub fn parse(id: &str) -> Self {
        match id.split_once(',') {
            Some((species, form)) => Self {
                species: species.trim().to_string(),
                form: form.trim().to_string(),
            },
            None => Self {
                species: id.trim().to_string(),
                form: String::new(),
            },
        }
    }

    pub fn to_id(&self) -> String {
        if self.form.is_empty() {
            self.species.clone()
        } else {
            format!("{},{}", self.species, self.form)
        }
    }
}

/// Read-only lookup into an already-loaded species collection.
#[derive(Debug, Default, Clone)]
pub struct SpeciesIndex<'a> {
    by_id: HashMap<&'a str, &'a Record>,
}

impl<'a> SpeciesIndex<'a> {
    /// Index species records by id. On duplicate ids the first record wins.
    pub fn new(species: &'a [Record]) -> Self {
        let mut by_id = HashMap::with_capacity(species.len());
        for rec in species {
            by_id.entry(rec.id.as_str()).or_insert(rec);
        }
        Self { by_id }
    }

    pub fn get(&self, species_id: &str) -> Option<&'a Record> {
        self.by_id.get(species_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Species value a form inherits for `key`; empty when the species or key
    /// is unknown or the key is not inheritable.
    pub fn baseline(&self, species_id: &str, key: &str) -> String {
        if !is_inherited_key(key) {
            return String::new();
        }
        self.get(species_id).map(|rec| species_value(rec, key)).unwrap_or_default()
    }
}

/// Read `key` from a species record, accepting the older split spellings for
/// types and hidden abilities.
fn species_value(species: &Record, key: &str) -> String {
    if let Some(v) = species.get(key) {
        return v.trim().to_string();
    }
    match key {
        "Types" => {
            let pair = [("Type1", "Type2"), ("PrimaryType", "SecondaryType")]
                .into_iter()
                .find(|(first, _)| species.get(first).is_some_and(|v| !v.trim().is_empty()));
            let Some((first, second)) = pair else {
                return String::new();
            };
            [species.get(first), species.get(second)]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join(",")
        },
        "HiddenAbilities" => species.get("HiddenAbility").map(|v| v.trim().to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Allow-listed keys stored more than once on `form`, each logged with
/// `warn!`. Only the first occurrence of such a key is ever read or written.
pub fn duplicate_form_keys(form: &Record) -> Vec<&'static str> {
    let dupes: Vec<&'static str> = FORM_KEYS
        .iter()
        .copied()
        .filter(|k| form.get_all(k).nth(1).is_some())
        .collect();
    for k in &dupes {
        warn!("form {} repeats {k}; only the first value is kept", form.id);
    }
    dupes
}

/// Expand a form as parsed from disk so every allow-listed key is present.
///
/// Stored values are kept, missing inherited keys take the species value and
/// missing own-only keys become empty. Keys outside the allow-list follow in
/// their original order. Repeated allow-listed keys keep their first value.
pub fn normalize_form(form: &Record, species: &SpeciesIndex<'_>) -> Record {
    duplicate_form_keys(form);
    let key = FormKey::parse(&form.id);
    let mut fields: Vec<Field> = FORM_KEYS
        .iter()
        .map(|&k| {
            let value = match form.get(k) {
                Some(v) => v.to_string(),
                None => species.baseline(&key.species, k),
            };
            Field::new(k, value)
        })
        .collect();
    fields.extend(form.fields.iter().filter(|f| !is_form_key(&f.key)).cloned());
    Record {
        id: form.id.clone(),
        order: form.order,
        source_file: form.source_file.clone(),
        fields,
    }
}

/// [`normalize_form`] over a whole collection, keeping input order.
pub fn normalize_forms(forms: &[Record], species: &SpeciesIndex<'_>) -> Vec<Record> {
    forms.iter().map(|form| normalize_form(form, species)).collect()
}

/// Reassign a form to `new_species`, discarding every inherited override and
/// recomputing it from the new species. Own-only and unknown keys survive.
pub fn reset_to_species(form: &mut Record, new_species: &str, species: &SpeciesIndex<'_>) {
    let mut key = FormKey::parse(&form.id);
    key.species = new_species.trim().to_string();
    form.id = key.to_id();
    form.fields.retain(|f| !is_inherited_key(&f.key));
    for k in FORM_KEYS.iter().copied().filter(|k| is_inherited_key(k)) {
        form.fields.push(Field::new(k, species.baseline(&key.species, k)));
    }
    *form = normalize_form(form, species);
}

/// Inherited keys the form overrides and must therefore write out, with
/// override groups expanded.
///
/// A key missing from the form counts as inherited. Values are compared
/// trimmed.
pub fn overridden_keys(form: &Record, species: &SpeciesIndex<'_>) -> HashSet<&'static str> {
    let key = FormKey::parse(&form.id);
    let mut out: HashSet<&'static str> = FORM_KEYS
        .iter()
        .copied()
        .filter(|k| is_inherited_key(k))
        .filter(|k| differs_from_baseline(form, &key.species, k, species))
        .collect();
    for group in OVERRIDE_GROUPS {
        if group.iter().any(|k| out.contains(k)) {
            out.extend(group.iter().copied());
        }
    }
    out
}

pub(crate) fn differs_from_baseline(form: &Record, species_id: &str, key: &str, species: &SpeciesIndex<'_>) -> bool {
    let baseline = species.baseline(species_id, key);
    form.get(key).is_some_and(|v| v.trim() != baseline.trim())
}

/// A forbidden key found on a form record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormWarning {
    pub form_id: String,
    pub key: String,
}

/// List forbidden keys present on any form, logging each one.
pub fn forbidden_key_warnings(forms: &[Record]) -> Vec<FormWarning> {
    let mut out = Vec::new();
    for form in forms {
        for field in form.fields.iter().filter(|f| is_forbidden_key(&f.key)) {
            warn!("form {} carries species-only key {}", form.id, field.key);
            out.push(FormWarning {
                form_id: form.id.clone(),
                key: field.key.clone(),
            });
        }
    }
    out
}

/// Remove forbidden keys from a form; returns how many fields were dropped.
pub fn strip_forbidden_keys(form: &mut Record) -> usize {
    let before = form.fields.len();
    form.fields.retain(|f| !is_forbidden_key(&f.key));
    before - form.fields.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charmander() -> Record {
        Record::new("CHARMANDER")
            .with_field("Name", "Charmander")
            .with_field("PrimaryType", "FIRE")
            .with_field("BaseStats", "39,52,43,65,60,50")
            .with_field("Abilities", "BLAZE")
            .with_field("HiddenAbilities", "SOLARPOWER")
            .with_field("WildItemCommon", "CHARCOAL")
    }

    #[test]
    fn key_classes_partition_the_allow_list() {
        assert_eq!(FORM_KEYS.iter().filter(|k| is_inherited_key(k)).count(), 24);
        assert!(OWN_ONLY_KEYS.iter().all(|k| is_form_key(k)));
        assert!(FORBIDDEN_KEYS.iter().all(|k| !is_form_key(k)));
        assert!(FORM_KEYS.ends_with(&["PokedexForm", "MegaStone", "MegaMove", "MegaMessage", "UnmegaForm"]));
    }

    #[test]
    fn form_key_round_trip() {
        let key = FormKey::parse("CHARMANDER, 2");
        assert_eq!(key.species, "CHARMANDER");
        assert_eq!(key.form, "2");
        assert_eq!(key.to_id(), "CHARMANDER,2");
        assert_eq!(FormKey::parse("MEW").to_id(), "MEW");
    }

    #[test]
    fn baseline_uses_legacy_type_keys() {
        let zubat = Record::new("ZUBAT").with_field("Type1", "POISON").with_field("Type2", "FLYING");
        let species = vec![charmander(), zubat];
        let index = SpeciesIndex::new(&species);
        assert_eq!(index.baseline("CHARMANDER", "Types"), "FIRE");
        assert_eq!(index.baseline("ZUBAT", "Types"), "POISON,FLYING");
        assert_eq!(index.baseline("CHARMANDER", "FormName"), "");
        assert_eq!(index.baseline("MISSINGNO", "Types"), "");
    }

    #[test]
    fn normalize_fills_inherited_and_blanks_own_only() {
        let species = vec![charmander()];
        let index = SpeciesIndex::new(&species);
        let raw = Record::new("CHARMANDER,1")
            .with_field("FormName", "Shiny Ember")
            .with_field("Types", "FIRE,DRAGON")
            .with_field("Habitat", "Mountain");
        let form = normalize_form(&raw, &index);
        assert_eq!(form.fields.len(), 31);
        assert_eq!(form.get("Types"), Some("FIRE,DRAGON"));
        assert_eq!(form.get("BaseStats"), Some("39,52,43,65,60,50"));
        assert_eq!(form.get("MegaStone"), Some(""));
        assert_eq!(form.fields.last().map(|f| f.key.as_str()), Some("Habitat"));
    }

    #[test]
    fn overrides_compare_trimmed_and_expand_groups() {
        let species = vec![charmander()];
        let index = SpeciesIndex::new(&species);
        let form = normalize_form(
            &Record::new("CHARMANDER,1")
                .with_field("Types", " FIRE ")
                .with_field("HiddenAbilities", "")
                .with_field("WildItemRare", "DRAGONSCALE"),
            &index,
        );
        let keys = overridden_keys(&form, &index);
        assert!(!keys.contains("Types"));
        assert!(keys.contains("Abilities"));
        assert!(keys.contains("HiddenAbilities"));
        assert!(keys.contains("WildItemCommon"));
        assert!(keys.contains("WildItemUncommon"));
        assert!(!keys.contains("BaseStats"));
    }

    #[test]
    fn reset_discards_overrides_but_keeps_own_fields() {
        let species = vec![
            charmander(),
            Record::new("SQUIRTLE").with_field("Types", "WATER").with_field("Abilities", "TORRENT"),
        ];
        let index = SpeciesIndex::new(&species);
        let mut form = normalize_form(
            &Record::new("CHARMANDER,1")
                .with_field("FormName", "Odd")
                .with_field("Types", "FIRE,GHOST"),
            &index,
        );
        form.order = 4;
        reset_to_species(&mut form, "SQUIRTLE", &index);
        assert_eq!(form.id, "SQUIRTLE,1");
        assert_eq!(form.order, 4);
        assert_eq!(form.get("Types"), Some("WATER"));
        assert_eq!(form.get("Abilities"), Some("TORRENT"));
        assert_eq!(form.get("BaseStats"), Some(""));
        assert_eq!(form.get("FormName"), Some("Odd"));
        assert!(overridden_keys(&form, &index).is_empty());
    }

    #[test]
    fn repeated_allow_listed_keys_keep_the_first_value() {
        let species = vec![charmander()];
        let index = SpeciesIndex::new(&species);
        let raw = Record::new("CHARMANDER,1")
            .with_field("Types", "FIRE,DRAGON")
            .with_field("Color", "Black")
            .with_field("Types", "WATER")
            .with_field("Habitat", "Cave")
            .with_field("Habitat", "Sea");
        assert_eq!(duplicate_form_keys(&raw), vec!["Types"]);

        let form = normalize_form(&raw, &index);
        assert_eq!(form.get_all("Types").collect::<Vec<_>>(), vec!["FIRE,DRAGON"]);
        // Keys outside the allow-list keep every occurrence.
        assert_eq!(form.get_all("Habitat").count(), 2);
    }

    #[test]
    fn forbidden_keys_reported_and_stripped() {
        let mut form = Record::new("MEW,1")
            .with_field("Name", "Mew")
            .with_field("GrowthRate", "Slow")
            .with_field("Types", "PSYCHIC");
        let warnings = forbidden_key_warnings(std::slice::from_ref(&form));
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].key, "Name");
        assert_eq!(strip_forbidden_keys(&mut form), 2);
        assert_eq!(form.fields.len(), 1);
    }
}
