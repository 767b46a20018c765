use serde::{Deserialize, Serialize};

/// Bracketed section name of a record, e.g. `PIKACHU` or `PIKACHU,1`.
pub type Id = String;

/// One `key = value` line of a generic section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub value: String,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A generic bracketed section.
///
/// Fields are an association list rather than a map: duplicate keys are kept
/// in the position they were read, and writers depend on that ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Id,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder used heavily by tests and the form resolver.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(key, value));
        self
    }

    /// First value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.key == key).map(|f| f.value.as_str())
    }

    /// Every value stored under `key`, in file order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields.iter().filter(move |f| f.key == key).map(|f| f.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    /// Overwrite the first occurrence of `key`, or append it when missing.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(Field::new(key, value)),
        }
    }

    /// Remove every occurrence of `key`; returns how many were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.fields.len();
        self.fields.retain(|f| f.key != key);
        before - self.fields.len()
    }
}

/// Map encounter table entry: one `[mapId]` / `[mapId,version]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterEntry {
    pub id: Id,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub encounter_types: Vec<EncounterType>,
}

/// One encounter method block (`Land`, `Water,2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterType {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub probability: String,
    #[serde(default)]
    pub slots: Vec<EncounterSlot>,
}

/// Weighted Pokémon choice inside an encounter block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSlot {
    #[serde(default)]
    pub chance: String,
    #[serde(default)]
    pub pokemon: String,
    #[serde(default)]
    pub form_number: String,
    #[serde(default)]
    pub level_min: String,
    #[serde(default)]
    pub level_max: String,
}

/// Trainer battle definition: `[id,name]` or `[id,name,version]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerEntry {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub lose_text: String,
    #[serde(default)]
    pub pokemon: Vec<TrainerPokemon>,
}

/// Number of move slots a trainer Pokémon carries.
pub const MOVE_SLOTS: usize = 4;
/// Number of stats in an `IV`/`EV` line.
pub const STAT_COUNT: usize = 6;

/// Stat labels in the order the file stores them.
pub const FILE_STAT_ORDER: [&str; STAT_COUNT] = ["HP", "Attack", "Defense", "Speed", "SpAtk", "SpDef"];

/// Stat labels in the order editors display them.
pub const DISPLAY_STAT_ORDER: [&str; STAT_COUNT] = ["HP", "Attack", "Defense", "SpAtk", "SpDef", "Speed"];

/// `DISPLAY_TO_FILE[d]` is the file slot holding display slot `d`.
pub const DISPLAY_TO_FILE: [usize; STAT_COUNT] = [0, 1, 2, 4, 5, 3];

/// One roster slot of a trainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainerPokemon {
    pub pokemon_id: String,
    pub level: String,
    pub name: String,
    pub gender: String,
    pub shiny: String,
    pub super_shiny: String,
    pub shadow: String,
    pub ability: String,
    pub ability_index: String,
    pub item: String,
    pub nature: String,
    pub happiness: String,
    pub ball: String,
    pub moves: Vec<String>,
    /// File order: HP, Attack, Defense, Speed, SpAtk, SpDef.
    pub ivs: Vec<String>,
    /// File order: HP, Attack, Defense, Speed, SpAtk, SpDef.
    pub evs: Vec<String>,
}

impl Default for TrainerPokemon {
    fn default() -> Self {
        Self {
            pokemon_id: String::new(),
            level: String::new(),
            name: String::new(),
            gender: String::new(),
            shiny: "no".to_string(),
            super_shiny: "no".to_string(),
            shadow: "no".to_string(),
            ability: String::new(),
            ability_index: String::new(),
            item: String::new(),
            nature: String::new(),
            happiness: DEFAULT_HAPPINESS.to_string(),
            ball: String::new(),
            moves: vec![String::new(); MOVE_SLOTS],
            ivs: vec![String::new(); STAT_COUNT],
            evs: vec![String::new(); STAT_COUNT],
        }
    }
}

/// Happiness a trainer Pokémon has when the file does not say otherwise.
pub const DEFAULT_HAPPINESS: &str = "70";

impl TrainerPokemon {
    pub fn new(pokemon_id: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            pokemon_id: pokemon_id.into(),
            level: level.into(),
            ..Self::default()
        }
    }

    /// IVs rearranged into display order.
    pub fn ivs_for_display(&self) -> Vec<String> {
        to_display_order(&self.ivs)
    }

    /// EVs rearranged into display order.
    pub fn evs_for_display(&self) -> Vec<String> {
        to_display_order(&self.evs)
    }

    pub fn set_ivs_from_display(&mut self, display: &[String]) {
        self.ivs = from_display_order(display);
    }

    pub fn set_evs_from_display(&mut self, display: &[String]) {
        self.evs = from_display_order(display);
    }
}

/// Rearrange a file-ordered stat list into display order. Missing slots are blank.
pub fn to_display_order(file_order: &[String]) -> Vec<String> {
    DISPLAY_TO_FILE
        .iter()
        .map(|&file_idx| file_order.get(file_idx).cloned().unwrap_or_default())
        .collect()
}

/// Inverse of [`to_display_order`].
pub fn from_display_order(display: &[String]) -> Vec<String> {
    let mut out = vec![String::new(); STAT_COUNT];
    for (display_idx, &file_idx) in DISPLAY_TO_FILE.iter().enumerate() {
        if let Some(v) = display.get(display_idx) {
            out[file_idx].clone_from(v);
        }
    }
    out
}

/// Collection payload exchanged with callers, tagged by record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "records", rename_all = "camelCase")]
pub enum RecordSet {
    Generic(Vec<Record>),
    Encounters(Vec<EncounterEntry>),
    Trainers(Vec<TrainerEntry>),
}

impl RecordSet {
    pub fn len(&self) -> usize {
        match self {
            RecordSet::Generic(v) => v.len(),
            RecordSet::Encounters(v) => v.len(),
            RecordSet::Trainers(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RecordSet::Generic(_) => "generic",
            RecordSet::Encounters(_) => "encounters",
            RecordSet::Trainers(_) => "trainers",
        }
    }
}
