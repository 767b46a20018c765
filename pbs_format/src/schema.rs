//! Registry of the PBS files the engine understands.

use std::fmt;
use std::str::FromStr;

use crate::FormatError;
use crate::forms::FORM_KEYS;

/// Which grammar a schema's files use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Generic,
    Encounters,
    Trainers,
}

/// A PBS file family, identified by its file stem (`moves` → `moves.txt`,
/// `moves_2.txt`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Schema {
    Types,
    Abilities,
    Moves,
    Items,
    BerryPlants,
    Ribbons,
    TrainerTypes,
    Species,
    Forms,
    Encounters,
    Trainers,
}

impl Schema {
    pub const ALL: [Schema; 11] = [
        Schema::Types,
        Schema::Abilities,
        Schema::Moves,
        Schema::Items,
        Schema::BerryPlants,
        Schema::Ribbons,
        Schema::TrainerTypes,
        Schema::Species,
        Schema::Forms,
        Schema::Encounters,
        Schema::Trainers,
    ];

    /// File stem, which doubles as the schema's name on the command line.
    pub fn file_stem(self) -> &'static str {
        match self {
            Schema::Types => "types",
            Schema::Abilities => "abilities",
            Schema::Moves => "moves",
            Schema::Items => "items",
            Schema::BerryPlants => "berry_plants",
            Schema::Ribbons => "ribbons",
            Schema::TrainerTypes => "trainer_types",
            Schema::Species => "pokemon",
            Schema::Forms => "pokemon_forms",
            Schema::Encounters => "encounters",
            Schema::Trainers => "trainers",
        }
    }

    /// Name of the file records default to when they carry no source tag.
    pub fn primary_file(self) -> String {
        format!("{}.txt", self.file_stem())
    }

    pub fn kind(self) -> SchemaKind {
        match self {
            Schema::Encounters => SchemaKind::Encounters,
            Schema::Trainers => SchemaKind::Trainers,
            _ => SchemaKind::Generic,
        }
    }

    /// Key order the writer emits. Structured schemas have none.
    pub fn canonical_keys(self) -> &'static [&'static str] {
        match self {
            Schema::Types => &[
                "Name",
                "IconPosition",
                "IsSpecialType",
                "IsPseudoType",
                "Weaknesses",
                "Resistances",
                "Immunities",
                "Flags",
            ],
            Schema::Abilities => &["Name", "Description", "Flags"],
            Schema::Moves => &[
                "Name",
                "Type",
                "Category",
                "Power",
                "Accuracy",
                "TotalPP",
                "Target",
                "Priority",
                "FunctionCode",
                "Flags",
                "EffectChance",
                "Description",
            ],
            Schema::Items => &[
                "Name",
                "NamePlural",
                "PortionName",
                "PortionNamePlural",
                "Pocket",
                "Price",
                "SellPrice",
                "BPPrice",
                "FieldUse",
                "BattleUse",
                "Flags",
                "Consumable",
                "ShowQuantity",
                "Move",
                "Description",
            ],
            Schema::BerryPlants => &["HoursPerStage", "DryingPerHour", "Yield"],
            Schema::Ribbons => &["Name", "IconPosition", "Description", "Flags"],
            Schema::TrainerTypes => &[
                "Name",
                "Gender",
                "BaseMoney",
                "SkillLevel",
                "Flags",
                "IntroBGM",
                "BattleBGM",
                "VictoryBGM",
            ],
            Schema::Species => &[
                "Name",
                "FormName",
                "Types",
                "BaseStats",
                "GenderRatio",
                "GrowthRate",
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
                "Incense",
                "Offspring",
                "Height",
                "Weight",
                "Color",
                "Shape",
                "Habitat",
                "Category",
                "Pokedex",
                "Generation",
                "Flags",
                "WildItemCommon",
                "WildItemUncommon",
                "WildItemRare",
                "Evolutions",
            ],
            Schema::Forms => &FORM_KEYS,
            Schema::Encounters | Schema::Trainers => &[],
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for Schema {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_end_matches(".txt");
        Schema::ALL
            .into_iter()
            .find(|schema| schema.file_stem().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FormatError::UnknownSchema(s.to_string()))
    }
}
