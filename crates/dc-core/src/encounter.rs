//! Encounter types and encounter instances.
//!
//! An [`EncounterType`] is a catalog entry: a name, a threat weight, a
//! species tag, and the [`EncounterKind`] that selects its resolution rules.
//! An [`Encounter`] is one occurrence of a type inside a dungeon.

use serde::{Deserialize, Serialize};

use crate::catalog::Named;

/// Species tag used to group encounter types for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Goblins and their chieftains.
    Goblin,
    /// Orcs, warlords, and shamans.
    Orc,
    /// Animals; wild empathy applies to some.
    Beast,
    /// Skeletons, zombies, ghosts.
    Undead,
    /// Solitary boss monsters.
    Boss,
    /// Traps and puzzles countered by a class.
    Trap,
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goblin => write!(f, "Goblin"),
            Self::Orc => write!(f, "Orc"),
            Self::Beast => write!(f, "Beast"),
            Self::Undead => write!(f, "Undead"),
            Self::Boss => write!(f, "Boss"),
            Self::Trap => write!(f, "Trap"),
        }
    }
}

/// The closed set of resolution behaviors.
///
/// Each variant maps to exactly one damage formula in the resolution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    /// A band of goblin archers.
    Goblins,
    /// The goblin leader.
    GoblinChieftain,
    /// A wolf pack.
    Wolves,
    /// An orc war band.
    Orcs,
    /// The orc leader.
    OrcWarlord,
    /// An orc spellcaster.
    OrcShaman,
    /// Animated skeletons.
    Skeletons,
    /// Shambling zombies.
    Zombies,
    /// Restless spirits.
    Ghosts,
    /// A petrifying reptile.
    Basilisk,
    /// An undead sorcerer.
    Lich,
    /// A dragon.
    Dragon,
    /// Countered by fighters.
    BoulderTrap,
    /// Countered by rangers.
    LeverPuzzleRoom,
    /// Countered by mages.
    RiddleDoor,
    /// Countered by clerics.
    CursedAltar,
    /// Countered by druids.
    SnakePit,
    /// Countered by rogues.
    PoisonNeedleTrap,
}

impl EncounterKind {
    /// Every kind, in standard catalog order.
    pub const ALL: [EncounterKind; 18] = [
        Self::Goblins,
        Self::GoblinChieftain,
        Self::Wolves,
        Self::Orcs,
        Self::OrcWarlord,
        Self::OrcShaman,
        Self::Skeletons,
        Self::Zombies,
        Self::Ghosts,
        Self::Basilisk,
        Self::Lich,
        Self::Dragon,
        Self::BoulderTrap,
        Self::LeverPuzzleRoom,
        Self::RiddleDoor,
        Self::CursedAltar,
        Self::SnakePit,
        Self::PoisonNeedleTrap,
    ];

    /// The display name used by the standard catalog.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Goblins => "Goblins",
            Self::GoblinChieftain => "Goblin Chieftain",
            Self::Wolves => "Wolves",
            Self::Orcs => "Orcs",
            Self::OrcWarlord => "Orc Warlord",
            Self::OrcShaman => "Orc Shaman",
            Self::Skeletons => "Skeletons",
            Self::Zombies => "Zombies",
            Self::Ghosts => "Ghosts",
            Self::Basilisk => "Basilisk",
            Self::Lich => "Lich",
            Self::Dragon => "Dragon",
            Self::BoulderTrap => "Boulder Trap",
            Self::LeverPuzzleRoom => "Lever Puzzle Room",
            Self::RiddleDoor => "Riddle Door",
            Self::CursedAltar => "Cursed Altar",
            Self::SnakePit => "Snake Pit",
            Self::PoisonNeedleTrap => "Poison Needle Trap",
        }
    }

    /// Returns true for trap kinds.
    pub fn is_trap(self) -> bool {
        matches!(
            self,
            Self::BoulderTrap
                | Self::LeverPuzzleRoom
                | Self::RiddleDoor
                | Self::CursedAltar
                | Self::SnakePit
                | Self::PoisonNeedleTrap
        )
    }
}

impl std::fmt::Display for EncounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_name())
    }
}

/// A catalog entry describing one kind of encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterType {
    /// Unique encounter name.
    pub name: String,
    /// Contribution to dungeon threat level.
    pub threat: f64,
    /// Generation pool tag.
    pub species: Species,
    /// Resolution behavior.
    pub kind: EncounterKind,
}

impl EncounterType {
    /// Create an encounter type.
    pub fn new(name: impl Into<String>, threat: f64, species: Species, kind: EncounterKind) -> Self {
        Self {
            name: name.into(),
            threat,
            species,
            kind,
        }
    }

    /// Returns true if this type is tagged as a trap.
    pub fn is_trap(&self) -> bool {
        self.species == Species::Trap
    }
}

impl Named for EncounterType {
    const CATALOG: &'static str = "encounter";

    fn name(&self) -> &str {
        &self.name
    }
}

/// One encounter inside a dungeon.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    /// The resolved catalog entry.
    pub encounter_type: EncounterType,
    /// Set once the party has reached this encounter.
    pub encountered: bool,
    /// Set once the party has survived this encounter.
    pub beaten: bool,
}

impl Encounter {
    /// Create a fresh, not yet encountered instance.
    pub fn new(encounter_type: EncounterType) -> Self {
        Self {
            encounter_type,
            encountered: false,
            beaten: false,
        }
    }

    /// Shorthand for the type's name.
    pub fn name(&self) -> &str {
        &self.encounter_type.name
    }
}
