use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::class::{ClassDef, Guard};
use crate::encounter::{EncounterKind, EncounterType, Species};
use crate::error::{CoreError, CoreResult};

/// Serializable description of a world.
///
/// This is the on-disk shape; [`World::from_def`] validates it and builds the
/// name indexes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDef {
    /// Adventurers per party.
    pub party_size: usize,
    /// Width of the encounter columns in exported records.
    pub max_dungeon_length: usize,
    /// Class catalog in order.
    pub classes: Vec<ClassDef>,
    /// Encounter catalog in order.
    pub encounters: Vec<EncounterType>,
}

impl WorldDef {
    /// The standard six classes and eighteen encounter types.
    pub fn standard() -> Self {
        Self {
            party_size: 4,
            max_dungeon_length: 12,
            classes: vec![
                ClassDef::new("Fighter").guarding(Guard::Melee),
                ClassDef::new("Ranger").guarding(Guard::Range),
                ClassDef::new("Mage").guarding(Guard::Magic),
                ClassDef::new("Cleric").healer(),
                ClassDef::new("Druid").wild_empathy(),
                ClassDef::new("Rogue").cowardly(),
            ],
            encounters: EncounterKind::ALL
                .into_iter()
                .map(|kind| {
                    let (threat, species) = standard_weight(kind);
                    EncounterType::new(kind.default_name(), threat, species, kind)
                })
                .collect(),
        }
    }
}

fn standard_weight(kind: EncounterKind) -> (f64, Species) {
    use EncounterKind::*;
    match kind {
        Goblins => (1.3, Species::Goblin),
        GoblinChieftain => (3.0, Species::Goblin),
        Wolves => (3.0, Species::Beast),
        Orcs => (2.0, Species::Orc),
        OrcWarlord => (5.0, Species::Orc),
        OrcShaman => (3.0, Species::Orc),
        Skeletons | Zombies => (2.0, Species::Undead),
        Ghosts => (3.0, Species::Undead),
        Basilisk => (5.0, Species::Boss),
        Lich => (7.0, Species::Boss),
        Dragon => (10.0, Species::Boss),
        BoulderTrap | LeverPuzzleRoom | RiddleDoor | CursedAltar | SnakePit | PoisonNeedleTrap => {
            (2.0, Species::Trap)
        }
    }
}

/// The read-only configuration every simulation runs against.
#[derive(Debug, Clone)]
pub struct World {
    classes: Catalog<ClassDef>,
    encounters: Catalog<EncounterType>,
    party_size: usize,
    max_dungeon_length: usize,
}

impl World {
    /// Build the standard world.
    pub fn standard() -> CoreResult<Self> {
        Self::from_def(WorldDef::standard())
    }

    /// Validate a definition and build its catalogs.
    pub fn from_def(def: WorldDef) -> CoreResult<Self> {
        if def.party_size == 0 {
            return Err(CoreError::InvalidWorld("party size must be at least 1".into()));
        }
        if def.max_dungeon_length == 0 {
            return Err(CoreError::InvalidWorld(
                "max dungeon length must be at least 1".into(),
            ));
        }
        if def.classes.is_empty() {
            return Err(CoreError::InvalidWorld("class catalog is empty".into()));
        }
        if let Some(bad) = def
            .encounters
            .iter()
            .find(|e| !(e.threat.is_finite() && e.threat > 0.0))
        {
            return Err(CoreError::InvalidWorld(format!(
                "encounter \"{}\" has non-positive threat {}",
                bad.name, bad.threat
            )));
        }

        Ok(Self {
            classes: Catalog::new(def.classes)?,
            encounters: Catalog::new(def.encounters)?,
            party_size: def.party_size,
            max_dungeon_length: def.max_dungeon_length,
        })
    }

    /// Parse and validate a JSON world definition.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let def: WorldDef = serde_json::from_str(json)?;
        Self::from_def(def)
    }

    /// Load a JSON world definition from disk.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidWorld(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Turn the world back into its serializable form.
    pub fn to_def(&self) -> WorldDef {
        WorldDef {
            party_size: self.party_size,
            max_dungeon_length: self.max_dungeon_length,
            classes: self.classes.as_slice().to_vec(),
            encounters: self.encounters.as_slice().to_vec(),
        }
    }

    /// Adventurers per party.
    pub fn party_size(&self) -> usize {
        self.party_size
    }

    /// Width of the encounter columns in exported records.
    pub fn max_dungeon_length(&self) -> usize {
        self.max_dungeon_length
    }

    /// The class catalog.
    pub fn classes(&self) -> &Catalog<ClassDef> {
        &self.classes
    }

    /// The encounter catalog.
    pub fn encounters(&self) -> &Catalog<EncounterType> {
        &self.encounters
    }

    /// Look up a class by exact name.
    pub fn class(&self, name: &str) -> CoreResult<&ClassDef> {
        self.classes
            .get(name)
            .ok_or_else(|| CoreError::UnknownClass(name.to_string()))
    }

    /// Look up an encounter type by exact name.
    pub fn encounter(&self, name: &str) -> CoreResult<&EncounterType> {
        self.encounters
            .get(name)
            .ok_or_else(|| CoreError::UnknownEncounter(name.to_string()))
    }

    /// Names of every trap-tagged encounter type, in catalog order.
    pub fn trap_names(&self) -> Vec<&str> {
        self.encounters
            .iter()
            .filter(|e| e.is_trap())
            .map(|e| e.name.as_str())
            .collect()
    }
}
