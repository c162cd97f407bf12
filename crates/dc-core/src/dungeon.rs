//! Dungeons: a named, ordered sequence of encounters.

use serde::{Deserialize, Serialize};

use crate::encounter::Encounter;
use crate::error::CoreResult;
use crate::world::World;

/// Display name given to dungeons built from explicit encounter lists.
pub const SCRIPTED_NAME: &str = "Scripted Dungeon";

/// How a dungeon was put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// A settlement of one monster species; boss last.
    City,
    /// A boss with its slaves; boss last.
    Lair,
    /// A mixed ruin with no boss slot.
    OpenDungeon,
    /// An explicit encounter list.
    Scripted,
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City => write!(f, "City"),
            Self::Lair => write!(f, "Lair"),
            Self::OpenDungeon => write!(f, "Dungeon"),
            Self::Scripted => write!(f, "Scripted"),
        }
    }
}

/// A dungeon ready to be run.
#[derive(Debug, Clone)]
pub struct Dungeon {
    /// How the dungeon was built.
    pub archetype: Archetype,
    /// Display name.
    pub name: String,
    encounters: Vec<Encounter>,
    threat_level: f64,
}

impl Dungeon {
    /// Resolve encounter names against the world's catalog.
    ///
    /// Fails on the first name that is not in the catalog.
    pub fn from_names<S: AsRef<str>>(
        world: &World,
        archetype: Archetype,
        name: impl Into<String>,
        names: &[S],
    ) -> CoreResult<Self> {
        let encounters = names
            .iter()
            .map(|n| world.encounter(n.as_ref()).cloned().map(Encounter::new))
            .collect::<CoreResult<Vec<_>>>()?;

        let total: f64 = encounters.iter().map(|e| e.encounter_type.threat).sum();
        let threat_level = (total - 1.0) / world.party_size() as f64;

        Ok(Self {
            archetype,
            name: name.into(),
            encounters,
            threat_level,
        })
    }

    /// A scripted dungeon from an explicit list of encounter names.
    pub fn scripted<S: AsRef<str>>(world: &World, names: &[S]) -> CoreResult<Self> {
        Self::from_names(world, Archetype::Scripted, SCRIPTED_NAME, names)
    }

    /// `(sum of threat weights - 1) / party size`.
    pub fn threat_level(&self) -> f64 {
        self.threat_level
    }

    /// Encounters in the order the party meets them.
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    /// Flag the encounter at `index` as reached. Out of range is a no-op.
    pub fn mark_encountered(&mut self, index: usize) {
        if let Some(encounter) = self.encounters.get_mut(index) {
            encounter.encountered = true;
        }
    }

    /// Flag the encounter at `index` as survived. Out of range is a no-op.
    pub fn mark_beaten(&mut self, index: usize) {
        if let Some(encounter) = self.encounters.get_mut(index) {
            encounter.beaten = true;
        }
    }

    /// Number of encounters.
    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    /// Returns true if the dungeon has no encounters.
    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    /// Encounter names in order.
    pub fn encounter_names(&self) -> Vec<&str> {
        self.encounters.iter().map(Encounter::name).collect()
    }

    /// Number of encounters marked beaten.
    pub fn beaten_count(&self) -> usize {
        self.encounters.iter().filter(|e| e.beaten).count()
    }

    /// The first encounter not beaten, if any.
    pub fn first_unbeaten(&self) -> Option<&Encounter> {
        self.encounters.iter().find(|e| !e.beaten)
    }

    /// Clear the encountered and beaten flags so the dungeon can be rerun.
    pub fn reset(&mut self) {
        for encounter in &mut self.encounters {
            encounter.encountered = false;
            encounter.beaten = false;
        }
    }
}
