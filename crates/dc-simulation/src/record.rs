//! One row of outcome data per run.
//!
//! The basic row holds the dungeon name, the party roster, the encounter
//! names padded to the world's max dungeon length, and the outcome. The
//! extended row appends per-class tallies and per-encounter-type counts, both
//! in catalog order.

use serde::Serialize;

use dc_core::{Dungeon, Party, World};

use crate::error::{SimError, SimResult};

/// Per-class tallies for the extended row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassTally {
    /// Class name.
    pub class: String,
    /// Members of this class.
    pub count: u32,
    /// Sum of their levels.
    pub total_level: u32,
    /// Highest level among them, 0 if none.
    pub max_level: u32,
}

/// The outcome of one run, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    /// Dungeon display name.
    pub dungeon: String,
    /// Party members as (class, level), in party order.
    pub party: Vec<(String, u32)>,
    /// Encounter names in order, unpadded.
    pub encounters: Vec<String>,
    /// Dungeon threat level.
    pub threat_level: f64,
    /// Encounters in the dungeon.
    pub encounter_count: usize,
    /// Encounters beaten.
    pub beaten_count: usize,
    /// Every encounter was beaten.
    pub victory: bool,
    /// The first encounter not beaten, empty on victory.
    pub defeated_by: String,
    /// One entry per class in catalog order.
    pub classes: Vec<ClassTally>,
    /// Occurrences of each encounter type in catalog order.
    pub encounter_types: Vec<(String, usize)>,
    #[serde(skip)]
    width: usize,
}

impl RunRecord {
    /// Build a record from a finished run.
    ///
    /// Fails with [`SimError::DungeonTooLong`] when the dungeon does not fit
    /// the world's encounter columns.
    pub fn new(world: &World, party: &Party, dungeon: &Dungeon) -> SimResult<Self> {
        let width = world.max_dungeon_length();
        if dungeon.len() > width {
            return Err(SimError::DungeonTooLong {
                length: dungeon.len(),
                max: width,
            });
        }

        let classes = world
            .classes()
            .iter()
            .map(|class| {
                let levels: Vec<u32> = party
                    .adventurers()
                    .iter()
                    .filter(|a| a.class_name() == class.name)
                    .map(|a| a.level())
                    .collect();
                ClassTally {
                    class: class.name.clone(),
                    count: levels.len() as u32,
                    total_level: levels.iter().sum(),
                    max_level: levels.iter().copied().max().unwrap_or(0),
                }
            })
            .collect();

        let encounter_types = world
            .encounters()
            .iter()
            .map(|t| {
                let n = dungeon.encounters().iter().filter(|e| e.name() == t.name).count();
                (t.name.clone(), n)
            })
            .collect();

        let beaten_count = dungeon.beaten_count();
        let victory = beaten_count == dungeon.len();
        let defeated_by = dungeon
            .first_unbeaten()
            .map(|e| e.name().to_string())
            .unwrap_or_default();

        Ok(Self {
            dungeon: dungeon.name.clone(),
            party: party.roster(),
            encounters: dungeon.encounter_names().into_iter().map(String::from).collect(),
            threat_level: dungeon.threat_level(),
            encounter_count: dungeon.len(),
            beaten_count,
            victory,
            defeated_by,
            classes,
            encounter_types,
            width,
        })
    }

    /// Sum of member levels.
    pub fn total_level(&self) -> u32 {
        self.party.iter().map(|(_, level)| level).sum()
    }

    /// Cells of the basic row.
    pub fn basic_row(&self) -> Vec<String> {
        let mut row = vec![self.dungeon.clone()];
        for (class, level) in &self.party {
            row.push(class.clone());
            row.push(level.to_string());
        }
        for j in 0..self.width {
            row.push(self.encounters.get(j).cloned().unwrap_or_default());
        }
        // Whole values keep their decimal point: 1.0, not 1.
        row.push(format!("{:?}", self.threat_level));
        row.push(self.encounter_count.to_string());
        row.push(self.beaten_count.to_string());
        row.push(if self.victory { "1" } else { "0" }.to_string());
        row.push(self.defeated_by.clone());
        row
    }

    /// Cells of the extended row: the basic row plus the tallies.
    pub fn extended_row(&self) -> Vec<String> {
        let mut row = self.basic_row();
        for tally in &self.classes {
            row.push(tally.count.to_string());
            row.push(tally.total_level.to_string());
            row.push(tally.max_level.to_string());
        }
        for (_, n) in &self.encounter_types {
            row.push(n.to_string());
        }
        row
    }
}

/// Column names of the basic table.
pub fn basic_headers(world: &World) -> Vec<String> {
    let mut headers = vec!["Dungeon Name".to_string()];
    for i in 1..=world.party_size() {
        headers.push(format!("Adventurer {i} Class"));
        headers.push(format!("Adventurer {i} Level"));
    }
    for j in 1..=world.max_dungeon_length() {
        headers.push(format!("Encounter {j}"));
    }
    headers.extend(
        ["Threat Level", "# Encounters", "# Encounters Beaten", "Victory?", "Defeated By"]
            .into_iter()
            .map(String::from),
    );
    headers
}

/// Column names of the extended table.
pub fn extended_headers(world: &World) -> Vec<String> {
    let mut headers = basic_headers(world);
    for class in world.classes() {
        headers.push(format!("# of {} Adventurers", class.name));
        headers.push(format!("Total Level of {} Adventurers", class.name));
        headers.push(format!("Max Level of {} Adventurers", class.name));
    }
    for encounter in world.encounters() {
        headers.push(format!("# of {} Encounters", encounter.name));
    }
    headers
}
