//! Damage formulas and counters for every encounter kind.

use dc_core::{EncounterKind, Guard, GuardSet};
use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, Die};

/// How a monster attacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackProfile {
    /// Damage dice.
    pub damage: DicePool,
    /// Axes the party must guard to avoid double damage.
    pub attacks: GuardSet,
    /// Party wild empathy reduces the damage.
    pub wild_empathy: bool,
    /// Party healing suppresses one uncountered axis.
    pub undead: bool,
}

/// How a trap hurts and who disarms it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapProfile {
    /// Damage dice.
    pub damage: DicePool,
    /// Class whose highest party level is subtracted from the damage.
    pub counter_class: String,
}

/// Resolution rules for one encounter kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    /// A monster fight.
    Monster(AttackProfile),
    /// A trap or puzzle.
    Trap(TrapProfile),
}

impl Profile {
    /// The damage dice for either family.
    pub fn damage(&self) -> &DicePool {
        match self {
            Self::Monster(attack) => &attack.damage,
            Self::Trap(trap) => &trap.damage,
        }
    }
}

fn monster(damage: DicePool, attacks: &[Guard]) -> Profile {
    Profile::Monster(AttackProfile {
        damage,
        attacks: GuardSet::of(attacks),
        wild_empathy: false,
        undead: false,
    })
}

fn beast(damage: DicePool, attacks: &[Guard]) -> Profile {
    Profile::Monster(AttackProfile {
        damage,
        attacks: GuardSet::of(attacks),
        wild_empathy: true,
        undead: false,
    })
}

fn undead(damage: DicePool, attacks: &[Guard]) -> Profile {
    Profile::Monster(AttackProfile {
        damage,
        attacks: GuardSet::of(attacks),
        wild_empathy: false,
        undead: true,
    })
}

fn trap(counter_class: &str) -> Profile {
    Profile::Trap(TrapProfile {
        damage: DicePool::single(Die::D6),
        counter_class: counter_class.to_string(),
    })
}

/// The resolution rules for a kind.
///
/// Trap counters name the standard classes; a world without that class
/// simply never mitigates the trap.
pub fn profile(kind: EncounterKind) -> Profile {
    use Guard::{Magic, Melee, Range};
    let d = DicePool::single;
    match kind {
        EncounterKind::Goblins => monster(d(Die::D3), &[Range]),
        EncounterKind::GoblinChieftain => monster(d(Die::D4), &[Melee]),
        EncounterKind::Orcs => monster(d(Die::D4), &[Melee]),
        EncounterKind::Wolves => beast(d(Die::D4), &[Melee]),
        EncounterKind::OrcWarlord => monster(d(Die::D8), &[Melee]),
        EncounterKind::OrcShaman => monster(d(Die::D6), &[Magic]),
        EncounterKind::Skeletons => undead(d(Die::D3), &[Range, Magic]),
        EncounterKind::Zombies => undead(d(Die::D3), &[Melee, Magic]),
        EncounterKind::Ghosts => undead(d(Die::D4), &[Magic]),
        EncounterKind::Basilisk => beast(d(Die::D8), &[Melee, Magic]),
        EncounterKind::Lich => undead(d(Die::D10), &[Magic]),
        EncounterKind::Dragon => monster(DicePool::new().add(Die::D6, 2), &[Melee, Range, Magic]),
        EncounterKind::BoulderTrap => trap("Fighter"),
        EncounterKind::LeverPuzzleRoom => trap("Ranger"),
        EncounterKind::RiddleDoor => trap("Mage"),
        EncounterKind::CursedAltar => trap("Cleric"),
        EncounterKind::SnakePit => trap("Druid"),
        EncounterKind::PoisonNeedleTrap => trap("Rogue"),
    }
}
