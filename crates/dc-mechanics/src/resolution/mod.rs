//! The encounter resolution engine.
//!
//! Resolution is split in two: [`strike`] is a pure function of the party,
//! the profile, and the damage roll; [`resolve`] rolls the dice, computes the
//! strike, and applies it to the party's hit points.
//!
//! Monsters roll their dice, lose the party's wild-empathy strength if they
//! are beasts, and deal double damage while any attack axis is left
//! unguarded. Against undead a party with any healing suppresses exactly one
//! unguarded axis. Traps roll a d6 minus the party's best level in the
//! counter class. Damage at or below zero is never applied.

pub mod profile;

pub use profile::{AttackProfile, Profile, TrapProfile, profile};

use dc_core::{EncounterType, Party};

use crate::random::RandomSource;

/// The outcome of resolving one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    /// Total of the damage dice.
    pub rolled: i32,
    /// Amount subtracted from the roll (wild empathy or trap counter level).
    pub mitigation: i32,
    /// Attack axes left unguarded after turn-undead suppression.
    pub uncountered: i32,
    /// Whether the damage was doubled.
    pub doubled: bool,
    /// Final damage; may be zero or negative.
    pub damage: i32,
}

impl Strike {
    /// Damage actually taken by the party.
    pub fn applied(&self) -> i32 {
        self.damage.max(0)
    }
}

/// Monster damage for a given roll.
pub fn monster_strike(party: &Party, attack: &AttackProfile, rolled: i32) -> Strike {
    let mitigation = if attack.wild_empathy {
        i32::try_from(party.wild_empathy()).unwrap_or(i32::MAX)
    } else {
        0
    };
    let mut damage = rolled - mitigation;

    let guards = party.guards();
    let mut uncountered = attack.attacks.iter().filter(|a| !guards.contains(*a)).count() as i32;
    if attack.undead && party.healing() > 0.0 {
        uncountered -= 1;
    }

    let doubled = uncountered > 0;
    if doubled {
        damage *= 2;
    }

    Strike {
        rolled,
        mitigation,
        uncountered,
        doubled,
        damage,
    }
}

/// Trap damage for a given roll.
pub fn trap_strike(party: &Party, trap: &TrapProfile, rolled: i32) -> Strike {
    let mitigation = i32::try_from(party.class_max_level(&trap.counter_class)).unwrap_or(i32::MAX);
    Strike {
        rolled,
        mitigation,
        uncountered: 0,
        doubled: false,
        damage: rolled - mitigation,
    }
}

/// Damage for a given profile and roll, without touching the party.
pub fn strike(party: &Party, profile: &Profile, rolled: i32) -> Strike {
    match profile {
        Profile::Monster(attack) => monster_strike(party, attack, rolled),
        Profile::Trap(trap) => trap_strike(party, trap, rolled),
    }
}

/// Roll the encounter's damage and apply it to the party.
pub fn resolve<R: RandomSource + ?Sized>(
    party: &mut Party,
    encounter: &EncounterType,
    rng: &mut R,
) -> Strike {
    let profile = profile(encounter.kind);
    let rolled = profile.damage().roll(rng).total() as i32;
    let result = strike(party, &profile, rolled);
    party.take_damage(result.applied());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use dc_core::{Adventurer, ClassDef, Guard, World};

    fn world() -> World {
        World::standard().unwrap()
    }

    fn party(roster: &[(&str, u32)]) -> Party {
        Party::from_roster(&world(), roster).unwrap()
    }

    fn encounter(name: &str) -> EncounterType {
        world().encounter(name).unwrap().clone()
    }

    #[test]
    fn unguarded_goblins_double() {
        // Melee only, no healing: Goblins attack at range.
        let mut p = party(&[("Fighter", 2), ("Fighter", 2), ("Rogue", 2), ("Rogue", 2)]);
        let before = p.current_hp();
        let result = resolve(&mut p, &encounter("Goblins"), &mut ScriptedSource::with_rolls(vec![2]));
        assert_eq!(result.uncountered, 1);
        assert!(result.doubled);
        assert_eq!(result.applied(), 4);
        assert_eq!(p.current_hp(), before - 4.0);
    }

    #[test]
    fn healing_suppresses_one_undead_axis() {
        // Healing 0.5, no guards: Skeletons need Range and Magic.
        let mut p = party(&[("Cleric", 1), ("Rogue", 1), ("Rogue", 1), ("Druid", 1)]);
        let result = resolve(&mut p, &encounter("Skeletons"), &mut ScriptedSource::with_rolls(vec![3]));
        assert_eq!(result.uncountered, 1);
        assert!(result.doubled);
        assert_eq!(result.applied(), 6);
    }

    #[test]
    fn healing_fully_suppresses_single_undead_axis() {
        let p = party(&[("Cleric", 1), ("Rogue", 1), ("Rogue", 1), ("Fighter", 1)]);
        let Profile::Monster(ghosts) = profile(dc_core::EncounterKind::Ghosts) else {
            panic!("ghosts should be a monster");
        };
        let result = monster_strike(&p, &ghosts, 3);
        assert_eq!(result.uncountered, 0);
        assert!(!result.doubled);
        assert_eq!(result.damage, 3);
    }

    #[test]
    fn healing_ignored_against_living() {
        let p = party(&[("Cleric", 3), ("Rogue", 1), ("Rogue", 1), ("Rogue", 1)]);
        let Profile::Monster(shaman) = profile(dc_core::EncounterKind::OrcShaman) else {
            panic!("shaman should be a monster");
        };
        let result = monster_strike(&p, &shaman, 4);
        assert!(result.doubled);
        assert_eq!(result.damage, 8);
    }

    #[test]
    fn guarded_attacks_never_double() {
        let p = party(&[("Fighter", 1), ("Ranger", 1), ("Mage", 1), ("Rogue", 1)]);
        for kind in dc_core::EncounterKind::ALL {
            if let Profile::Monster(attack) = profile(kind) {
                for roll in 1..=attack.damage.max_total() as i32 {
                    let result = monster_strike(&p, &attack, roll);
                    assert!(!result.doubled, "{kind} doubled against a full guard");
                    assert_eq!(result.damage, roll);
                }
            }
        }
    }

    #[test]
    fn wild_empathy_applies_before_doubling() {
        // Druid level 3, no melee guard: Wolves roll 4 -> (4 - 3) * 2.
        let mut p = party(&[("Druid", 3), ("Rogue", 1), ("Mage", 1), ("Mage", 1)]);
        let result = resolve(&mut p, &encounter("Wolves"), &mut ScriptedSource::with_rolls(vec![4]));
        assert_eq!(result.mitigation, 3);
        assert!(result.doubled);
        assert_eq!(result.applied(), 2);
    }

    #[test]
    fn top_level_mitigation_never_goes_negative() {
        let max = dc_core::MAX_LEVEL;
        let mut p = party(&[("Druid", max), ("Rogue", max), ("Mage", 1), ("Mage", 1)]);
        let before = p.current_hp();
        let wolves = resolve(&mut p, &encounter("Wolves"), &mut ScriptedSource::with_rolls(vec![4]));
        assert_eq!(wolves.mitigation, max as i32);
        assert!(wolves.damage <= 0);
        let needle = resolve(&mut p, &encounter("Poison Needle Trap"), &mut ScriptedSource::with_rolls(vec![6]));
        assert_eq!(needle.mitigation, max as i32);
        assert!(needle.damage <= 0);
        assert_eq!(p.current_hp(), before);
    }

    #[test]
    fn wild_empathy_can_cancel_damage() {
        let mut p = party(&[("Druid", 6), ("Fighter", 1), ("Mage", 1), ("Mage", 1)]);
        let before = p.current_hp();
        let result = resolve(&mut p, &encounter("Basilisk"), &mut ScriptedSource::with_rolls(vec![5]));
        assert_eq!(result.damage, -1);
        assert_eq!(result.applied(), 0);
        assert_eq!(p.current_hp(), before);
    }

    #[test]
    fn boulder_trap_mitigated_by_fighter() {
        let mut p = party(&[("Fighter", 3), ("Fighter", 1), ("Mage", 1), ("Mage", 1)]);
        let hp = p.current_hp();

        let result = resolve(&mut p, &encounter("Boulder Trap"), &mut ScriptedSource::with_rolls(vec![5]));
        assert_eq!(result.applied(), 2);
        assert_eq!(p.current_hp(), hp - 2.0);

        let result = resolve(&mut p, &encounter("Boulder Trap"), &mut ScriptedSource::with_rolls(vec![2]));
        assert_eq!(result.damage, -1);
        assert_eq!(result.applied(), 0);
        assert_eq!(p.current_hp(), hp - 2.0);
    }

    #[test]
    fn trap_without_counter_class_hits_in_full() {
        let p = party(&[("Fighter", 3), ("Fighter", 1), ("Mage", 1), ("Mage", 1)]);
        let Profile::Trap(altar) = profile(dc_core::EncounterKind::CursedAltar) else {
            panic!("altar should be a trap");
        };
        assert_eq!(trap_strike(&p, &altar, 6).damage, 6);
    }

    #[test]
    fn strike_is_idempotent() {
        let p = party(&[("Cleric", 2), ("Druid", 2), ("Ranger", 4), ("Rogue", 1)]);
        for kind in dc_core::EncounterKind::ALL {
            let prof = profile(kind);
            assert_eq!(strike(&p, &prof, 4), strike(&p, &prof, 4));
        }
    }

    #[test]
    fn dragon_sums_two_dice() {
        let mut p = party(&[("Fighter", 5), ("Ranger", 5), ("Mage", 5), ("Cleric", 5)]);
        let result = resolve(&mut p, &encounter("Dragon"), &mut ScriptedSource::with_rolls(vec![6, 5]));
        assert_eq!(result.rolled, 11);
        assert!(!result.doubled);
        assert_eq!(p.current_hp(), 24.0 - 11.0);
    }

    #[test]
    fn custom_class_names_are_respected() {
        let world = World::standard().unwrap();
        let adventurers = vec![
            Adventurer::new(ClassDef::new("Fighter").guarding(Guard::Melee), 2).unwrap(),
            Adventurer::new(world.class("Mage").unwrap().clone(), 1).unwrap(),
            Adventurer::new(world.class("Mage").unwrap().clone(), 1).unwrap(),
            Adventurer::new(world.class("Mage").unwrap().clone(), 1).unwrap(),
        ];
        let p = Party::new(&world, adventurers).unwrap();
        let Profile::Trap(boulder) = profile(dc_core::EncounterKind::BoulderTrap) else {
            panic!("boulder trap should be a trap");
        };
        assert_eq!(trap_strike(&p, &boulder, 6).damage, 4);
    }
}
