use serde::{Deserialize, Serialize};

use crate::class::{ClassDef, GuardSet};
use crate::error::{CoreError, CoreResult};

/// Healing contributed per encounter by each healer in the party.
pub const HEALER_CONTRIBUTION: f64 = 0.5;

/// Highest level an adventurer may have.
pub const MAX_LEVEL: u32 = 100;

/// A single party member: a class at a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adventurer {
    class: ClassDef,
    level: u32,
}

impl Adventurer {
    /// Create an adventurer. Levels run from 1 to [`MAX_LEVEL`].
    pub fn new(class: ClassDef, level: u32) -> CoreResult<Self> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(CoreError::InvalidLevel {
                class: class.name,
                level,
            });
        }
        Ok(Self { class, level })
    }

    /// The adventurer's class.
    pub fn class(&self) -> &ClassDef {
        &self.class
    }

    /// Shorthand for the class name.
    pub fn class_name(&self) -> &str {
        &self.class.name
    }

    /// The adventurer's level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Hit points this adventurer adds to the party pool.
    pub fn hit_points(&self) -> u32 {
        1 + self.level
    }

    /// Guard axes inherited from the class.
    pub fn guards(&self) -> GuardSet {
        self.class.guards()
    }

    /// Healing per encounter: a fixed amount for healers, otherwise zero.
    pub fn healing(&self) -> f64 {
        if self.class.healer {
            HEALER_CONTRIBUTION
        } else {
            0.0
        }
    }

    /// Wild-empathy strength: the level for classes that have it.
    pub fn wild_empathy(&self) -> u32 {
        if self.class.wild_empathy {
            self.level
        } else {
            0
        }
    }
}

impl std::fmt::Display for Adventurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level {} {}", self.level, self.class.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Guard;

    #[test]
    fn derived_values() {
        let druid = Adventurer::new(ClassDef::new("Druid").wild_empathy(), 4).unwrap();
        assert_eq!(druid.hit_points(), 5);
        assert_eq!(druid.wild_empathy(), 4);
        assert_eq!(druid.healing(), 0.0);
        assert!(druid.guards().is_empty());

        let cleric = Adventurer::new(ClassDef::new("Cleric").healer(), 2).unwrap();
        assert_eq!(cleric.healing(), HEALER_CONTRIBUTION);
        assert_eq!(cleric.wild_empathy(), 0);

        let fighter = Adventurer::new(ClassDef::new("Fighter").guarding(Guard::Melee), 1).unwrap();
        assert!(fighter.guards().contains(Guard::Melee));
    }

    #[test]
    fn level_zero_rejected() {
        let err = Adventurer::new(ClassDef::new("Mage"), 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLevel { level: 0, .. }));
    }

    #[test]
    fn oversized_level_rejected() {
        let druid = ClassDef::new("Druid").wild_empathy();
        assert!(Adventurer::new(druid.clone(), MAX_LEVEL).is_ok());
        for level in [MAX_LEVEL + 1, 3_000_000_000, u32::MAX] {
            let err = Adventurer::new(druid.clone(), level).unwrap_err();
            assert!(matches!(err, CoreError::InvalidLevel { level: l, .. } if l == level));
        }
    }

    #[test]
    fn display() {
        let a = Adventurer::new(ClassDef::new("Rogue"), 3).unwrap();
        assert_eq!(a.to_string(), "Level 3 Rogue");
    }
}
