//! Character classes and the guard capabilities they grant.
//!
//! A class is a fixed bundle of combat-role flags. Guards cover one attack
//! axis each; the other flags feed healing, wild empathy, and the cowardly
//! bias used during party assembly.

use serde::{Deserialize, Serialize};

use crate::catalog::Named;

/// An attack axis a party can guard against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Guard {
    /// Close combat.
    Melee,
    /// Missiles and thrown weapons.
    Range,
    /// Spells and supernatural attacks.
    Magic,
}

impl Guard {
    /// All guard axes in canonical order.
    pub const ALL: [Guard; 3] = [Guard::Melee, Guard::Range, Guard::Magic];

    fn bit(self) -> u8 {
        match self {
            Self::Melee => 0b001,
            Self::Range => 0b010,
            Self::Magic => 0b100,
        }
    }
}

impl std::fmt::Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Melee => write!(f, "Melee"),
            Self::Range => write!(f, "Range"),
            Self::Magic => write!(f, "Magic"),
        }
    }
}

/// A subset of {Melee, Range, Magic}.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuardSet(u8);

impl GuardSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from a slice of guards.
    pub fn of(guards: &[Guard]) -> Self {
        guards.iter().copied().collect()
    }

    /// Add a guard to the set.
    pub fn insert(&mut self, guard: Guard) {
        self.0 |= guard.bit();
    }

    /// Returns true if the guard is in the set.
    pub fn contains(self, guard: Guard) -> bool {
        self.0 & guard.bit() != 0
    }

    /// Union of two sets.
    pub fn union(self, other: GuardSet) -> GuardSet {
        GuardSet(self.0 | other.0)
    }

    /// Number of guards in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no guard is in the set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the guards in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Guard> {
        Guard::ALL.into_iter().filter(move |g| self.contains(*g))
    }
}

impl FromIterator<Guard> for GuardSet {
    fn from_iter<I: IntoIterator<Item = Guard>>(iter: I) -> Self {
        let mut set = GuardSet::empty();
        for guard in iter {
            set.insert(guard);
        }
        set
    }
}

impl std::fmt::Display for GuardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|g| g.to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// A character class definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Unique class name.
    pub name: String,
    /// Covers the melee axis.
    #[serde(default)]
    pub melee_guard: bool,
    /// Covers the range axis.
    #[serde(default)]
    pub range_guard: bool,
    /// Covers the magic axis.
    #[serde(default)]
    pub magic_guard: bool,
    /// Contributes to between-encounter healing and turns undead.
    #[serde(default)]
    pub healer: bool,
    /// Calms beasts in proportion to level.
    #[serde(default)]
    pub wild_empathy: bool,
    /// Shies away from dungeons at or above its level.
    #[serde(default)]
    pub cowardly: bool,
}

impl ClassDef {
    /// Create a class with every flag unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            melee_guard: false,
            range_guard: false,
            magic_guard: false,
            healer: false,
            wild_empathy: false,
            cowardly: false,
        }
    }

    /// Set the guard flag for one axis.
    pub fn guarding(mut self, guard: Guard) -> Self {
        match guard {
            Guard::Melee => self.melee_guard = true,
            Guard::Range => self.range_guard = true,
            Guard::Magic => self.magic_guard = true,
        }
        self
    }

    /// Mark the class as a healer.
    pub fn healer(mut self) -> Self {
        self.healer = true;
        self
    }

    /// Mark the class as having wild empathy.
    pub fn wild_empathy(mut self) -> Self {
        self.wild_empathy = true;
        self
    }

    /// Mark the class as cowardly.
    pub fn cowardly(mut self) -> Self {
        self.cowardly = true;
        self
    }

    /// The guard axes this class covers.
    pub fn guards(&self) -> GuardSet {
        let mut set = GuardSet::empty();
        if self.melee_guard {
            set.insert(Guard::Melee);
        }
        if self.range_guard {
            set.insert(Guard::Range);
        }
        if self.magic_guard {
            set.insert(Guard::Magic);
        }
        set
    }
}

impl Named for ClassDef {
    const CATALOG: &'static str = "class";

    fn name(&self) -> &str {
        &self.name
    }
}
