//! Parties and their aggregate capabilities.
//!
//! Everything a party can do is derived once, at construction, from its
//! members. Afterwards only the shared hit-point pool changes: damage lowers
//! it (possibly below zero) and healing raises it up to the total.

use std::collections::HashMap;

use crate::adventurer::Adventurer;
use crate::class::GuardSet;
use crate::error::{CoreError, CoreResult};
use crate::world::World;

/// A fixed group of adventurers sharing one hit-point pool.
#[derive(Debug, Clone)]
pub struct Party {
    adventurers: Vec<Adventurer>,
    total_hp: f64,
    current_hp: f64,
    guards: GuardSet,
    healing: f64,
    wild_empathy: u32,
    class_max_levels: HashMap<String, u32>,
}

impl Party {
    /// Build a party of exactly `world.party_size()` adventurers.
    pub fn new(world: &World, adventurers: Vec<Adventurer>) -> CoreResult<Self> {
        if adventurers.len() != world.party_size() {
            return Err(CoreError::PartySize {
                expected: world.party_size(),
                actual: adventurers.len(),
            });
        }

        let total_hp = adventurers.iter().map(|a| f64::from(a.hit_points())).sum();
        let guards = adventurers
            .iter()
            .fold(GuardSet::empty(), |set, a| set.union(a.guards()));
        let healing = adventurers.iter().map(Adventurer::healing).sum();
        let wild_empathy = adventurers
            .iter()
            .map(Adventurer::wild_empathy)
            .max()
            .unwrap_or(0);

        let class_max_levels = world
            .classes()
            .iter()
            .map(|class| {
                let max = adventurers
                    .iter()
                    .filter(|a| a.class_name() == class.name)
                    .map(Adventurer::level)
                    .max()
                    .unwrap_or(0);
                (class.name.clone(), max)
            })
            .collect();

        Ok(Self {
            adventurers,
            total_hp,
            current_hp: total_hp,
            guards,
            healing,
            wild_empathy,
            class_max_levels,
        })
    }

    /// Build a party from `(class name, level)` pairs.
    pub fn from_roster<S: AsRef<str>>(world: &World, roster: &[(S, u32)]) -> CoreResult<Self> {
        let adventurers = roster
            .iter()
            .map(|(name, level)| Adventurer::new(world.class(name.as_ref())?.clone(), *level))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(world, adventurers)
    }

    /// Members in party order.
    pub fn adventurers(&self) -> &[Adventurer] {
        &self.adventurers
    }

    /// `(class name, level)` pairs in party order.
    pub fn roster(&self) -> Vec<(String, u32)> {
        self.adventurers
            .iter()
            .map(|a| (a.class_name().to_string(), a.level()))
            .collect()
    }

    /// Sum of `1 + level` over all members.
    pub fn total_hp(&self) -> f64 {
        self.total_hp
    }

    /// Remaining hit points; may be negative after a lethal blow.
    pub fn current_hp(&self) -> f64 {
        self.current_hp
    }

    /// Guard axes covered by at least one member.
    pub fn guards(&self) -> GuardSet {
        self.guards
    }

    /// Hit points restored after each beaten encounter.
    pub fn healing(&self) -> f64 {
        self.healing
    }

    /// Highest wild-empathy strength among members.
    pub fn wild_empathy(&self) -> u32 {
        self.wild_empathy
    }

    /// Highest level among members of a class, 0 if none is present.
    pub fn class_max_level(&self, class: &str) -> u32 {
        self.class_max_levels.get(class).copied().unwrap_or(0)
    }

    /// Sum of member levels.
    pub fn total_level(&self) -> u32 {
        self.adventurers.iter().map(Adventurer::level).sum()
    }

    /// Subtract damage from the pool. Non-positive amounts do nothing.
    pub fn take_damage(&mut self, amount: i32) {
        if amount > 0 {
            self.current_hp -= f64::from(amount);
        }
    }

    /// Restore `healing` hit points, never exceeding the total.
    pub fn heal(&mut self) {
        self.current_hp = (self.current_hp + self.healing).min(self.total_hp);
    }

    /// Returns true once the pool has dropped to zero or below.
    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0.0
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: Vec<String> = self.adventurers.iter().map(|a| a.to_string()).collect();
        write!(
            f,
            "{} ({}/{} HP, guards {})",
            members.join(", "),
            self.current_hp,
            self.total_hp,
            self.guards
        )
    }
}
