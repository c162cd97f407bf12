//! Dice pool construction and rolling.

use serde::{Deserialize, Serialize};

use super::Die;
use super::roll::{DieResult, RollResult};
use crate::random::RandomSource;

/// A collection of dice to be rolled together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    /// The dice in this pool.
    pub dice: Vec<Die>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    /// A pool of one die.
    pub fn single(die: Die) -> Self {
        Self::new().add(die, 1)
    }

    /// Add `count` dice of the given type.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        for _ in 0..count {
            self.dice.push(die);
        }
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Largest total the pool can roll.
    pub fn max_total(&self) -> u32 {
        self.dice.iter().map(|d| d.sides()).sum()
    }

    /// Roll all dice in the pool, in order.
    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> RollResult {
        let dice = self
            .dice
            .iter()
            .map(|&die| DieResult {
                die,
                value: rng.roll_die(die.sides()),
            })
            .collect();
        RollResult { dice }
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dice: Vec<String> = self.dice.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", dice.join("+"))
    }
}
