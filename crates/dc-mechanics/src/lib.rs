//! Dice, random sources, and encounter resolution for the dungeon crawl
//! simulator.
//!
//! Every random draw in the simulator goes through a [`RandomSource`]: seeded
//! [`rand::rngs::StdRng`] for real runs, [`ScriptedSource`] when a test needs
//! to pin the exact rolls. The resolution engine turns a party, an encounter
//! type, and a damage roll into a [`Strike`].

pub mod dice;
pub mod random;
pub mod resolution;

pub use dice::{DicePool, Die, DieResult, RollResult};
pub use random::{RandomSource, ScriptedSource};
pub use resolution::{AttackProfile, Profile, Strike, TrapProfile, profile, resolve, strike};
