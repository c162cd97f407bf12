//! Random number sources.
//!
//! The simulator needs four things from randomness: a uniform real in
//! `[0, 1)`, a die roll in `[1, n]`, a uniform pick from a list, and a
//! shuffle. [`RandomSource`] provides all four. The defaults derive rolls,
//! picks, and shuffles from the uniform draw, so a [`ScriptedSource`] fed a
//! list of uniforms reproduces a draw sequence exactly; [`StdRng`] delegates
//! to `rand` instead.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

/// A source of uniform draws, die rolls, picks, and shuffles.
pub trait RandomSource {
    /// A uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// A die roll in `[1, sides]`: `ceil(uniform * sides)`.
    fn roll_die(&mut self, sides: u32) -> u32 {
        let value = (self.uniform() * f64::from(sides)).ceil() as u32;
        value.clamp(1, sides.max(1))
    }

    /// Pick one item: index `floor(uniform * len)`. `None` for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(uniform_index(self.uniform(), items.len()))
    }

    /// Shuffle in place, swapping each position from the back with a
    /// uniformly drawn earlier one.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = uniform_index(self.uniform(), i + 1);
            items.swap(i, j);
        }
    }
}

fn uniform_index(u: f64, len: usize) -> usize {
    ((u * len as f64) as usize).min(len.saturating_sub(1))
}

impl RandomSource for StdRng {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides.max(1))
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        IndexedRandom::choose(items, self)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        SliceRandom::shuffle(items, self);
    }
}

/// A source that replays fixed draws, cycling when it runs out.
///
/// Die rolls come from `rolls` (clamped to the die's range) when any are
/// given, otherwise they are derived from the uniform draws. With no
/// uniforms every uniform draw is `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    uniforms: Vec<f64>,
    rolls: Vec<u32>,
    next_uniform: usize,
    next_roll: usize,
}

impl ScriptedSource {
    /// Replay the given uniform draws and die rolls.
    pub fn new(uniforms: Vec<f64>, rolls: Vec<u32>) -> Self {
        Self {
            uniforms,
            rolls,
            next_uniform: 0,
            next_roll: 0,
        }
    }

    /// Only die rolls; uniform draws are `0.0`.
    pub fn with_rolls(rolls: Vec<u32>) -> Self {
        Self::new(Vec::new(), rolls)
    }

    /// Only uniform draws; die rolls derive from them.
    pub fn with_uniforms(uniforms: Vec<f64>) -> Self {
        Self::new(uniforms, Vec::new())
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        if self.uniforms.is_empty() {
            return 0.0;
        }
        let value = self.uniforms[self.next_uniform % self.uniforms.len()];
        self.next_uniform += 1;
        value
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        if self.rolls.is_empty() {
            let value = (self.uniform() * f64::from(sides)).ceil() as u32;
            return value.clamp(1, sides.max(1));
        }
        let value = self.rolls[self.next_roll % self.rolls.len()];
        self.next_roll += 1;
        value.clamp(1, sides.max(1))
    }
}
