//! Party assembly by rejection sampling.
//!
//! Candidates are drawn one at a time: a uniform class, a level of
//! `min(d8, d8)`, and an acceptance roll that favors levels close to the
//! dungeon's threat level and classes the party does not have yet. Cowardly
//! classes halve their level gap above the threat level and double it at or
//! below it.

use dc_core::{Adventurer, ClassDef, Dungeon, Party, World};
use dc_mechanics::RandomSource;

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};

/// Probability of accepting a candidate of `class` at `level`.
///
/// `same_class` is the number of party members already of that class.
pub fn acceptance(class: &ClassDef, level: u32, threat: f64, same_class: usize) -> f64 {
    let level = f64::from(level);
    let mut level_diff = (level - threat).abs();
    if class.cowardly {
        if level > threat {
            level_diff /= 2.0;
        } else {
            level_diff *= 2.0;
        }
    }

    let mut probability = 1.0 - 0.5 * level_diff;
    for _ in 0..same_class {
        probability *= 0.5;
    }
    probability
}

/// Draw a party suited to the dungeon's threat level.
///
/// Fails up front with [`SimError::ThreatTooHigh`] when the threat level is
/// at or above the configured ceiling, and with
/// [`SimError::AssemblyExhausted`] when the attempt bound runs out.
pub fn assemble<R: RandomSource + ?Sized>(
    world: &World,
    dungeon: &Dungeon,
    config: &SimConfig,
    rng: &mut R,
) -> SimResult<Party> {
    let threat = dungeon.threat_level();
    if threat >= config.threat_ceiling {
        return Err(SimError::ThreatTooHigh {
            threat,
            ceiling: config.threat_ceiling,
        });
    }

    let classes = world.classes().as_slice();
    let mut members: Vec<Adventurer> = Vec::with_capacity(world.party_size());
    let mut attempts = 0u64;

    while members.len() < world.party_size() {
        if attempts >= config.max_assembly_attempts {
            tracing::warn!(
                dungeon = %dungeon.name,
                threat,
                attempts,
                accepted = members.len(),
                "party assembly did not converge"
            );
            return Err(SimError::AssemblyExhausted { attempts });
        }
        attempts += 1;

        let class = rng.choose(classes).ok_or(SimError::EmptyPool("classes"))?;
        let level = rng.roll_die(8).min(rng.roll_die(8));
        let same_class = members
            .iter()
            .filter(|a| a.class_name() == class.name)
            .count();

        if rng.uniform() < acceptance(class, level, threat, same_class) {
            members.push(Adventurer::new(class.clone(), level)?);
        }
    }

    tracing::trace!(dungeon = %dungeon.name, attempts, "assembled party");
    Ok(Party::new(world, members)?)
}
