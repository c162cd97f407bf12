use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;

use dc_core::{Dungeon, Party, World};

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::runner::run_dungeon;

/// Win rate of one composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepEntry {
    /// Class names, in catalog order.
    pub party: Vec<String>,
    /// Runs played.
    pub runs: u64,
    /// Runs won.
    pub wins: u64,
    /// `wins / runs`.
    pub win_rate: f64,
}

/// Sweep results, lowest win rate first.
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    /// One entry per composition, ascending by win rate.
    pub entries: Vec<SweepEntry>,
    /// Mean win rate over all compositions.
    pub mean_win_rate: f64,
}

/// All multisets of `size` items drawn from `items`, in lexicographic order
/// of item positions.
pub fn compositions<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    fn extend<T: Clone>(items: &[T], start: usize, size: usize, current: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for (i, item) in items.iter().enumerate().skip(start) {
            current.push(item.clone());
            extend(items, i, size, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(items, 0, size, &mut Vec::with_capacity(size), &mut out);
    out
}

/// Play every `party_size` composition of classes, all at `level`, against
/// the given encounters `runs_per_party` times each.
pub fn sweep<S: AsRef<str>>(
    world: &World,
    encounters: &[S],
    level: u32,
    runs_per_party: u64,
    config: &SimConfig,
) -> SimResult<SweepResult> {
    let dungeon = Dungeon::scripted(world, encounters)?;
    let class_names: Vec<String> = world.classes().iter().map(|c| c.name.clone()).collect();
    let parties = compositions(&class_names, world.party_size());

    let mut entries = parties
        .into_par_iter()
        .enumerate()
        .map(|(index, classes)| -> SimResult<SweepEntry> {
            let roster: Vec<(String, u32)> = classes.iter().map(|c| (c.clone(), level)).collect();
            let party = Party::from_roster(world, &roster)?;
            let seed = config.run_seed(index as u64);
            let party_config = config.clone().with_seed(seed).with_trace(false);

            let mut wins = 0;
            for run in 0..runs_per_party {
                let mut party = party.clone();
                let mut dungeon = dungeon.clone();
                let mut rng = StdRng::seed_from_u64(party_config.run_seed(run));
                if run_dungeon(&mut party, &mut dungeon, &party_config, &mut rng).victory {
                    wins += 1;
                }
            }

            Ok(SweepEntry {
                party: classes,
                runs: runs_per_party,
                wins,
                win_rate: if runs_per_party == 0 {
                    0.0
                } else {
                    wins as f64 / runs_per_party as f64
                },
            })
        })
        .collect::<SimResult<Vec<_>>>()?;

    entries.sort_by(|a, b| a.win_rate.total_cmp(&b.win_rate));
    let mean_win_rate = if entries.is_empty() {
        0.0
    } else {
        entries.iter().map(|e| e.win_rate).sum::<f64>() / entries.len() as f64
    };

    tracing::info!(
        compositions = entries.len(),
        runs_per_party,
        mean_win_rate,
        "sweep finished"
    );
    Ok(SweepResult {
        entries,
        mean_win_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn composition_counts() {
        let classes = ["Fighter", "Ranger", "Mage", "Cleric", "Druid", "Rogue"];
        let parties = compositions(&classes, 4);
        assert_eq!(parties.len(), 126);
        assert_eq!(parties[0], vec!["Fighter"; 4]);
        assert_eq!(parties[1], vec!["Fighter", "Fighter", "Fighter", "Ranger"]);
        assert_eq!(parties.last().unwrap(), &vec!["Rogue"; 4]);
        assert_eq!(compositions(&[1, 2, 3], 2).len(), 6);
    }

    #[test]
    fn compositions_are_distinct_multisets() {
        let parties = compositions(&[0, 1, 2, 3], 3);
        for party in &parties {
            assert!(party.windows(2).all(|w| w[0] <= w[1]));
        }
        let mut deduped = parties.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), parties.len());
    }

    #[test]
    fn sweep_sorts_ascending() {
        let w = World::standard().unwrap();
        let result = sweep(&w, &["Goblins", "Boulder Trap", "Goblin Chieftain"], 3, 20, &SimConfig::default()).unwrap();
        assert_eq!(result.entries.len(), 126);
        assert!(result.entries.windows(2).all(|e| e[0].win_rate <= e[1].win_rate));
        let mean = result.entries.iter().map(|e| e.win_rate).sum::<f64>() / 126.0;
        assert!((result.mean_win_rate - mean).abs() < 1e-12);
        assert!(result.entries.iter().all(|e| e.runs == 20 && e.wins <= 20));
    }

    #[test]
    fn sweep_is_reproducible() {
        let w = World::standard().unwrap();
        let config = SimConfig::default().with_seed(5);
        let a = sweep(&w, &["Skeletons", "Snake Pit", "Ghosts"], 2, 10, &config).unwrap();
        let b = sweep(&w, &["Skeletons", "Snake Pit", "Ghosts"], 2, 10, &config).unwrap();
        assert_eq!(a.entries, b.entries);
    }

    #[test]
    fn sweep_rejects_bad_input() {
        let w = World::standard().unwrap();
        let config = SimConfig::default();
        assert!(matches!(
            sweep(&w, &["Beholder"], 3, 1, &config),
            Err(SimError::Core(dc_core::CoreError::UnknownEncounter(_)))
        ));
        assert!(matches!(
            sweep(&w, &["Goblins"], 0, 1, &config),
            Err(SimError::Core(dc_core::CoreError::InvalidLevel { .. }))
        ));
    }
}
