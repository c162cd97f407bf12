use std::collections::BTreeMap;

use serde::Serialize;

use dc_core::World;

use crate::record::RunRecord;

/// Buckets always present in a report, even when empty.
const STANDARD_BUCKETS: std::ops::RangeInclusive<i64> = 1..=9;

/// How one class fared.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassStats {
    /// Class name.
    pub class: String,
    /// Members of this class over all runs.
    pub appearances: u64,
    /// Members of this class in won runs.
    pub wins: u64,
    /// Members of this class in lost runs.
    pub losses: u64,
    /// Sum of their levels.
    pub total_level: u64,
}

impl ClassStats {
    /// Share of appearances in won runs.
    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.appearances)
    }

    /// Mean level per appearance.
    pub fn average_level(&self) -> f64 {
        ratio(self.total_level, self.appearances)
    }
}

/// How runs containing one encounter type went.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EncounterStats {
    /// Encounter type name.
    pub encounter: String,
    /// Occurrences over all runs.
    pub appearances: u64,
    /// Occurrences in won runs.
    pub wins: u64,
}

impl EncounterStats {
    /// Share of occurrences in won runs.
    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.appearances)
    }
}

/// Runs whose threat level rounds up to the same integer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreatBucket {
    /// Runs in the bucket.
    pub appearances: u64,
    /// Runs won.
    pub wins: u64,
    /// Sum of total party levels.
    pub total_party_level: u64,
}

impl ThreatBucket {
    /// Share of runs won.
    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.appearances)
    }
}

/// Statistics over a set of run records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    /// Runs summarized.
    pub runs: u64,
    /// Runs won.
    pub wins: u64,
    /// Adventurers per party, used for average levels.
    pub party_size: usize,
    /// Per class, in catalog order.
    pub classes: Vec<ClassStats>,
    /// Per encounter type, in catalog order.
    pub encounters: Vec<EncounterStats>,
    /// Keyed by `ceil(threat level)`.
    pub threat_buckets: BTreeMap<i64, ThreatBucket>,
    /// Defeats per encounter name, most frequent first.
    pub defeats: Vec<(String, u64)>,
}

impl Report {
    /// Summarize the records.
    pub fn from_records(world: &World, records: &[RunRecord]) -> Self {
        let mut classes: Vec<ClassStats> = world
            .classes()
            .iter()
            .map(|c| ClassStats {
                class: c.name.clone(),
                ..Default::default()
            })
            .collect();
        let mut encounters: Vec<EncounterStats> = world
            .encounters()
            .iter()
            .map(|e| EncounterStats {
                encounter: e.name.clone(),
                ..Default::default()
            })
            .collect();
        let mut threat_buckets: BTreeMap<i64, ThreatBucket> =
            STANDARD_BUCKETS.map(|b| (b, ThreatBucket::default())).collect();
        let mut defeats: BTreeMap<String, u64> = BTreeMap::new();
        let mut wins = 0;

        for record in records {
            let win = u64::from(record.victory);
            wins += win;

            for (stats, tally) in classes.iter_mut().zip(&record.classes) {
                let members = u64::from(tally.count);
                stats.appearances += members;
                stats.total_level += u64::from(tally.total_level);
                stats.wins += members * win;
                stats.losses += members * (1 - win);
            }

            for (stats, (_, n)) in encounters.iter_mut().zip(&record.encounter_types) {
                stats.appearances += *n as u64;
                stats.wins += *n as u64 * win;
            }

            let bucket = threat_buckets
                .entry(record.threat_level.ceil() as i64)
                .or_default();
            bucket.appearances += 1;
            bucket.wins += win;
            bucket.total_party_level += u64::from(record.total_level());

            if !record.defeated_by.is_empty() {
                *defeats.entry(record.defeated_by.clone()).or_insert(0) += 1;
            }
        }

        let mut defeats: Vec<(String, u64)> = defeats.into_iter().collect();
        defeats.sort_by_key(|(_, n)| std::cmp::Reverse(*n));

        Self {
            runs: records.len() as u64,
            wins,
            party_size: world.party_size(),
            classes,
            encounters,
            threat_buckets,
            defeats,
        }
    }

    /// Share of runs won.
    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.runs)
    }

    /// Mean party level per adventurer for runs in a bucket.
    pub fn average_party_level(&self, bucket: &ThreatBucket) -> f64 {
        if self.party_size == 0 {
            return 0.0;
        }
        ratio(bucket.total_party_level, bucket.appearances) / self.party_size as f64
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::runner::run_dungeon;
    use dc_core::{Dungeon, Party};
    use dc_mechanics::ScriptedSource;

    fn record(w: &World, roster: &[(&str, u32)], names: &[&str], rolls: Vec<u32>) -> RunRecord {
        let mut party = Party::from_roster(w, roster).unwrap();
        let mut dungeon = Dungeon::scripted(w, names).unwrap();
        run_dungeon(&mut party, &mut dungeon, &SimConfig::default(), &mut ScriptedSource::with_rolls(rolls));
        RunRecord::new(w, &party, &dungeon).unwrap()
    }

    #[test]
    fn empty_report() {
        let w = World::standard().unwrap();
        let report = Report::from_records(&w, &[]);
        assert_eq!(report.runs, 0);
        assert_eq!(report.win_rate(), 0.0);
        assert_eq!(report.classes.len(), 6);
        assert_eq!(report.encounters.len(), 18);
        assert_eq!(report.threat_buckets.len(), 9);
        assert!(report.defeats.is_empty());
    }

    #[test]
    fn tallies_wins_and_losses() {
        let w = World::standard().unwrap();
        // Won: full guard against orcs. Threat (2 + 2 - 1) / 4 = 0.75.
        let won = record(
            &w,
            &[("Fighter", 2), ("Ranger", 2), ("Mage", 2), ("Fighter", 4)],
            &["Orcs", "Orcs"],
            vec![1],
        );
        // Lost: 8 HP of rogues against a warlord rolling 8, doubled.
        let lost = record(
            &w,
            &[("Rogue", 1), ("Rogue", 1), ("Rogue", 1), ("Rogue", 1)],
            &["Orc Warlord", "Orcs"],
            vec![8],
        );
        let report = Report::from_records(&w, &[won, lost]);

        assert_eq!((report.runs, report.wins), (2, 1));
        assert_eq!(report.win_rate(), 0.5);

        let fighter = &report.classes[0];
        assert_eq!((fighter.appearances, fighter.wins, fighter.losses), (2, 2, 0));
        assert_eq!(fighter.average_level(), 3.0);
        let rogue = &report.classes[5];
        assert_eq!((rogue.appearances, rogue.wins, rogue.losses), (4, 0, 4));
        assert_eq!(rogue.win_rate(), 0.0);

        let orcs = &report.encounters[3];
        assert_eq!(orcs.encounter, "Orcs");
        assert_eq!((orcs.appearances, orcs.wins), (3, 2));

        // Both dungeons have threat 0.75 and 1.5: buckets 1 and 2.
        let one = &report.threat_buckets[&1];
        assert_eq!((one.appearances, one.wins, one.total_party_level), (1, 1, 10));
        assert_eq!(report.average_party_level(one), 2.5);
        let two = &report.threat_buckets[&2];
        assert_eq!((two.appearances, two.wins), (1, 0));

        assert_eq!(report.defeats, vec![("Orc Warlord".to_string(), 1)]);
    }
}
