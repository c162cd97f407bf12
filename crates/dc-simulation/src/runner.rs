use dc_core::{Dungeon, Party};
use dc_mechanics::{RandomSource, resolve};

use crate::config::SimConfig;
use crate::event::{EventLog, RunEvent, RunEventKind};

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not started.
    Pending,
    /// About to resolve the encounter at this index.
    Encountering(usize),
    /// Survived the encounter at this index; healing comes next.
    Beaten(usize),
    /// The encounter at this index dropped the party to zero or below.
    PartyDefeated(usize),
    /// Finished.
    Complete {
        /// Whether every encounter was beaten.
        victory: bool,
    },
}

/// What a finished run reports.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Every encounter was beaten.
    pub victory: bool,
    /// Encounters in the dungeon.
    pub encounter_count: usize,
    /// Encounters beaten.
    pub beaten_count: usize,
    /// The first encounter not beaten, when the party lost.
    pub defeated_by: Option<String>,
    /// Party hit points at the end of the run.
    pub final_hp: f64,
    /// Trace events; empty unless tracing was enabled.
    pub events: EventLog,
}

/// A run in progress.
///
/// Borrows the party and the dungeon mutably for its whole lifetime: the
/// party loses and regains hit points, and the dungeon's encounters get
/// their `encountered` and `beaten` flags set.
pub struct DungeonRun<'a> {
    party: &'a mut Party,
    dungeon: &'a mut Dungeon,
    state: RunState,
    trace: bool,
    events: EventLog,
}

impl std::fmt::Debug for DungeonRun<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DungeonRun")
            .field("dungeon", &self.dungeon.name)
            .field("state", &self.state)
            .field("hp", &self.party.current_hp())
            .field("events", &self.events.len())
            .finish()
    }
}

impl<'a> DungeonRun<'a> {
    /// Start a run. Nothing happens until the first [`step`](Self::step).
    pub fn new(party: &'a mut Party, dungeon: &'a mut Dungeon, config: &SimConfig) -> Self {
        Self {
            party,
            dungeon,
            state: RunState::Pending,
            trace: config.trace,
            events: EventLog::default(),
        }
    }

    /// The current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Returns true once the run has completed.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, RunState::Complete { .. })
    }

    /// Advance by one transition and return the new state.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> RunState {
        self.state = match self.state {
            RunState::Pending => self.enter(0),
            RunState::Encountering(index) => self.encounter(index, rng),
            RunState::Beaten(index) => {
                self.party.heal();
                self.record(index, RunEventKind::Healed {
                    hp: self.party.current_hp(),
                });
                self.enter(index + 1)
            }
            RunState::PartyDefeated(index) => {
                let encounter = self.dungeon.encounters()[index].name().to_string();
                self.record(index, RunEventKind::Defeated { encounter });
                self.complete(index, false)
            }
            done @ RunState::Complete { .. } => done,
        };
        self.state
    }

    /// Step until complete and report the outcome.
    pub fn finish<R: RandomSource + ?Sized>(mut self, rng: &mut R) -> RunOutcome {
        while !self.is_complete() {
            self.step(rng);
        }
        let victory = matches!(self.state, RunState::Complete { victory: true });
        RunOutcome {
            victory,
            encounter_count: self.dungeon.len(),
            beaten_count: self.dungeon.beaten_count(),
            defeated_by: self
                .dungeon
                .first_unbeaten()
                .filter(|_| !victory)
                .map(|e| e.name().to_string()),
            final_hp: self.party.current_hp(),
            events: self.events,
        }
    }

    fn enter(&mut self, index: usize) -> RunState {
        if index < self.dungeon.len() {
            RunState::Encountering(index)
        } else {
            self.complete(index, true)
        }
    }

    fn encounter<R: RandomSource + ?Sized>(&mut self, index: usize, rng: &mut R) -> RunState {
        self.dungeon.mark_encountered(index);
        let encounter = &self.dungeon.encounters()[index];
        let name = encounter.name().to_string();
        let hp = self.party.current_hp();

        let strike = resolve(self.party, &encounter.encounter_type, rng);
        let defeated = self.party.is_defeated();
        if !defeated {
            self.dungeon.mark_beaten(index);
        }

        if self.trace {
            self.record(index, RunEventKind::Encountering {
                encounter: name.clone(),
                hp,
            });
            self.record(index, RunEventKind::Struck {
                encounter: name,
                rolled: strike.rolled,
                applied: strike.applied(),
                doubled: strike.doubled,
                hp: self.party.current_hp(),
            });
        }

        if defeated {
            RunState::PartyDefeated(index)
        } else {
            RunState::Beaten(index)
        }
    }

    fn complete(&mut self, index: usize, victory: bool) -> RunState {
        self.record(index, RunEventKind::Completed { victory });
        RunState::Complete { victory }
    }

    fn record(&mut self, step: usize, kind: RunEventKind) {
        if !self.trace {
            return;
        }
        let description = describe(&kind);
        tracing::debug!(dungeon = %self.dungeon.name, step, "{description}");
        self.events.push(RunEvent::new(step, kind, description));
    }
}

fn describe(kind: &RunEventKind) -> String {
    match kind {
        RunEventKind::Encountering { encounter, hp } => format!("Encountering {encounter} at {hp} HP"),
        RunEventKind::Struck {
            encounter,
            rolled,
            applied,
            doubled,
            hp,
        } => {
            let doubled = if *doubled { " (doubled)" } else { "" };
            format!("{encounter} rolled {rolled}, dealt {applied}{doubled}; remaining HP {hp}")
        }
        RunEventKind::Healed { hp } => format!("Healed to {hp} HP"),
        RunEventKind::Defeated { encounter } => format!("Defeated by {encounter}"),
        RunEventKind::Completed { victory: true } => "Victory".to_string(),
        RunEventKind::Completed { victory: false } => "Defeat".to_string(),
    }
}

/// Play the party through every encounter of the dungeon.
pub fn run_dungeon<R: RandomSource + ?Sized>(
    party: &mut Party,
    dungeon: &mut Dungeon,
    config: &SimConfig,
    rng: &mut R,
) -> RunOutcome {
    let outcome = DungeonRun::new(party, dungeon, config).finish(rng);
    tracing::trace!(
        victory = outcome.victory,
        beaten = outcome.beaten_count,
        encounters = outcome.encounter_count,
        "run finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::World;
    use dc_mechanics::ScriptedSource;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world() -> World {
        World::standard().unwrap()
    }

    fn party(roster: &[(&str, u32)]) -> Party {
        Party::from_roster(&world(), roster).unwrap()
    }

    #[test]
    fn strong_party_clears_goblins() {
        let w = world();
        // Full guard, 24 HP; goblins deal at most 3 each.
        let mut p = party(&[("Fighter", 5), ("Ranger", 5), ("Mage", 5), ("Cleric", 5)]);
        let mut d = Dungeon::scripted(&w, &["Goblins", "Goblins", "Goblin Chieftain"]).unwrap();
        let mut src = ScriptedSource::with_rolls(vec![3]);
        let outcome = run_dungeon(&mut p, &mut d, &SimConfig::default(), &mut src);

        assert!(outcome.victory);
        assert_eq!(outcome.encounter_count, 3);
        assert_eq!(outcome.beaten_count, 3);
        assert_eq!(outcome.defeated_by, None);
        assert!(d.encounters().iter().all(|e| e.encountered && e.beaten));
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn defeat_stops_the_run() {
        let w = world();
        // 8 HP, no guards: Orc Warlord rolls 8 doubled to 16.
        let mut p = party(&[("Rogue", 1), ("Rogue", 1), ("Rogue", 1), ("Rogue", 1)]);
        let mut d = Dungeon::scripted(&w, &["Orc Warlord", "Goblins"]).unwrap();
        let mut src = ScriptedSource::with_rolls(vec![8]);
        let outcome = run_dungeon(&mut p, &mut d, &SimConfig::default(), &mut src);

        assert!(!outcome.victory);
        assert_eq!(outcome.beaten_count, 0);
        assert_eq!(outcome.defeated_by.as_deref(), Some("Orc Warlord"));
        assert!(d.encounters()[0].encountered);
        assert!(!d.encounters()[0].beaten);
        assert!(!d.encounters()[1].encountered);
        assert_eq!(outcome.final_hp, 8.0 - 16.0);
    }

    #[test]
    fn exactly_zero_hp_is_a_defeat() {
        let w = world();
        // 8 HP, Melee guard only; Skeletons roll 3 doubled to 6, then Goblins 1 doubled to 2.
        let mut p = party(&[("Fighter", 1), ("Rogue", 1), ("Rogue", 1), ("Rogue", 1)]);
        let mut d = Dungeon::scripted(&w, &["Skeletons", "Goblins"]).unwrap();
        let mut src = ScriptedSource::with_rolls(vec![3, 1]);
        let outcome = run_dungeon(&mut p, &mut d, &SimConfig::default(), &mut src);

        assert!(!outcome.victory);
        assert_eq!(outcome.beaten_count, 1);
        assert_eq!(outcome.final_hp, 0.0);
        assert_eq!(outcome.defeated_by.as_deref(), Some("Goblins"));
    }

    #[test]
    fn healing_between_encounters() {
        let w = world();
        // Two clerics heal 1.0 after each beaten encounter.
        let mut p = party(&[("Cleric", 1), ("Cleric", 1), ("Fighter", 1), ("Ranger", 1)]);
        let mut d = Dungeon::scripted(&w, &["Orcs", "Orcs"]).unwrap();
        let mut run = DungeonRun::new(&mut p, &mut d, &SimConfig::default());
        let mut src = ScriptedSource::with_rolls(vec![3]);

        assert_eq!(run.step(&mut src), RunState::Encountering(0));
        assert_eq!(run.step(&mut src), RunState::Beaten(0));
        assert_eq!(run.party.current_hp(), 5.0);
        assert_eq!(run.step(&mut src), RunState::Encountering(1));
        assert_eq!(run.party.current_hp(), 6.0);
        assert_eq!(run.step(&mut src), RunState::Beaten(1));
        assert_eq!(run.step(&mut src), RunState::Complete { victory: true });
        assert_eq!(run.step(&mut src), RunState::Complete { victory: true });
    }

    #[test]
    fn empty_dungeon_is_a_victory() {
        let w = world();
        let mut p = party(&[("Mage", 1), ("Mage", 1), ("Mage", 1), ("Mage", 1)]);
        let names: [&str; 0] = [];
        let mut d = Dungeon::scripted(&w, &names).unwrap();
        let outcome = run_dungeon(&mut p, &mut d, &SimConfig::default(), &mut ScriptedSource::default());
        assert!(outcome.victory);
        assert_eq!(outcome.encounter_count, 0);
    }

    #[test]
    fn trace_records_events() {
        let w = world();
        let mut p = party(&[("Rogue", 1), ("Rogue", 1), ("Rogue", 1), ("Rogue", 1)]);
        let mut d = Dungeon::scripted(&w, &["Goblins", "Orc Warlord"]).unwrap();
        let mut src = ScriptedSource::with_rolls(vec![1, 8]);
        let config = SimConfig::default().with_trace(true);
        let outcome = run_dungeon(&mut p, &mut d, &config, &mut src);

        let kinds: Vec<_> = outcome.events.events().iter().map(|e| &e.kind).collect();
        assert!(matches!(kinds[0], RunEventKind::Encountering { hp, .. } if *hp == 8.0));
        assert!(matches!(kinds[1], RunEventKind::Struck { applied: 2, doubled: true, .. }));
        assert!(matches!(kinds[2], RunEventKind::Healed { .. }));
        assert!(matches!(kinds.last(), Some(RunEventKind::Completed { victory: false })));
        assert_eq!(outcome.events.events().iter().filter(|e| e.step == 1).count(), 4);
        assert_eq!(outcome.events.events()[0].description, "Encountering Goblins at 8 HP");
    }

    proptest! {
        #[test]
        fn outcome_counts_are_consistent(seed in any::<u64>()) {
            let w = world();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut d = crate::generator::generate(&w, &mut rng).unwrap();
            let mut p = party(&[("Fighter", 3), ("Cleric", 2), ("Druid", 2), ("Ranger", 1)]);
            let outcome = run_dungeon(&mut p, &mut d, &SimConfig::default(), &mut rng);

            prop_assert_eq!(outcome.encounter_count, d.len());
            prop_assert!(outcome.beaten_count <= outcome.encounter_count);
            prop_assert_eq!(outcome.victory, outcome.beaten_count == outcome.encounter_count);
            prop_assert_eq!(outcome.victory, outcome.defeated_by.is_none());
            prop_assert!(p.current_hp() <= p.total_hp());
            if outcome.victory {
                prop_assert!(p.current_hp() > 0.0);
            }
        }
    }
}
