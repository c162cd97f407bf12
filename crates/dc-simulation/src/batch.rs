//! Random, scripted, and parallel batch runs.
//!
//! Every run owns its own [`StdRng`] seeded from the base seed and the run
//! index, so a batch produces the same results regardless of how rayon
//! schedules it. Results are collected in run order.

use std::collections::BTreeMap;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use dc_core::{Dungeon, Party, World};

use crate::assembly::assemble;
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::event::EventLog;
use crate::generator::generate;
use crate::record::RunRecord;
use crate::runner::run_dungeon;

/// Dungeons redrawn per run before a too-dangerous draw becomes an error.
const MAX_REDRAWS: u32 = 1_000;

/// Generate `count` dungeons, each from its own run seed.
pub fn generate_dungeons(world: &World, config: &SimConfig, count: u64) -> SimResult<Vec<Dungeon>> {
    (0..count)
        .into_par_iter()
        .map(|index| generate(world, &mut StdRng::seed_from_u64(config.run_seed(index))))
        .collect()
}

/// Generate, assemble, run, and record `runs` random dungeons in parallel.
pub fn run_batch(world: &World, config: &SimConfig, runs: u64) -> SimResult<Vec<RunRecord>> {
    let records = (0..runs)
        .into_par_iter()
        .map(|index| run_random(world, config, index))
        .collect::<SimResult<Vec<_>>>()?;

    let wins = records.iter().filter(|r| r.victory).count();
    tracing::info!(runs, wins, seed = config.seed, "batch finished");
    Ok(records)
}

fn run_random(world: &World, config: &SimConfig, index: u64) -> SimResult<RunRecord> {
    let mut rng = StdRng::seed_from_u64(config.run_seed(index));

    let mut dungeon = generate(world, &mut rng)?;
    let mut redraws = 0;
    while dungeon.threat_level() >= config.threat_ceiling && redraws < MAX_REDRAWS {
        tracing::warn!(
            run = index,
            dungeon = %dungeon.name,
            threat = dungeon.threat_level(),
            "dungeon too dangerous for any party, drawing another"
        );
        dungeon = generate(world, &mut rng)?;
        redraws += 1;
    }

    let mut party = assemble(world, &dungeon, config, &mut rng)?;
    let outcome = run_dungeon(&mut party, &mut dungeon, config, &mut rng);
    tracing::debug!(
        run = index,
        dungeon = %dungeon.name,
        threat = dungeon.threat_level(),
        party = %party,
        victory = outcome.victory,
        "run complete"
    );
    RunRecord::new(world, &party, &dungeon)
}

/// A fixed party against a fixed list of encounters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Party members as (class, level).
    pub party: Vec<(String, u32)>,
    /// Encounter names in order.
    pub encounters: Vec<String>,
}

impl Scenario {
    /// Create a scenario.
    pub fn new(party: Vec<(String, u32)>, encounters: Vec<String>) -> Self {
        Self { party, encounters }
    }

    /// Parse `"Ranger:3,Fighter:4,..."` and `"Goblins,Boulder Trap,..."`.
    pub fn parse(roster: &str, encounters: &str) -> SimResult<Self> {
        Ok(Self::new(parse_roster(roster)?, parse_list(encounters)))
    }

    /// Parse a scenario from JSON.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build the party and the dungeon, validating every name.
    pub fn build(&self, world: &World) -> SimResult<(Party, Dungeon)> {
        let party = Party::from_roster(world, &self.party)?;
        let dungeon = Dungeon::scripted(world, &self.encounters)?;
        Ok((party, dungeon))
    }
}

/// Parse a comma-separated `Class:Level` list.
pub fn parse_roster(roster: &str) -> SimResult<Vec<(String, u32)>> {
    roster
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (class, level) = entry
                .split_once(':')
                .ok_or_else(|| SimError::InvalidRoster(entry.to_string()))?;
            let level = level
                .trim()
                .parse::<u32>()
                .map_err(|_| SimError::InvalidRoster(entry.to_string()))?;
            Ok((class.trim().to_string(), level))
        })
        .collect()
}

/// Parse a comma-separated list of names.
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Results of repeated scripted runs.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptedSummary {
    /// Runs played.
    pub runs: u64,
    /// Runs won.
    pub wins: u64,
    /// Runs lost.
    pub losses: u64,
    /// `wins / runs`, 0 when no runs were played.
    pub win_rate: f64,
    /// How often each encounter ended a run.
    pub defeated_by: BTreeMap<String, u64>,
    /// Trace of the first run when tracing is enabled.
    #[serde(skip)]
    pub trace: EventLog,
}

/// Play the scenario `runs` times in parallel.
pub fn run_scripted(
    world: &World,
    scenario: &Scenario,
    config: &SimConfig,
    runs: u64,
) -> SimResult<ScriptedSummary> {
    let (party, dungeon) = scenario.build(world)?;

    let outcomes: Vec<_> = (0..runs)
        .into_par_iter()
        .map(|index| {
            let mut party = party.clone();
            let mut dungeon = dungeon.clone();
            let mut rng = StdRng::seed_from_u64(config.run_seed(index));
            let trace = config.trace && index == 0;
            let run_config = config.clone().with_trace(trace);
            run_dungeon(&mut party, &mut dungeon, &run_config, &mut rng)
        })
        .collect();

    let wins = outcomes.iter().filter(|o| o.victory).count() as u64;
    let mut defeated_by = BTreeMap::new();
    for name in outcomes.iter().filter_map(|o| o.defeated_by.as_ref()) {
        *defeated_by.entry(name.clone()).or_insert(0) += 1;
    }
    let trace = outcomes
        .into_iter()
        .next()
        .map(|o| o.events)
        .unwrap_or_default();

    let summary = ScriptedSummary {
        runs,
        wins,
        losses: runs - wins,
        win_rate: if runs == 0 { 0.0 } else { wins as f64 / runs as f64 },
        defeated_by,
        trace,
    };
    tracing::info!(runs, wins, "scripted runs finished");
    Ok(summary)
}
