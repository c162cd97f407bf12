//! Dungeon generation, party assembly, and batch runs for the dungeon crawl
//! simulator.
//!
//! The pieces, in the order a random run uses them: the [`generator`] builds
//! a themed dungeon, [`assembly`] draws a party suited to its threat level,
//! the [`runner`] plays the party through the dungeon, and [`record`] turns
//! the result into an exportable row. [`batch`] and [`sweep`] drive many runs
//! in parallel; [`report`] summarizes the records.

pub mod assembly;
pub mod batch;
/// Configuration for simulation runs.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Run trace events and the event log.
pub mod event;
/// Flat comma-delimited export of run records.
pub mod export;
pub mod generator;
pub mod record;
/// Aggregate statistics over run records.
pub mod report;
/// The run orchestrator.
pub mod runner;
/// Every party composition against a fixed dungeon.
pub mod sweep;

/// Re-export of [`assembly::assemble`].
pub use assembly::assemble;
/// Re-exports of the batch harnesses.
pub use batch::{Scenario, ScriptedSummary, generate_dungeons, run_batch, run_scripted};
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::RunEvent`], and [`event::RunEventKind`].
pub use event::{EventLog, RunEvent, RunEventKind};
/// Re-export of [`export::RecordWriter`].
pub use export::RecordWriter;
/// Re-exports of the generator entry points.
pub use generator::{Blueprint, CitySpecies, generate};
/// Re-export of [`record::RunRecord`].
pub use record::RunRecord;
/// Re-export of [`report::Report`].
pub use report::Report;
/// Re-exports of the orchestrator types.
pub use runner::{DungeonRun, RunOutcome, RunState, run_dungeon};
/// Re-exports of the sweep harness.
pub use sweep::{SweepEntry, SweepResult, compositions, sweep};
