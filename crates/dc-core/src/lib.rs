//! Core types for the dungeon crawl simulator: catalogs, parties, and dungeons.
//!
//! This crate defines the data model every other crate works on. It holds no
//! randomness: a [`World`] is a validated pair of catalogs (character classes
//! and encounter types) and parties and dungeons are built from it by name.

/// Adventurers and the capabilities they derive from their class.
pub mod adventurer;
/// Name-indexed catalogs that reject duplicate entries.
pub mod catalog;
/// Character class definitions and guard capabilities.
pub mod class;
/// Dungeon model: archetypes, encounter sequences, threat level.
pub mod dungeon;
/// Encounter types, species tags, and encounter instances.
pub mod encounter;
/// Error types used throughout the crate.
pub mod error;
/// Parties and their aggregate capabilities.
pub mod party;
/// The world configuration that owns both catalogs.
pub mod world;

/// Re-export adventurer types.
pub use adventurer::{Adventurer, MAX_LEVEL};
/// Re-export catalog types.
pub use catalog::{Catalog, Named};
/// Re-export class types.
pub use class::{ClassDef, Guard, GuardSet};
/// Re-export dungeon types.
pub use dungeon::{Archetype, Dungeon};
/// Re-export encounter types.
pub use encounter::{Encounter, EncounterKind, EncounterType, Species};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export party types.
pub use party::Party;
/// Re-export world types.
pub use world::{World, WorldDef};
