/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building worlds, parties, or dungeons.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Two catalog entries share a name.
    #[error("duplicate {catalog} name: \"{name}\"")]
    DuplicateName {
        /// Which catalog rejected the entry ("class" or "encounter").
        catalog: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A class name did not resolve to a catalog entry.
    #[error("unknown class: \"{0}\"")]
    UnknownClass(String),

    /// An encounter name did not resolve to a catalog entry.
    #[error("unknown encounter: \"{0}\"")]
    UnknownEncounter(String),

    /// A party was built with the wrong number of adventurers.
    #[error("party must have exactly {expected} adventurers, got {actual}")]
    PartySize {
        /// The world's party size.
        expected: usize,
        /// The number of adventurers supplied.
        actual: usize,
    },

    /// An adventurer level outside `1..=MAX_LEVEL`.
    #[error("invalid level {level} for {class}: levels run from 1 to {max}", max = crate::adventurer::MAX_LEVEL)]
    InvalidLevel {
        /// Class of the offending adventurer.
        class: String,
        /// The rejected level.
        level: u32,
    },

    /// A world definition failed validation.
    #[error("invalid world: {0}")]
    InvalidWorld(String),

    /// A world definition could not be parsed.
    #[error("cannot parse world definition: {0}")]
    Parse(#[from] serde_json::Error),
}
