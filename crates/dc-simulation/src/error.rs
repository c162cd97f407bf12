use dc_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while generating, assembling, running, or exporting.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A catalog or model error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The dungeon is too dangerous for party assembly to ever finish.
    #[error("dungeon threat level {threat:.2} is at or above the ceiling {ceiling}")]
    ThreatTooHigh {
        /// The dungeon's threat level.
        threat: f64,
        /// The configured ceiling.
        ceiling: f64,
    },

    /// Party assembly hit its attempt bound.
    #[error("party assembly gave up after {attempts} attempts")]
    AssemblyExhausted {
        /// Candidates drawn before giving up.
        attempts: u64,
    },

    /// A generation pool had nothing to draw from.
    #[error("empty generation pool: {0}")]
    EmptyPool(&'static str),

    /// A dungeon has more encounters than the record columns allow.
    #[error("dungeon has {length} encounters but records hold at most {max}")]
    DungeonTooLong {
        /// Encounters in the dungeon.
        length: usize,
        /// The world's max dungeon length.
        max: usize,
    },

    /// A roster string could not be parsed.
    #[error("invalid roster entry \"{0}\": expected Class:Level")]
    InvalidRoster(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scenario file could not be parsed.
    #[error("cannot parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}
