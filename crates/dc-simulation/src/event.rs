/// What happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEventKind {
    /// The party reached an encounter.
    Encountering {
        /// The encounter's name.
        encounter: String,
        /// Party hit points on arrival.
        hp: f64,
    },
    /// The encounter dealt its damage.
    Struck {
        /// The encounter's name.
        encounter: String,
        /// Total of the damage dice.
        rolled: i32,
        /// Damage actually taken.
        applied: i32,
        /// Whether the damage was doubled.
        doubled: bool,
        /// Party hit points afterwards.
        hp: f64,
    },
    /// The party healed after beating an encounter.
    Healed {
        /// Party hit points after healing.
        hp: f64,
    },
    /// The party fell.
    Defeated {
        /// The encounter that finished the party.
        encounter: String,
    },
    /// The run ended.
    Completed {
        /// Whether every encounter was beaten.
        victory: bool,
    },
}

/// A record of something that happened during a run.
#[derive(Debug, Clone)]
pub struct RunEvent {
    /// Index of the encounter being played.
    pub step: usize,
    /// The specific kind of event.
    pub kind: RunEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl RunEvent {
    /// Create a run event.
    pub fn new(step: usize, kind: RunEventKind, description: impl Into<String>) -> Self {
        Self {
            step,
            kind,
            description: description.into(),
        }
    }
}

/// The events of one traced run, in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<RunEvent>,
}

impl EventLog {
    /// Append an event.
    pub fn push(&mut self, event: RunEvent) {
        self.events.push(event);
    }

    /// All recorded events.
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
