/// Default ceiling on dungeon threat level for party assembly.
pub const DEFAULT_THREAT_CEILING: f64 = 10.0;

/// Default bound on candidates drawn during party assembly.
pub const DEFAULT_MAX_ASSEMBLY_ATTEMPTS: u64 = 100_000;

/// Configuration for simulation runs.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic runs.
    pub seed: u64,
    /// Record a per-encounter trace of every run.
    pub trace: bool,
    /// Party assembly refuses dungeons at or above this threat level.
    pub threat_ceiling: f64,
    /// Candidates party assembly may draw before giving up.
    pub max_assembly_attempts: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            trace: false,
            threat_ceiling: DEFAULT_THREAT_CEILING,
            max_assembly_attempts: DEFAULT_MAX_ASSEMBLY_ATTEMPTS,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable the per-encounter trace.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Set the threat ceiling for party assembly.
    pub fn with_threat_ceiling(mut self, ceiling: f64) -> Self {
        self.threat_ceiling = ceiling;
        self
    }

    /// Set the attempt bound for party assembly.
    pub fn with_max_assembly_attempts(mut self, attempts: u64) -> Self {
        self.max_assembly_attempts = attempts;
        self
    }

    /// Seed for the `index`-th run of a batch.
    ///
    /// Depends only on the base seed and the index, so a batch gives the same
    /// records no matter how its runs are scheduled across threads.
    pub fn run_seed(&self, index: u64) -> u64 {
        let mut z = self
            .seed
            .wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}
