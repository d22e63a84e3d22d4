//! Run configuration and hard limits.

/// Raw steps allowed per grid cell before the driver concludes that no
/// command can ever be reached (8 directions × 2 modes).
pub const STALL_STEPS_PER_CELL: u64 = 16;

/// Largest grid, in cells, that a write may grow the program to.
pub const MAX_GRID_CELLS: i128 = 1 << 24;

/// Options that shape a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Stop after this many ticks. `None` runs until `@`.
    pub max_ticks: Option<u64>,
    /// Seed for the random commands. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
