// Maze generation:
pub const WALL_THRESHOLD: f64 = 0.5; // Each cell starts as a wall, and each border wall is later removed, with probability 1/2.
pub const OPEN_CELL_THRESHOLD: f64 = 0.998; // Per-candidate acceptance of 0.2% when picking a random open cell, ~500 draws per pick.

// Session defaults:
pub const DEFAULT_HEIGHT: usize = 15;
pub const DEFAULT_WIDTH: usize = 25;
pub const DEFAULT_TICK_MS: u64 = 100; // Redraw interval.
pub const DEFAULT_FINISH_DELAY_MS: u64 = 100; // Pause before the end-of-game screen.
