pub mod config;
pub mod constants;
pub mod entity;
pub mod game;
pub mod input;
pub mod maze;
pub mod random;
pub mod snapshot;

#[cfg(test)]
mod test_helpers;

pub use config::GameConfig;
pub use game::{GameError, GameEvent, GameState, Status};
pub use input::Direction;
pub use maze::{Grid, MazeError, Position};
pub use snapshot::{CellView, Snapshot};
