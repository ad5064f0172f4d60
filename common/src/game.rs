use std::{fmt, mem};

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    config::GameConfig,
    constants::OPEN_CELL_THRESHOLD,
    entity::{Entity, Role},
    maze::{Grid, MazeError, MazeMaker, Position},
    random::{RandomSource, ThreadRandom},
    snapshot::Snapshot,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Status {
    Active,
    Ended,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PrizeCollected { at: Position, score: u64 },
    Finished { score: u64, prizes_collected: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidDimensions { height: usize, width: usize },
    NotEnoughSpace { open: usize },
    Maze(MazeError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDimensions { height, width } => {
                write!(f, "board must be at least 1x1, got {}x{}", height, width)
            }
            GameError::NotEnoughSpace { open } => write!(
                f,
                "maze needs two open cells for the player and the prize, got {}",
                open
            ),
            GameError::Maze(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Maze(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MazeError> for GameError {
    fn from(e: MazeError) -> Self {
        match e {
            MazeError::InvalidDimensions { height, width } => {
                GameError::InvalidDimensions { height, width }
            }
            other => GameError::Maze(other),
        }
    }
}

// Each Player move runs the scoring rule once: landing on the Prize adds
// `prize_value` and re-rolls the Prize, otherwise a score already at zero ends
// the session, otherwise the score drops by one. Once ended, moves and ticks do
// nothing.
pub struct GameState<R: RandomSource = ThreadRandom> {
    grid: Grid,
    player: Entity,
    prize: Entity,
    score: u64,
    prize_value: u64,
    prizes_collected: u32,
    status: Status,
    tick: u64,
    events: Vec<GameEvent>,
    rng: R,
    max_open_cell_passes: Option<u32>,
}

impl<R: RandomSource> GameState<R> {
    pub fn new(config: &GameConfig, mut rng: R) -> Result<Self, GameError> {
        let grid = MazeMaker::generate(config.height, config.width, &mut rng)?;
        Self::from_grid(grid, rng, config.max_open_cell_passes)
    }

    // Neither initial placement is scored.
    pub fn from_grid(
        grid: Grid,
        rng: R,
        max_open_cell_passes: Option<u32>,
    ) -> Result<Self, GameError> {
        let open = grid.open_count();
        if open < 2 {
            return Err(GameError::NotEnoughSpace { open });
        }

        let area = (grid.height() * grid.width()) as u64;
        let mut state = Self {
            grid,
            player: Entity::new(Role::Player),
            prize: Entity::new(Role::Prize),
            score: area,
            prize_value: area.isqrt(),
            prizes_collected: 0,
            status: Status::Active,
            tick: 0,
            events: Vec::new(),
            rng,
            max_open_cell_passes,
        };

        let start = state.pick_open_cell()?;
        state.player.place(&mut state.grid, start);
        state.refresh_prize()?;

        Ok(state)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Option<Position> {
        self.player.position()
    }

    pub fn prize(&self) -> Option<Position> {
        self.prize.position()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn prize_value(&self) -> u64 {
        self.prize_value
    }

    pub fn prizes_collected(&self) -> u32 {
        self.prizes_collected
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_ended(&self) -> bool {
        self.status == Status::Ended
    }

    pub fn move_player(&mut self, dy: isize, dx: isize) -> Result<bool, GameError> {
        let Some(from) = self.player.position().filter(|_| !self.is_ended()) else {
            return Ok(false);
        };

        match self.player.move_by(&mut self.grid, dy, dx) {
            Some(to) => self.score_move(from, to).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn move_player_to(&mut self, y: isize, x: isize) -> Result<bool, GameError> {
        let Some(from) = self.player.position().filter(|_| !self.is_ended()) else {
            return Ok(false);
        };

        match self.player.move_to(&mut self.grid, y, x) {
            Some(to) => self.score_move(from, to).map(|_| true),
            None => Ok(false),
        }
    }

    // If the Prize cannot be re-rolled (a pass cap tripped), the Player goes back
    // to `from` and nothing is scored.
    fn score_move(&mut self, from: Position, to: Position) -> Result<(), GameError> {
        if self.prize.is_at(to) {
            let next = match self.pick_prize_cell(to) {
                Ok(next) => next,
                Err(e) => {
                    self.player.place(&mut self.grid, from);
                    return Err(e);
                }
            };

            self.prize.place(&mut self.grid, next);
            self.score += self.prize_value;
            self.prizes_collected += 1;
            self.events.push(GameEvent::PrizeCollected {
                at: to,
                score: self.score,
            });
        } else if self.score == 0 {
            self.finish();
        } else {
            self.score -= 1;
        }

        Ok(())
    }

    // Unbounded unless a pass cap is configured.
    pub fn refresh_prize(&mut self) -> Result<(), GameError> {
        let Some(player) = self.player.position().filter(|_| !self.is_ended()) else {
            return Ok(());
        };

        let next = self.pick_prize_cell(player)?;
        self.prize.place(&mut self.grid, next);
        Ok(())
    }

    // Re-rolls until the pick lands off `avoid`.
    fn pick_prize_cell(&mut self, avoid: Position) -> Result<Position, GameError> {
        loop {
            let position = self.pick_open_cell()?;
            if position != avoid {
                return Ok(position);
            }
        }
    }

    fn pick_open_cell(&mut self) -> Result<Position, GameError> {
        let position = self.grid.pick_open_cell(
            &mut self.rng,
            OPEN_CELL_THRESHOLD,
            self.max_open_cell_passes,
        )?;
        Ok(position)
    }

    fn finish(&mut self) {
        if self.is_ended() {
            return;
        }

        self.status = Status::Ended;
        self.events.push(GameEvent::Finished {
            score: self.score,
            prizes_collected: self.prizes_collected,
        });
    }

    pub fn tick(&mut self) -> Snapshot {
        if !self.is_ended() {
            self.tick += 1;
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            height: self.grid.height(),
            width: self.grid.width(),
            cells: Snapshot::cells_of(&self.grid),
            score: self.score,
            prize_value: self.prize_value,
            prizes_collected: self.prizes_collected,
            ended: self.is_ended(),
            tick: self.tick,
            player: self.player.position(),
            prize: self.prize.position(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }
}
