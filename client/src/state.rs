use std::time::{Duration, Instant};

use common::{
    Direction, GameConfig, GameError, GameEvent, GameState,
    random::{RandomSource, SeededRandom, ThreadRandom},
};

use crate::ui::GameUi;

pub const MAX_START_ATTEMPTS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Playing,
    Finishing { until: Instant },
    GameOver,
}

pub type Game = GameState<Box<dyn RandomSource>>;

fn random_source(seed: Option<u64>, attempt: u64) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed.wrapping_add(attempt))),
        None => Box::new(ThreadRandom::new()),
    }
}

pub struct ClientSession {
    game: Game,
    state: ClientState,
    finish_delay: Duration,
}

impl ClientSession {
    // Regenerates mazes too cramped for the player and the prize.
    pub fn start(config: &GameConfig) -> Result<Self, GameError> {
        let mut attempt = 0;

        loop {
            let rng = random_source(config.seed, attempt);
            match GameState::new(config, rng) {
                Ok(game) => return Ok(Self::from_game(game, config.finish_delay)),
                Err(GameError::NotEnoughSpace { open }) if attempt + 1 < MAX_START_ATTEMPTS => {
                    eprintln!("Maze had {} open cells, generating another.", open);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn from_game(game: Game, finish_delay: Duration) -> Self {
        Self {
            game,
            state: ClientState::Playing,
            finish_delay,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn transition(&mut self, new_state: ClientState) {
        self.state = new_state;
    }

    pub fn banner(&self) -> String {
        let grid = self.game.grid();
        let regions = grid.region_count();
        let mut banner = format!(
            "New {}x{} maze. Each prize is worth {}.",
            grid.height(),
            grid.width(),
            self.game.prize_value()
        );

        if regions > 1 {
            banner.push_str(&format!(
                " It has {} separate regions, so the prize may be out of reach.",
                regions
            ));
        }

        banner
    }

    pub fn apply(
        &mut self,
        direction: Direction,
        now: Instant,
        ui: &mut dyn GameUi,
    ) -> Result<bool, GameError> {
        let (dy, dx) = direction.delta();
        let moved = self.game.move_player(dy, dx)?;

        for event in self.game.drain_events() {
            self.handle_event(event, now, ui);
        }

        Ok(moved)
    }

    pub fn handle_event(&mut self, event: GameEvent, now: Instant, ui: &mut dyn GameUi) {
        match event {
            GameEvent::PrizeCollected { score, .. } => {
                ui.show_message(&format!("Prize! Score is back up to {}.", score));
            }
            GameEvent::Finished { .. } => {
                self.transition(ClientState::Finishing {
                    until: now + self.finish_delay,
                });
            }
        }
    }

    pub fn update(&mut self, now: Instant, ui: &mut dyn GameUi) {
        if let ClientState::Finishing { until } = self.state {
            if now >= until {
                ui.show_message(&format!(
                    "Out of points. You collected {} prizes. Press r to play again or q to quit.",
                    self.game.prizes_collected()
                ));
                self.transition(ClientState::GameOver);
            }
        }

        let snapshot = self.game.tick();
        ui.draw(&snapshot);
    }
}
