use std::{error::Error, time::Instant};

use common::{GameConfig, GameError};

use crate::{
    input::{Command, command_for},
    state::ClientSession,
    ui::{GameUi, TerminalUi},
};

pub fn run_client(config: &GameConfig) -> Result<(), Box<dyn Error>> {
    let mut ui = TerminalUi::new()?;
    main_loop(config, &mut ui)?;
    Ok(())
}

fn start_session(config: &GameConfig, ui: &mut dyn GameUi) -> Result<ClientSession, GameError> {
    let session = ClientSession::start(config)?;
    ui.show_message(&session.banner());
    Ok(session)
}

pub fn main_loop(config: &GameConfig, ui: &mut dyn GameUi) -> Result<(), GameError> {
    let mut session = start_session(config, ui)?;
    let mut next_tick = Instant::now();

    loop {
        let now = Instant::now();
        if now >= next_tick {
            session.update(now, ui);
            next_tick = now + config.tick_interval;
        }

        let timeout = next_tick.saturating_duration_since(Instant::now());
        let key = match ui.poll_key(timeout) {
            Ok(key) => key,
            Err(_) => break,
        };

        match key.and_then(command_for) {
            Some(Command::Quit) => break,
            Some(Command::Restart) => {
                session = start_session(config, ui)?;
                next_tick = Instant::now();
            }
            Some(Command::Move(direction)) => {
                // A failed move is undone, so play can go on.
                if let Err(e) = session.apply(direction, Instant::now(), ui) {
                    ui.show_message(&format!("Move not taken: {}.", e));
                }
            }
            None => {}
        }
    }

    Ok(())
}
