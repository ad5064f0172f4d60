use std::fmt;
use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, MoveToNextLine, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use common::{CellView, Snapshot};

use crate::input::UiKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiInputError {
    Disconnected,
}

impl fmt::Display for UiInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiInputError::Disconnected => write!(f, "Input source disconnected"),
        }
    }
}

impl std::error::Error for UiInputError {}

pub trait GameUi {
    fn draw(&mut self, snapshot: &Snapshot);
    fn show_message(&mut self, message: &str);
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<UiKey>, UiInputError>;
}

pub struct TerminalUi<W: Write> {
    stdout: W,
    message: String,
    is_raw_mode_owner: bool, // True except in tests.
}

impl TerminalUi<Stdout> {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(Self {
            stdout,
            message: String::new(),
            is_raw_mode_owner: true,
        })
    }
}

impl<W: Write> TerminalUi<W> {
    #[cfg(test)]
    pub fn with_writer(stdout: W) -> Self {
        Self {
            stdout,
            message: String::new(),
            is_raw_mode_owner: false,
        }
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.stdout
    }

    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;

        for row in snapshot.rows() {
            for cell in row {
                let (color, glyph) = cell_style(cell);
                queue!(self.stdout, SetForegroundColor(color), Print(glyph))?;
            }
            queue!(self.stdout, ResetColor, MoveToNextLine(1))?;
        }

        let status = if snapshot.ended {
            "Game over"
        } else {
            "Arrows or WASD to move, r to restart, q to quit"
        };

        let message = self.message.clone();
        queue!(
            self.stdout,
            MoveToNextLine(1),
            Print(format!(
                "Score: {}   Prizes: {}   {}",
                snapshot.score, snapshot.prizes_collected, status
            )),
            MoveToNextLine(1),
            Print(message),
        )?;

        self.stdout.flush()
    }
}

fn cell_style(cell: &CellView) -> (Color, &'static str) {
    if cell.player {
        (Color::Green, "@@")
    } else if cell.prize {
        (Color::Yellow, "<>")
    } else if cell.wall {
        (Color::Grey, "██")
    } else {
        (Color::Reset, "  ")
    }
}

fn key_from_event(key_event: KeyEvent) -> Result<Option<UiKey>, UiInputError> {
    if key_event.kind != KeyEventKind::Press {
        return Ok(None);
    }

    if key_event.modifiers == KeyModifiers::CONTROL {
        return match key_event.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Err(UiInputError::Disconnected),
            _ => Ok(None),
        };
    }

    let key = match key_event.code {
        KeyCode::Up => UiKey::Up,
        KeyCode::Down => UiKey::Down,
        KeyCode::Left => UiKey::Left,
        KeyCode::Right => UiKey::Right,
        KeyCode::Enter => UiKey::Enter,
        KeyCode::Esc => UiKey::Esc,
        KeyCode::Char(c) => UiKey::Char(c),
        _ => return Ok(None),
    };

    Ok(Some(key))
}

impl<W: Write> GameUi for TerminalUi<W> {
    fn draw(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.render(snapshot) {
            eprintln!("failed to draw board: {}", e);
        }
    }

    fn show_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<UiKey>, UiInputError> {
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key_event)) => key_from_event(key_event),
                Ok(_) => Ok(None),
                Err(_) => Err(UiInputError::Disconnected),
            },
            Ok(false) => Ok(None),
            Err(_) => Err(UiInputError::Disconnected),
        }
    }
}

impl<W: Write> Drop for TerminalUi<W> {
    fn drop(&mut self) {
        if self.is_raw_mode_owner {
            execute!(self.stdout, Show, LeaveAlternateScreen).ok();
            terminal::disable_raw_mode().ok();
        }
    }
}
