use common::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiKey {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    Enter,
    Esc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    Quit,
}

pub fn command_for(key: UiKey) -> Option<Command> {
    match key {
        UiKey::Up => Some(Command::Move(Direction::Up)),
        UiKey::Down => Some(Command::Move(Direction::Down)),
        UiKey::Left => Some(Command::Move(Direction::Left)),
        UiKey::Right => Some(Command::Move(Direction::Right)),
        UiKey::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Command::Move(Direction::Up)),
            's' => Some(Command::Move(Direction::Down)),
            'a' => Some(Command::Move(Direction::Left)),
            'd' => Some(Command::Move(Direction::Right)),
            'r' => Some(Command::Restart),
            'q' => Some(Command::Quit),
            _ => None,
        },
        UiKey::Esc => Some(Command::Quit),
        UiKey::Enter => None,
    }
}
