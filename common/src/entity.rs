use serde::{Deserialize, Serialize};
use strum::Display;

use crate::maze::{Cell, Grid, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Role {
    Player,
    Prize,
}

impl Role {
    // The Prize never flags the Player's cell.
    pub fn may_occupy(&self, cell: &Cell) -> bool {
        match self {
            Role::Player => !cell.is_wall,
            Role::Prize => !cell.is_wall && !cell.has_player,
        }
    }

    fn flag<'a>(&self, cell: &'a mut Cell) -> &'a mut bool {
        match self {
            Role::Player => &mut cell.has_player,
            Role::Prize => &mut cell.has_prize,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    role: Role,
    position: Option<Position>,
}

impl Entity {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            position: None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_at(&self, position: Position) -> bool {
        self.position == Some(position)
    }

    pub fn place(&mut self, grid: &mut Grid, position: Position) -> bool {
        self.relocate(grid, position);
        self.mark(grid)
    }

    fn relocate(&mut self, grid: &mut Grid, position: Position) {
        if let Some(cell) = self.position.and_then(|old| grid.at_mut(old)) {
            *self.role.flag(cell) = false;
        }
        self.position = Some(position);
    }

    fn mark(&self, grid: &mut Grid) -> bool {
        let Some(cell) = self.position.and_then(|p| grid.at_mut(p)) else {
            return false;
        };

        if !self.role.may_occupy(cell) {
            return false;
        }

        *self.role.flag(cell) = true;
        true
    }

    pub fn target_to(&self, grid: &Grid, y: isize, x: isize) -> Option<Position> {
        grid.get(y, x)
            .filter(|cell| !cell.is_wall)
            .map(Cell::position)
    }

    pub fn target_by(&self, grid: &Grid, dy: isize, dx: isize) -> Option<Position> {
        let target = self.position?.offset(dy, dx)?;
        grid.at(target)
            .filter(|cell| !cell.is_wall)
            .map(Cell::position)
    }

    // Both return the cell moved onto, or `None` for a wall or the edge of the board.
    pub fn move_to(&mut self, grid: &mut Grid, y: isize, x: isize) -> Option<Position> {
        let target = self.target_to(grid, y, x)?;
        self.place(grid, target);
        Some(target)
    }

    pub fn move_by(&mut self, grid: &mut Grid, dy: isize, dx: isize) -> Option<Position> {
        let target = self.target_by(grid, dy, dx)?;
        self.place(grid, target);
        Some(target)
    }
}
