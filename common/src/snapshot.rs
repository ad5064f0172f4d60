use serde::{Deserialize, Serialize};

use crate::maze::{Grid, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub y: usize,
    pub x: usize,
    pub wall: bool,
    pub player: bool,
    pub prize: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<CellView>, // Row-major.
    pub score: u64,
    pub prize_value: u64,
    pub prizes_collected: u32,
    pub ended: bool,
    pub tick: u64,
    pub player: Option<Position>,
    pub prize: Option<Position>,
}

impl Snapshot {
    pub fn cells_of(grid: &Grid) -> Vec<CellView> {
        grid.cells()
            .iter()
            .map(|cell| CellView {
                y: cell.y,
                x: cell.x,
                wall: cell.is_wall,
                player: cell.has_player,
                prize: cell.has_prize,
            })
            .collect()
    }

    pub fn cell(&self, y: usize, x: usize) -> Option<&CellView> {
        if y >= self.height || x >= self.width {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn log(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.player {
                            "@@"
                        } else if cell.prize {
                            "<>"
                        } else if cell.wall {
                            "██"
                        } else {
                            "  "
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
