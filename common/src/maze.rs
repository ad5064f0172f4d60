pub mod maker;

use std::{collections::HashSet, fmt, mem};

use disjoint::DisjointSet;
use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

pub use maker::{BorderWall, Component, MazeMaker};

// Every (dy, dx) in the 3x3 square except those with dy == -dx, which drops the
// centre and the (-1, 1)/(1, -1) diagonal. Order matters: traversal and border
// claiming both follow it.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub y: usize,
    pub x: usize,
}

impl Position {
    pub fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }

    pub fn offset(&self, dy: isize, dx: isize) -> Option<Position> {
        let y = self.y.checked_add_signed(dy)?;
        let x = self.x.checked_add_signed(dx)?;
        Some(Position { y, x })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub y: usize,
    pub x: usize,
    pub is_wall: bool,
    pub has_player: bool,
    pub has_prize: bool,
}

impl Cell {
    fn open(y: usize, x: usize) -> Self {
        Self {
            y,
            x,
            is_wall: false,
            has_player: false,
            has_prize: false,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.y, self.x)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    InvalidDimensions { height: usize, width: usize },
    NoOpenCells,
    RetryLimitExceeded { passes: u32 },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { height, width } => {
                write!(f, "maze dimensions must be positive, got {}x{}", height, width)
            }
            MazeError::NoOpenCells => write!(f, "maze has no open cells"),
            MazeError::RetryLimitExceeded { passes } => {
                write!(f, "no open cell accepted after {} passes", passes)
            }
        }
    }
}

impl std::error::Error for MazeError {}

#[derive(Clone, Debug)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Result<Self, MazeError> {
        if height == 0 || width == 0 {
            return Err(MazeError::InvalidDimensions { height, width });
        }

        // Also rejects boards too large to allocate.
        let len = height
            .checked_mul(width)
            .filter(|&len| len <= isize::MAX as usize / mem::size_of::<Cell>())
            .ok_or(MazeError::InvalidDimensions { height, width })?;

        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::open(y, x));
            }
        }

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    pub fn from_walls(rows: &[Vec<bool>]) -> Result<Self, MazeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let mut grid = Self::new(height, width)?;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::InvalidDimensions {
                    height,
                    width: row.len(),
                });
            }
            for (x, &is_wall) in row.iter().enumerate() {
                grid.cells[y * width + x].is_wall = is_wall;
            }
        }

        Ok(grid)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, y: isize, x: isize) -> Option<usize> {
        if y < 0 || x < 0 {
            return None;
        }

        let (y, x) = (y as usize, x as usize);
        if y >= self.height || x >= self.width {
            return None;
        }

        Some(y * self.width + x)
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if position.y >= self.height || position.x >= self.width {
            return None;
        }
        Some(position.y * self.width + position.x)
    }

    pub fn get(&self, y: isize, x: isize) -> Option<&Cell> {
        self.index(y, x).map(|i| &self.cells[i])
    }

    pub fn at(&self, position: Position) -> Option<&Cell> {
        self.index_of(position).map(|i| &self.cells[i])
    }

    pub fn at_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.index_of(position).map(|i| &mut self.cells[i])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // Row-major.
    pub fn open_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| !cell.is_wall)
    }

    pub fn open_positions(&self) -> Vec<Position> {
        self.open_cells().map(Cell::position).collect()
    }

    pub fn open_count(&self) -> usize {
        self.open_cells().count()
    }

    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = &Cell> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dy, dx)| {
            self.get(position.y as isize + dy, position.x as isize + dx)
        })
    }

    // Generation does not guarantee a single region.
    pub fn region_count(&self) -> usize {
        let mut regions = DisjointSet::with_len(self.cells.len());

        for cell in self.open_cells() {
            let i = cell.y * self.width + cell.x;
            for neighbor in self.neighbors(cell.position()) {
                if !neighbor.is_wall {
                    regions.join(i, neighbor.y * self.width + neighbor.x);
                }
            }
        }

        self.open_cells()
            .map(|cell| regions.root_of(cell.y * self.width + cell.x))
            .collect::<HashSet<_>>()
            .len()
    }

    // Sweeps the open cells row-major, accepting each with probability
    // 1 - threshold. Without `max_passes` this only ends almost surely, after
    // about 1 / (1 - threshold) draws.
    pub fn pick_open_cell(
        &self,
        rng: &mut impl RandomSource,
        threshold: f64,
        max_passes: Option<u32>,
    ) -> Result<Position, MazeError> {
        let hall = self.open_positions();
        if hall.is_empty() {
            return Err(MazeError::NoOpenCells);
        }

        let mut passes: u32 = 0;
        loop {
            if let Some(limit) = max_passes {
                if passes >= limit {
                    return Err(MazeError::RetryLimitExceeded { passes });
                }
            }

            for &position in &hall {
                if rng.biased_bool(threshold) {
                    return Ok(position);
                }
            }

            passes = passes.saturating_add(1);
        }
    }

    pub fn log(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_wall { "██" } else { "  " })
                    .collect::<String>()
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
