use crate::{constants::WALL_THRESHOLD, random::RandomSource};

use super::{Grid, MazeError, NEIGHBOR_OFFSETS, Position};

// Cells in the order the traversal visited them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Component {
    pub cells: Vec<Position>,
}

// Recorded once, against the first open cell in row-major order that touches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderWall {
    pub position: Position,
    pub owner: Position,
}

// Traversal and claim markers live here, not on the cells, and `generate`
// consumes the maker.
pub struct MazeMaker<R: RandomSource> {
    pub grid: Grid,
    rng: R,
    visited: Vec<bool>,
    claimed: Vec<bool>,
    borders: Vec<Vec<usize>>, // Per open cell: indices into the claimed walls.
}

impl<R: RandomSource> MazeMaker<R> {
    pub fn new(height: usize, width: usize, rng: R) -> Result<Self, MazeError> {
        let grid = Grid::new(height, width)?;
        Ok(Self::from_grid(grid, rng))
    }

    pub fn from_grid(grid: Grid, rng: R) -> Self {
        let len = grid.cells.len();
        Self {
            grid,
            rng,
            visited: vec![false; len],
            claimed: vec![false; len],
            borders: vec![Vec::new(); len],
        }
    }

    pub fn generate(height: usize, width: usize, rng: R) -> Result<Grid, MazeError> {
        let mut maker = Self::new(height, width, rng)?;

        maker.randomize_walls();
        let components = maker.find_components();
        let walls = maker.find_borders();
        maker.remove_border_walls(&components, &walls);

        Ok(maker.into_grid())
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn randomize_walls(&mut self) {
        for cell in self.grid.cells.iter_mut() {
            cell.is_wall = self.rng.biased_bool(WALL_THRESHOLD);
        }
    }

    fn hall(&self) -> Vec<usize> {
        self.grid
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_wall)
            .map(|(i, _)| i)
            .collect()
    }

    fn open_neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let cell = &self.grid.cells[i];
        let (y, x) = (cell.y as isize, cell.x as isize);

        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dy, dx)| {
            self.grid
                .index(y + dy, x + dx)
                .filter(|&j| !self.grid.cells[j].is_wall)
        })
    }

    // Components come out in row-major order of their first cell, cells within
    // one in depth-first pre-order.
    pub fn find_components(&mut self) -> Vec<Component> {
        let mut components = Vec::new();
        let mut stack = Vec::new();

        for start in self.hall() {
            if self.visited[start] {
                continue;
            }

            let mut component = Component::default();
            stack.push(start);

            while let Some(i) = stack.pop() {
                if self.visited[i] {
                    continue;
                }
                self.visited[i] = true;
                component.cells.push(self.grid.cells[i].position());

                // Reversed so the first offset is explored first.
                let next: Vec<usize> = self.open_neighbors(i).collect();
                stack.extend(next.into_iter().rev().filter(|&j| !self.visited[j]));
            }

            components.push(component);
        }

        self.visited.fill(false);
        components
    }

    pub fn find_borders(&mut self) -> Vec<BorderWall> {
        let mut found = Vec::new();

        for i in self.hall() {
            let owner = self.grid.cells[i].position();
            let (y, x) = (owner.y as isize, owner.x as isize);

            for &(dy, dx) in NEIGHBOR_OFFSETS.iter() {
                let Some(j) = self.grid.index(y + dy, x + dx) else {
                    continue;
                };
                if !self.grid.cells[j].is_wall || self.claimed[j] {
                    continue;
                }

                self.claimed[j] = true;
                self.borders[i].push(found.len());
                found.push(BorderWall {
                    position: self.grid.cells[j].position(),
                    owner,
                });
            }
        }

        found
    }

    // `walls` must come from `find_borders` on this maker. Nothing checks that the
    // result is connected.
    pub fn remove_border_walls(
        &mut self,
        components: &[Component],
        walls: &[BorderWall],
    ) -> usize {
        let mut removed = 0;

        for component in components {
            for &position in &component.cells {
                let Some(i) = self.grid.index_of(position) else {
                    continue;
                };

                for &k in &self.borders[i] {
                    let Some(j) = walls
                        .get(k)
                        .and_then(|wall| self.grid.index_of(wall.position))
                    else {
                        continue;
                    };
                    if self.rng.biased_bool(WALL_THRESHOLD) {
                        self.grid.cells[j].is_wall = false;
                        removed += 1;
                    }
                }
            }
        }

        self.claimed.fill(false);
        for border in self.borders.iter_mut() {
            border.clear();
        }

        removed
    }

    #[cfg(test)]
    fn is_scratch_clear(&self) -> bool {
        !self.visited.iter().any(|&v| v)
            && !self.claimed.iter().any(|&c| c)
            && self.borders.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        random::SeededRandom,
        test_helpers::{ScriptedRandom, grid_from_rows},
    };

    fn maker_for(rows: &[&str], draws: &[bool]) -> MazeMaker<ScriptedRandom> {
        MazeMaker::from_grid(grid_from_rows(rows), ScriptedRandom::new(draws))
    }

    #[test]
    fn randomize_walls_draws_once_per_cell_row_major() {
        let draws = ScriptedRandom::new(&[true, false, false, true]);
        let mut maker = MazeMaker::new(2, 2, draws).unwrap();
        maker.randomize_walls();

        assert_eq!(maker.grid.log(), "██  \n  ██");
    }

    #[test]
    fn components_follow_depth_first_pre_order() {
        let mut maker = maker_for(&["...", "#.#", "..."], &[]);
        let components = maker.find_components();

        assert_eq!(components.len(), 1);
        assert_eq!(
            components[0].cells,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 0),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn components_do_not_cross_excluded_diagonals() {
        let mut maker = maker_for(&["#.", ".#"], &[]);
        let components = maker.find_components();

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].cells, vec![Position::new(0, 1)]);
        assert_eq!(components[1].cells, vec![Position::new(1, 0)]);
    }

    #[test]
    fn components_partition_the_hall() {
        let mut maker = MazeMaker::new(12, 17, SeededRandom::new(3)).unwrap();
        maker.randomize_walls();
        let components = maker.find_components();

        let mut seen: Vec<Position> = components.iter().flat_map(|c| c.cells.clone()).collect();
        seen.sort_by_key(|p| (p.y, p.x));
        assert_eq!(seen, maker.grid.open_positions());
        assert!(components.iter().all(|c| !c.cells.is_empty()));
        assert_eq!(components.len(), maker.grid.region_count());
    }

    #[test]
    fn visited_markers_are_cleared_after_discovery() {
        let mut maker = maker_for(&["..", ".."], &[]);
        maker.find_components();
        assert!(maker.is_scratch_clear());
    }

    #[test]
    fn each_wall_is_claimed_once_by_the_first_open_cell() {
        // (0, 1) and (1, 0) both touch (1, 1), but (0, 0) comes first in row-major order.
        let mut maker = maker_for(&["..", ".#"], &[]);
        let borders = maker.find_borders();

        assert_eq!(
            borders,
            vec![BorderWall {
                position: Position::new(1, 1),
                owner: Position::new(0, 0),
            }]
        );
    }

    #[test]
    fn walls_on_an_excluded_diagonal_are_not_borders() {
        let mut maker = maker_for(&["#.", "##"], &[]);
        let borders = maker.find_borders();

        // From (0, 1): (0, 0) via (0, -1) and (1, 1) via (1, 0). (1, 0) is the
        // excluded (1, -1) diagonal.
        let walls: Vec<Position> = borders.iter().map(|b| b.position).collect();
        assert_eq!(walls, vec![Position::new(0, 0), Position::new(1, 1)]);
    }

    #[test]
    fn repair_opens_walls_on_true_draws_only() {
        let mut maker = maker_for(&["#.", "##"], &[true, false]);
        let components = maker.find_components();
        let walls = maker.find_borders();
        let removed = maker.remove_border_walls(&components, &walls);

        assert_eq!(removed, 1);
        assert_eq!(maker.grid.log(), "    \n████");
        assert!(maker.is_scratch_clear());
    }

    #[test]
    fn repair_can_merge_two_components() {
        // Two pockets separated by a column of walls.
        let mut maker = maker_for(&[".#.", ".#."], &[true, true]);
        let components = maker.find_components();
        assert_eq!(components.len(), 2);

        let walls = maker.find_borders();
        maker.remove_border_walls(&components, &walls);

        assert_eq!(maker.grid.region_count(), 1);
    }

    #[test]
    fn generate_produces_in_bounds_cells() {
        let mut rng = SeededRandom::new(11);
        for (height, width) in [(2, 2), (3, 7), (10, 10), (25, 40)] {
            let grid = MazeMaker::generate(height, width, &mut rng).unwrap();
            assert_eq!(grid.cells().len(), height * width);
            for (i, cell) in grid.cells().iter().enumerate() {
                assert_eq!((cell.y, cell.x), (i / width, i % width));
                assert!(!cell.has_player && !cell.has_prize);
            }
        }
    }

    #[test]
    fn generate_rejects_zero_dimensions() {
        let result = MazeMaker::generate(0, 4, SeededRandom::new(1));
        assert!(matches!(
            result,
            Err(MazeError::InvalidDimensions { height: 0, width: 4 })
        ));
    }

    #[test]
    fn repair_thins_out_walls() {
        let mut rng = SeededRandom::new(21);
        let mut before = 0;
        let mut after = 0;

        for _ in 0..20 {
            let mut maker = MazeMaker::new(20, 20, &mut rng).unwrap();
            maker.randomize_walls();
            before += maker.grid.cells().iter().filter(|c| c.is_wall).count();

            let components = maker.find_components();
            let walls = maker.find_borders();
            maker.remove_border_walls(&components, &walls);
            after += maker.grid.cells().iter().filter(|c| c.is_wall).count();
        }

        assert!(after < before);
    }

    #[test]
    fn repair_never_splits_regions() {
        let mut rng = SeededRandom::new(8);

        for _ in 0..50 {
            let mut maker = MazeMaker::new(15, 15, &mut rng).unwrap();
            maker.randomize_walls();
            let components = maker.find_components();
            let walls = maker.find_borders();
            maker.remove_border_walls(&components, &walls);

            assert!(maker.grid.region_count() <= components.len().max(1));
        }
    }
}
