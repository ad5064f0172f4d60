use crate::{maze::Grid, random::RandomSource};

// Panics when the script runs out and no fallback is set, so a test notices any
// draw it did not plan for.
pub struct ScriptedRandom {
    draws: Vec<bool>,
    next: usize,
    fallback: Option<bool>,
}

impl ScriptedRandom {
    pub fn new(draws: &[bool]) -> Self {
        Self {
            draws: draws.to_vec(),
            next: 0,
            fallback: None,
        }
    }

    pub fn then_repeating(mut self, value: bool) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn repeating(value: bool) -> Self {
        Self {
            draws: Vec::new(),
            next: 0,
            fallback: Some(value),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn biased_bool(&mut self, _threshold: f64) -> bool {
        if let Some(&draw) = self.draws.get(self.next) {
            self.next += 1;
            return draw;
        }

        match self.fallback {
            Some(value) => value,
            None => panic!(
                "scripted random source ran out after {} draws",
                self.draws.len()
            ),
        }
    }
}

pub struct CountingRandom<R: RandomSource> {
    inner: R,
    draws: u64,
}

impl<R: RandomSource> CountingRandom<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, draws: 0 }
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RandomSource> RandomSource for CountingRandom<R> {
    fn biased_bool(&mut self, threshold: f64) -> bool {
        self.draws += 1;
        self.inner.biased_bool(threshold)
    }
}

// Draws that make one open-cell sweep accept candidate `n`.
pub fn pick_nth(n: usize) -> Vec<bool> {
    let mut draws = vec![false; n];
    draws.push(true);
    draws
}

pub fn grid_from_rows(rows: &[&str]) -> Grid {
    let walls: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| row.chars().map(|c| c == '#').collect())
        .collect();
    Grid::from_walls(&walls).expect("test grid should be rectangular")
}
