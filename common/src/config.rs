use std::{env, str::FromStr, time::Duration};

use crate::constants::{DEFAULT_FINISH_DELAY_MS, DEFAULT_HEIGHT, DEFAULT_TICK_MS, DEFAULT_WIDTH};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub tick_interval: Duration,
    pub finish_delay: Duration,
    // Full open-cell sweeps allowed per pick. `None` is unbounded.
    pub max_open_cell_passes: Option<u32>,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            finish_delay: Duration::from_millis(DEFAULT_FINISH_DELAY_MS),
            max_open_cell_passes: None,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            height: parse_var(&lookup, "MAZE_HEIGHT", defaults.height),
            width: parse_var(&lookup, "MAZE_WIDTH", defaults.width),
            tick_interval: Duration::from_millis(parse_var(
                &lookup,
                "MAZE_TICK_MS",
                DEFAULT_TICK_MS,
            )),
            finish_delay: Duration::from_millis(parse_var(
                &lookup,
                "MAZE_FINISH_DELAY_MS",
                DEFAULT_FINISH_DELAY_MS,
            )),
            max_open_cell_passes: parse_optional_var(&lookup, "MAZE_PASS_LIMIT"),
            seed: parse_optional_var(&lookup, "MAZE_SEED"),
        }
    }

    pub fn with_dimensions(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    parse_optional_var(lookup, key).unwrap_or(default)
}

fn parse_optional_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("Ignoring {}={:?}: not a valid number.", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = GameConfig::from_lookup(|_| None);
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.max_open_cell_passes, None);
    }

    #[test]
    fn variables_override_defaults() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("MAZE_HEIGHT", "7"),
            ("MAZE_WIDTH", " 9 "),
            ("MAZE_TICK_MS", "40"),
            ("MAZE_PASS_LIMIT", "10000"),
            ("MAZE_SEED", "42"),
        ]));

        assert_eq!((config.height, config.width), (7, 9));
        assert_eq!(config.tick_interval, Duration::from_millis(40));
        assert_eq!(config.max_open_cell_passes, Some(10_000));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn malformed_variables_fall_back() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("MAZE_HEIGHT", "tall"),
            ("MAZE_WIDTH", "-3"),
            ("MAZE_SEED", "abc"),
        ]));

        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn with_dimensions_keeps_other_settings() {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        }
        .with_dimensions(4, 6);

        assert_eq!((config.height, config.width, config.seed), (4, 6, Some(3)));
    }
}
