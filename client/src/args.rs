use std::fmt;

use common::GameConfig;

pub const USAGE: &str = "Usage: Labyrinth [height] [width]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    TooMany(usize),
    NotAPositiveNumber(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::TooMany(count) => write!(f, "Expected at most 2 arguments, got {}", count),
            ArgsError::NotAPositiveNumber(arg) => {
                write!(f, "'{}' is not a positive whole number", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

// A lone height keeps the configured width.
pub fn parse_dimensions<I, S>(args: I) -> Result<(Option<usize>, Option<usize>), ArgsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<S> = args.into_iter().collect();
    if args.len() > 2 {
        return Err(ArgsError::TooMany(args.len()));
    }

    let mut values = args.iter().map(|arg| parse_positive(arg.as_ref()));
    let height = values.next().transpose()?;
    let width = values.next().transpose()?;

    Ok((height, width))
}

pub fn with_overrides(
    config: GameConfig,
    dimensions: (Option<usize>, Option<usize>),
) -> GameConfig {
    let (height, width) = dimensions;
    let height = height.unwrap_or(config.height);
    let width = width.unwrap_or(config.width);
    config.with_dimensions(height, width)
}

fn parse_positive(arg: &str) -> Result<usize, ArgsError> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ArgsError::NotAPositiveNumber(arg.to_string())),
    }
}
