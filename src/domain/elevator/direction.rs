use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::elevator::floor::Floor;
use crate::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// Direction of travel needed to get from `from` to `to`; `Idle` if already there.
    pub fn towards(from: Floor, to: Floor) -> Direction {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    /// Floor offset of a single step in this direction.
    pub fn step(self) -> Floor {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Idle => "IDLE",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ConversionError;

    fn from_str(direction: &str) -> Result<Direction, Self::Err> {
        match direction.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "idle" => Ok(Direction::Idle),
            _ => Err(ConversionError::UnknownDirection(direction.to_string())),
        }
    }
}
