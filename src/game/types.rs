//! Core types for the octospace game schema.
//!
//! Defines player sides, grid positions and the movement/firing vocabulary
//! shared by observations and actions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which half of the board a player starts on.
///
/// The left player (0) owns planets whose occupation progress is below 50,
/// the right player (1) owns planets at 50 and above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Returns the numeric index used by the game (0 = left, 1 = right).
    pub fn index(&self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Occupation progress of a planet fully held by this side.
    pub fn held_progress(&self) -> i32 {
        match self {
            Side::Left => 0,
            Side::Right => 100,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Left),
            1 => Ok(Side::Right),
            other => Err(format!("side must be 0 or 1, got {other}")),
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> u8 {
        side.index()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Direction of movement or fire.
///
/// The y axis grows downwards, so `Down` is `+y` and `Up` is `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Returns all directions in game index order.
    pub fn all() -> [Direction; 4] {
        [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
    }

    /// Returns the game index of this direction (0=right, 1=down, 2=left, 3=up).
    pub fn index(&self) -> u8 {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    /// Parses a game direction index.
    pub fn from_index(index: u8) -> Option<Direction> {
        match index {
            0 => Some(Direction::Right),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Up),
            _ => None,
        }
    }

    /// Unit step `(dx, dy)` for this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }
}

/// Kind of command a ship can execute in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Move,
    Fire,
}

impl ActionType {
    pub fn index(&self) -> u8 {
        match self {
            ActionType::Move => 0,
            ActionType::Fire => 1,
        }
    }

    pub fn from_index(index: u8) -> Option<ActionType> {
        match index {
            0 => Some(ActionType::Move),
            1 => Some(ActionType::Fire),
            _ => None,
        }
    }
}

/// A cell on the game grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another cell.
    pub fn distance_to(&self, other: &Position) -> i64 {
        let dx = (other.x - self.x) as i64;
        let dy = (other.y - self.y) as i64;
        dx * dx + dy * dy
    }

    /// Normalizes coordinates to `[0, 1]` given the board size.
    pub fn normalized(&self, map_size: f32) -> (f32, f32) {
        (self.x as f32 / map_size, self.y as f32 / map_size)
    }

    /// Point reflection through the board centre.
    pub fn mirrored(&self, map_size: i32) -> Position {
        Position::new(map_size - 1 - self.x, map_size - 1 - self.y)
    }

    /// Direction that reduces the larger of the two axis offsets toward `target`.
    ///
    /// Returns `None` if the positions coincide. Ties favour the horizontal axis.
    pub fn direction_to(&self, target: &Position) -> Option<Direction> {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        if dx == 0 && dy == 0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }

    /// Number of cells to travel along `direction` to line up with `target`.
    pub fn offset_along(&self, target: &Position, direction: Direction) -> i32 {
        match direction {
            Direction::Right => target.x - self.x,
            Direction::Left => self.x - target.x,
            Direction::Down => target.y - self.y,
            Direction::Up => self.y - target.y,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_roundtrip_and_opponent() {
        assert_eq!(Side::try_from(0u8), Ok(Side::Left));
        assert_eq!(Side::try_from(1u8), Ok(Side::Right));
        assert!(Side::try_from(2u8).is_err());
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(u8::from(Side::Right), 1);
    }

    #[test]
    fn direction_indices() {
        for d in Direction::all() {
            assert_eq!(Direction::from_index(d.index()), Some(d));
        }
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn distance_is_squared_euclidean() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.distance_to(&b), 25);
        assert_eq!(b.distance_to(&a), 25);
    }

    #[test]
    fn distance_never_negative_when_dy_dominates() {
        let a = Position::new(0, 0);
        let b = Position::new(1, 10);
        assert_eq!(a.distance_to(&b), 101);
    }

    #[test]
    fn direction_to_picks_dominant_axis() {
        let p = Position::new(5, 5);
        assert_eq!(p.direction_to(&Position::new(9, 6)), Some(Direction::Right));
        assert_eq!(p.direction_to(&Position::new(5, 1)), Some(Direction::Up));
        assert_eq!(p.direction_to(&Position::new(4, 20)), Some(Direction::Down));
        assert_eq!(p.direction_to(&Position::new(5, 5)), None);
    }

    #[test]
    fn mirrored_through_centre() {
        let p = Position::new(9, 9);
        assert_eq!(p.mirrored(100), Position::new(90, 90));
    }
}
