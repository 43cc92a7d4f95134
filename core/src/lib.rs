#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the toy robot workspace.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! world, and the command systems. Adapters feed raw text to the command
//! processor, which turns it into [`Command`] values. The world applies those
//! against its board and robot registry and answers with [`RobotReport`]
//! snapshots.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Board width used when no configuration overrides it.
pub const DEFAULT_BOARD_WIDTH: i32 = 5;

/// Board height used when no configuration overrides it.
pub const DEFAULT_BOARD_HEIGHT: i32 = 5;

/// Number of robots the world accepts when no configuration overrides it.
pub const DEFAULT_ROBOT_LIMIT: usize = 1;

/// Validated commands accepted by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Places the session robot at a position with the given heading.
    Place {
        /// Target cell of the placement.
        position: GridPosition,
        /// Heading the robot assumes once placed.
        facing: Direction,
    },
    /// Rotates the session robot a quarter turn counter-clockwise.
    Left,
    /// Rotates the session robot a quarter turn clockwise.
    Right,
    /// Advances the session robot one cell in the direction it faces.
    Move,
    /// Requests the position and heading of the session robot.
    Report,
}

/// Cardinal headings available to robots.
///
/// Rotation follows the fixed cycle North, East, South, West.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Facing increasing `y`.
    North,
    /// Facing increasing `x`.
    East,
    /// Facing decreasing `y`.
    South,
    /// Facing decreasing `x`.
    West,
}

impl Direction {
    /// All headings in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Heading reached after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn turn_left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
            Self::West => Self::South,
        }
    }

    /// Heading reached after a quarter turn clockwise.
    #[must_use]
    pub const fn turn_right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Unit offset `(dx, dy)` covered by a single step in this heading.
    #[must_use]
    pub const fn displacement(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Canonical capitalised name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Matches one of the four heading names, ignoring case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|direction| direction.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDirectionError(trimmed.to_owned()))
    }
}

/// Error returned when a token does not name a heading.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("'{0}' is not one of North, South, East or West")]
pub struct ParseDirectionError(String);

/// Location of a single board cell.
///
/// Coordinates are signed so that positions beyond either edge stay
/// representable; the board decides which of them are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    x: i32,
    y: i32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the cell, growing northwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Position shifted by the provided offset, or `None` when either axis overflows.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

/// Opaque identity naming one robot across calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId(Uuid);

impl RobotId {
    /// Allocates a fresh random identity.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds an identity from a fixed integer, handy for deterministic fixtures.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable snapshot of a single robot used for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RobotReport {
    /// Identity of the reported robot.
    pub robot: RobotId,
    /// Cell the robot currently occupies.
    pub position: GridPosition,
    /// Heading of the robot.
    pub facing: Direction,
}

/// Board dimensions and robot capacity chosen when a game starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of columns on the board.
    pub board_width: i32,
    /// Number of rows on the board.
    pub board_height: i32,
    /// Maximum number of robots registered at once.
    pub robot_limit: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            robot_limit: DEFAULT_ROBOT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, GameSettings, GridPosition, RobotId};

    #[test]
    fn left_then_right_restores_every_heading() {
        for direction in Direction::ALL {
            assert_eq!(direction.turn_left().turn_right(), direction);
            assert_eq!(direction.turn_right().turn_left(), direction);
        }
    }

    #[test]
    fn four_quarter_turns_cycle_back() {
        for direction in Direction::ALL {
            let mut clockwise = direction;
            let mut counter_clockwise = direction;
            for _ in 0..4 {
                clockwise = clockwise.turn_right();
                counter_clockwise = counter_clockwise.turn_left();
            }
            assert_eq!(clockwise, direction);
            assert_eq!(counter_clockwise, direction);
        }
    }

    #[test]
    fn rotation_wraps_at_both_ends_of_cycle() {
        assert_eq!(Direction::North.turn_left(), Direction::West);
        assert_eq!(Direction::North.turn_right(), Direction::East);
        assert_eq!(Direction::West.turn_right(), Direction::North);
    }

    #[test]
    fn displacement_matches_compass() {
        assert_eq!(Direction::North.displacement(), (0, 1));
        assert_eq!(Direction::East.displacement(), (1, 0));
        assert_eq!(Direction::South.displacement(), (0, -1));
        assert_eq!(Direction::West.displacement(), (-1, 0));
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(" EAST ".parse::<Direction>(), Ok(Direction::East));
        assert_eq!("north".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("sOuTh".parse::<Direction>(), Ok(Direction::South));
    }

    #[test]
    fn parsing_rejects_numbers_and_unknown_names() {
        assert!("1".parse::<Direction>().is_err());
        assert!("up".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(Direction::West.to_string(), "West");
    }

    #[test]
    fn offset_reports_overflow() {
        let edge = GridPosition::new(i32::MAX, 0);
        assert_eq!(edge.offset((1, 0)), None);
        assert_eq!(
            GridPosition::new(1, 2).offset((1, 0)),
            Some(GridPosition::new(2, 2))
        );
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(RobotId::generate(), RobotId::generate());
        assert_eq!(RobotId::from_u128(7), RobotId::from_u128(7));
    }

    #[test]
    fn robot_ids_display_as_hyphenated_uuids() {
        assert_eq!(
            RobotId::from_u128(1).to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: GameSettings =
            serde_json::from_str(r#"{ "robot_limit": 3 }"#).expect("settings parse");
        assert_eq!(
            settings,
            GameSettings {
                robot_limit: 3,
                ..GameSettings::default()
            }
        );
    }
}
