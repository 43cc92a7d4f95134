#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text command system that drives a coordinator on behalf of one session.
//!
//! Raw input is split into an action token and an optional argument string,
//! validated into a [`Command`], and applied against the session's robot.
//! Failures raised by the world pass through with their message unchanged.

use thiserror::Error;
use toy_robot_core::{Command, Direction, GridPosition, RobotId};
use toy_robot_world::{CoordinatorError, RobotCoordinator};
use tracing::debug;

/// Result of a successfully processed command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the session controls a robot after the command.
    pub robot_placed: bool,
    /// Text to show the user; empty for every command but `REPORT`.
    pub report: String,
}

/// Reasons a command is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// `PLACE` arrived without its argument string.
    #[error("Please provide X, Y location and Facing direction for robot to be placed on board")]
    MissingPlacementArguments,
    /// The `PLACE` argument string did not split into three parts.
    #[error("Incorrect number of arguments provided for PLACE command. Please provide X, Y location and Facing direction for robot to be placed on board")]
    PlacementArgumentCount,
    /// The facing was given as a number instead of a name.
    #[error("Invalid format for Facing direction. Please enter from the following directions (North, South, East, West)")]
    NumericFacing,
    /// X, Y or the facing name could not be parsed.
    #[error("Please provide valid values for X, Y and Facing direction")]
    InvalidPlacementValues,
    /// A robot command arrived before the session placed a robot.
    #[error("Please PLACE robot on board")]
    RobotNotPlaced,
    /// The action token names no known command.
    #[error("Command not recognized please try again")]
    UnrecognizedCommand,
    /// The world rejected the command.
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

/// Session that remembers which robot the user is controlling.
#[derive(Debug)]
pub struct CommandProcessor<C> {
    coordinator: C,
    current_robot: Option<RobotId>,
}

impl<C: RobotCoordinator> CommandProcessor<C> {
    /// Starts a session with no robot selected.
    #[must_use]
    pub fn new(coordinator: C) -> Self {
        Self {
            coordinator,
            current_robot: None,
        }
    }

    /// Robot controlled by this session, once one has been placed.
    #[must_use]
    pub fn current_robot(&self) -> Option<RobotId> {
        self.current_robot
    }

    /// Provides read-only access to the driven coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &C {
        &self.coordinator
    }

    /// Parses and applies one tokenized input line.
    ///
    /// `input` holds the action token and, optionally, the unsplit argument
    /// string, as produced by [`split_input`].
    pub fn process_command(&mut self, input: &[&str]) -> Result<CommandOutcome, CommandError> {
        let command = parse_command(input)?;
        debug!(?command, "command parsed");
        self.execute(command)
    }

    /// Applies an already validated command to the session robot.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        let report = match command {
            Command::Place { position, facing } => {
                self.place(position, facing)?;
                String::new()
            }
            Command::Left => {
                let robot = self.session_robot()?;
                self.coordinator.turn_left(robot)?;
                String::new()
            }
            Command::Right => {
                let robot = self.session_robot()?;
                self.coordinator.turn_right(robot)?;
                String::new()
            }
            Command::Move => {
                let robot = self.session_robot()?;
                self.coordinator.move_robot(robot)?;
                String::new()
            }
            Command::Report => self.report()?,
        };

        Ok(CommandOutcome {
            robot_placed: self.current_robot.is_some(),
            report,
        })
    }

    fn session_robot(&self) -> Result<RobotId, CommandError> {
        self.current_robot.ok_or(CommandError::RobotNotPlaced)
    }

    fn place(&mut self, position: GridPosition, facing: Direction) -> Result<(), CommandError> {
        match self.current_robot {
            Some(robot) => self.coordinator.place(robot, position, facing)?,
            None => {
                let robot = self.coordinator.place_new(position, facing)?;
                self.current_robot = Some(robot);
            }
        }
        Ok(())
    }

    // Reports the first registered robot, which is the session robot while
    // the limit stays at one.
    fn report(&self) -> Result<String, CommandError> {
        let robot = self.session_robot()?;
        let entries = self.coordinator.report()?;
        let first = entries
            .first()
            .ok_or(CoordinatorError::MissingFromBoard { robot })?;
        Ok(format!(
            "Output: {},{},{}",
            first.position.x(),
            first.position.y(),
            first.facing
        ))
    }
}

/// Validates tokenized input into a [`Command`].
pub fn parse_command(input: &[&str]) -> Result<Command, CommandError> {
    let Some(action) = input.first() else {
        return Err(CommandError::UnrecognizedCommand);
    };

    match action.to_ascii_lowercase().as_str() {
        "place" => {
            let arguments = input
                .get(1)
                .ok_or(CommandError::MissingPlacementArguments)?;
            parse_place_arguments(arguments)
        }
        "left" => Ok(Command::Left),
        "right" => Ok(Command::Right),
        "move" => Ok(Command::Move),
        "report" => Ok(Command::Report),
        _ => Err(CommandError::UnrecognizedCommand),
    }
}

/// Parses the `X,Y,FACING` argument string of a `PLACE` command.
///
/// A numeric facing is rejected with its own message before the generic
/// validity check runs.
pub fn parse_place_arguments(arguments: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = arguments.split(',').collect();
    let [x, y, facing] = parts.as_slice() else {
        return Err(CommandError::PlacementArgumentCount);
    };

    let facing = facing.trim();
    if facing.parse::<i32>().is_ok() {
        return Err(CommandError::NumericFacing);
    }

    match (
        x.trim().parse::<i32>(),
        y.trim().parse::<i32>(),
        facing.parse::<Direction>(),
    ) {
        (Ok(x), Ok(y), Ok(facing)) => Ok(Command::Place {
            position: GridPosition::new(x, y),
            facing,
        }),
        _ => Err(CommandError::InvalidPlacementValues),
    }
}

/// Splits a raw line into its action token and the remaining argument string.
///
/// Only the first space separates; the argument string is trimmed but not
/// tokenized further, and is kept even when empty. A line without a space
/// yields a single token.
#[must_use]
pub fn split_input(line: &str) -> Vec<&str> {
    match line.split_once(' ') {
        Some((action, arguments)) if !action.is_empty() => vec![action, arguments.trim()],
        _ => vec![line],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_input_separates_at_first_space_only() {
        assert_eq!(split_input("PLACE 1, 2, EAST"), vec!["PLACE", "1, 2, EAST"]);
        assert_eq!(split_input("MOVE"), vec!["MOVE"]);
        assert_eq!(split_input("REPORT   "), vec!["REPORT", ""]);
    }

    #[test]
    fn split_input_keeps_leading_space_lines_whole() {
        assert_eq!(split_input(" MOVE"), vec![" MOVE"]);
    }

    #[test]
    fn place_with_blank_arguments_counts_as_wrong_arity() {
        assert_eq!(
            parse_command(&split_input("PLACE ")),
            Err(CommandError::PlacementArgumentCount)
        );
        assert_eq!(
            parse_command(&split_input("PLACE")),
            Err(CommandError::MissingPlacementArguments)
        );
        assert_eq!(parse_command(&split_input("REPORT ")), Ok(Command::Report));
    }

    #[test]
    fn actions_are_case_insensitive() {
        assert_eq!(parse_command(&["mOvE"]), Ok(Command::Move));
        assert_eq!(parse_command(&["LEFT"]), Ok(Command::Left));
        assert_eq!(parse_command(&["Right"]), Ok(Command::Right));
        assert_eq!(parse_command(&["report"]), Ok(Command::Report));
    }

    #[test]
    fn empty_input_is_not_recognized() {
        assert_eq!(parse_command(&[]), Err(CommandError::UnrecognizedCommand));
        assert_eq!(parse_command(&[""]), Err(CommandError::UnrecognizedCommand));
    }

    #[test]
    fn place_arguments_accept_padding_and_signs() {
        assert_eq!(
            parse_place_arguments(" -1 , +3 , west "),
            Ok(Command::Place {
                position: GridPosition::new(-1, 3),
                facing: Direction::West,
            })
        );
    }

    #[test]
    fn numeric_facing_wins_over_invalid_coordinates() {
        assert_eq!(
            parse_place_arguments("x,y,2"),
            Err(CommandError::NumericFacing)
        );
    }

    #[test]
    fn out_of_range_integers_are_invalid_values() {
        assert_eq!(
            parse_place_arguments("99999999999,1,north"),
            Err(CommandError::InvalidPlacementValues)
        );
        assert_eq!(
            parse_place_arguments("1,1,99999999999"),
            Err(CommandError::InvalidPlacementValues),
            "facing too large for an integer falls through to the generic check",
        );
    }

    #[test]
    fn wrong_part_count_is_rejected() {
        assert_eq!(
            parse_place_arguments("1,1"),
            Err(CommandError::PlacementArgumentCount)
        );
        assert_eq!(
            parse_place_arguments("1,1,north,east"),
            Err(CommandError::PlacementArgumentCount)
        );
    }
}
