//! Robot capability and the default toy implementation.

use toy_robot_core::{Direction, RobotId};

/// Heading-bearing entity tracked by the coordinator.
///
/// Robots never know where they stand; the coordinator asks for a step
/// offset and applies it against the board.
pub trait Robot {
    /// Creates a robot with the provided identity and heading.
    fn spawn(id: RobotId, facing: Direction) -> Self
    where
        Self: Sized;

    /// Identity assigned when the robot was spawned.
    fn id(&self) -> RobotId;

    /// Current heading.
    fn facing(&self) -> Direction;

    /// Replaces the current heading.
    fn face(&mut self, facing: Direction);

    /// Rotates a quarter turn counter-clockwise.
    fn turn_left(&mut self) {
        self.face(self.facing().turn_left());
    }

    /// Rotates a quarter turn clockwise.
    fn turn_right(&mut self) {
        self.face(self.facing().turn_right());
    }

    /// Offset of a single step in the current heading.
    fn step(&self) -> (i32, i32) {
        self.facing().displacement()
    }
}

/// Plain robot holding an identity and a heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToyRobot {
    id: RobotId,
    facing: Direction,
}

impl Robot for ToyRobot {
    fn spawn(id: RobotId, facing: Direction) -> Self {
        Self { id, facing }
    }

    fn id(&self) -> RobotId {
        self.id
    }

    fn facing(&self) -> Direction {
        self.facing
    }

    fn face(&mut self, facing: Direction) {
        self.facing = facing;
    }
}
