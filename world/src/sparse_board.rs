//! Map-backed board for grids too large to allocate densely.

use std::collections::HashMap;

use toy_robot_core::{GridPosition, RobotId};

use crate::board::{checked_dimensions, rejection, Board, BoardError};

/// Board that stores only occupied cells.
///
/// A reverse index from robot to cell is maintained next to the cell map so
/// that locating a robot does not scan the grid. Every mutation updates both
/// maps together.
#[derive(Clone, Debug, Default)]
pub struct SparseBoard {
    columns: u32,
    rows: u32,
    occupants: HashMap<GridPosition, RobotId>,
    positions: HashMap<RobotId, GridPosition>,
}

impl SparseBoard {
    /// Creates an unsized board; every position is invalid until it is initialized.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of robots currently on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Reports whether no robot is on the board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Checks that the cell map and the reverse index describe the same placements.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.occupants.len() == self.positions.len()
            && self
                .positions
                .iter()
                .all(|(robot, position)| self.occupants.get(position) == Some(robot))
    }
}

impl Board for SparseBoard {
    fn initialize_play_area(&mut self, width: i32, height: i32) -> Result<(), BoardError> {
        let (columns, rows) = checked_dimensions(width, height)?;
        self.columns = columns;
        self.rows = rows;
        self.occupants.clear();
        self.positions.clear();
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn occupant(&self, position: GridPosition) -> Option<RobotId> {
        self.occupants.get(&position).copied()
    }

    fn position_of(&self, robot: RobotId) -> Option<GridPosition> {
        self.positions.get(&robot).copied()
    }

    fn place(&mut self, robot: RobotId, position: GridPosition) -> Result<(), BoardError> {
        let previous = self.positions.get(&robot).copied();

        if !self.is_valid_position(position) {
            return Err(rejection(previous.is_some(), position, self.dimensions()));
        }

        if let Some(&occupant) = self.occupants.get(&position) {
            if occupant != robot {
                return Err(BoardError::Occupied { occupant });
            }
        }

        if let Some(previous) = previous {
            let _ = self.occupants.remove(&previous);
        }
        let _ = self.occupants.insert(position, robot);
        let _ = self.positions.insert(robot, position);
        Ok(())
    }
}
