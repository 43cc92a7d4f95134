//! Occupancy boards that hold at most one robot per cell.

use thiserror::Error;
use toy_robot_core::{GridPosition, RobotId};

/// Reasons a board rejects a sizing or placement request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Either requested dimension was below one.
    #[error("Width and Height values must be greater than 0")]
    InvalidDimensions {
        /// Requested number of columns.
        width: i32,
        /// Requested number of rows.
        height: i32,
    },
    /// A robot that is not yet on the board targeted a cell outside it.
    #[error(
        "Unable to place robot at ({x}, {y}). X must be within 0 - {max_x}, and Y must be within 0 - {max_y}"
    )]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Largest valid column, `-1` before the board is sized.
        max_x: i64,
        /// Largest valid row, `-1` before the board is sized.
        max_y: i64,
    },
    /// A robot already on the board targeted a cell outside it.
    #[error("Unable to move robot. Moving robot in current direction will move it off the board.")]
    OffBoard,
    /// A dense board of this size exceeds the cell budget or cannot be allocated.
    #[error("Unable to create a {width} x {height} board, it exceeds {max_cells} cells")]
    TooLarge {
        /// Requested number of columns.
        width: i32,
        /// Requested number of rows.
        height: i32,
        /// Largest cell count the board accepts.
        max_cells: u64,
    },
    /// The target cell holds a different robot.
    #[error("Another robot exists in the same location. Please choose a different location for robot")]
    Occupied {
        /// Robot already holding the cell.
        occupant: RobotId,
    },
}

/// Grid capability consumed by the coordinator.
///
/// Implementations must keep [`Board::place`] atomic: when it returns an
/// error no cell may have changed.
pub trait Board {
    /// Discards all occupancy and resizes the board to `width` x `height`.
    fn initialize_play_area(&mut self, width: i32, height: i32) -> Result<(), BoardError>;

    /// Number of columns and rows, `(0, 0)` until the board is sized.
    fn dimensions(&self) -> (u32, u32);

    /// Reports whether the position lies on the board.
    fn is_valid_position(&self, position: GridPosition) -> bool {
        let (columns, rows) = self.dimensions();
        within(position.x(), columns) && within(position.y(), rows)
    }

    /// Robot holding the provided cell, if any.
    fn occupant(&self, position: GridPosition) -> Option<RobotId>;

    /// Cell currently held by the robot, if it is on the board.
    fn position_of(&self, robot: RobotId) -> Option<GridPosition>;

    /// Puts the robot on the provided cell, vacating its previous cell.
    ///
    /// A robot already on the board is moved; any other robot is freshly
    /// placed. The two cases report leaving the board differently.
    fn place(&mut self, robot: RobotId, position: GridPosition) -> Result<(), BoardError>;
}

fn within(value: i32, bound: u32) -> bool {
    u32::try_from(value).map_or(false, |value| value < bound)
}

/// Validates requested dimensions, returning them as unsigned extents.
pub(crate) fn checked_dimensions(width: i32, height: i32) -> Result<(u32, u32), BoardError> {
    let invalid = || BoardError::InvalidDimensions { width, height };
    if width < 1 || height < 1 {
        return Err(invalid());
    }
    let columns = u32::try_from(width).map_err(|_| invalid())?;
    let rows = u32::try_from(height).map_err(|_| invalid())?;
    Ok((columns, rows))
}

/// Builds the error returned when a placement misses the board.
pub(crate) fn rejection(
    already_placed: bool,
    position: GridPosition,
    (columns, rows): (u32, u32),
) -> BoardError {
    if already_placed {
        BoardError::OffBoard
    } else {
        BoardError::OutOfBounds {
            x: position.x(),
            y: position.y(),
            max_x: i64::from(columns) - 1,
            max_y: i64::from(rows) - 1,
        }
    }
}

/// Dense row-major occupancy grid.
///
/// Finding a robot scans every cell, which is fine for the small boards the
/// game is played on. See [`SparseBoard`](crate::SparseBoard) for large grids.
#[derive(Clone, Debug, Default)]
pub struct GridBoard {
    columns: u32,
    rows: u32,
    cells: Vec<Option<RobotId>>,
}

impl GridBoard {
    /// Largest number of cells a dense board allocates.
    pub const MAX_CELLS: u64 = 1 << 20;

    /// Creates an unsized board; every position is invalid until it is initialized.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self, position: GridPosition) -> Option<usize> {
        if !self.is_valid_position(position) {
            return None;
        }
        let row = usize::try_from(position.y()).ok()?;
        let column = usize::try_from(position.x()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    fn position_at(&self, index: usize) -> Option<GridPosition> {
        let width = usize::try_from(self.columns).ok().filter(|width| *width > 0)?;
        let x = i32::try_from(index % width).ok()?;
        let y = i32::try_from(index / width).ok()?;
        Some(GridPosition::new(x, y))
    }
}

impl Board for GridBoard {
    fn initialize_play_area(&mut self, width: i32, height: i32) -> Result<(), BoardError> {
        let (columns, rows) = checked_dimensions(width, height)?;
        let too_large = || BoardError::TooLarge {
            width,
            height,
            max_cells: Self::MAX_CELLS,
        };
        let count = u64::from(columns) * u64::from(rows);
        if count > Self::MAX_CELLS {
            return Err(too_large());
        }
        let capacity = usize::try_from(count).map_err(|_| too_large())?;

        let mut cells: Vec<Option<RobotId>> = Vec::new();
        cells.try_reserve_exact(capacity).map_err(|_| too_large())?;
        cells.resize(capacity, None);

        self.columns = columns;
        self.rows = rows;
        self.cells = cells;
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn occupant(&self, position: GridPosition) -> Option<RobotId> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    fn position_of(&self, robot: RobotId) -> Option<GridPosition> {
        self.cells
            .iter()
            .position(|cell| *cell == Some(robot))
            .and_then(|index| self.position_at(index))
    }

    fn place(&mut self, robot: RobotId, position: GridPosition) -> Result<(), BoardError> {
        let previous = self
            .cells
            .iter()
            .position(|cell| *cell == Some(robot));

        let Some(target) = self.index(position) else {
            return Err(rejection(previous.is_some(), position, self.dimensions()));
        };

        if let Some(occupant) = self.cells.get(target).copied().flatten() {
            if occupant != robot {
                return Err(BoardError::Occupied { occupant });
            }
        }

        if let Some(slot) = previous.and_then(|index| self.cells.get_mut(index)) {
            *slot = None;
        }
        if let Some(slot) = self.cells.get_mut(target) {
            *slot = Some(robot);
        }
        Ok(())
    }
}
