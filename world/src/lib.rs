#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board and robot registry for the toy robot game.
//!
//! The [`Coordinator`] owns a [`Board`] and the ordered registry of robots.
//! Callers reach it through the [`RobotCoordinator`] trait so that command
//! systems can be exercised against test doubles, and through
//! [`SharedCoordinator`] when several threads drive one game.

mod board;
mod robot;
mod shared;
mod sparse_board;

use thiserror::Error;
use toy_robot_core::{
    Direction, GameSettings, GridPosition, RobotId, RobotReport, DEFAULT_ROBOT_LIMIT,
};
use tracing::{debug, warn};

pub use board::{Board, BoardError, GridBoard};
pub use robot::{Robot, ToyRobot};
pub use shared::SharedCoordinator;
pub use sparse_board::SparseBoard;

/// Reasons the coordinator rejects a request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// The registry already holds as many robots as allowed.
    #[error("Unable to place any more robots on the board as you have reached the allowed limit")]
    RobotLimitReached,
    /// The requested limit is smaller than the number of registered robots.
    #[error("Unable to lower the robot limit to {limit} while {registered} robots are on the board")]
    LimitBelowRegistered {
        /// Requested limit.
        limit: usize,
        /// Robots currently registered.
        registered: usize,
    },
    /// A move named an identity that no registered robot carries.
    #[error("Robot for specified id does not exist, place robot on the board again")]
    UnregisteredRobot {
        /// Identity that was looked up.
        robot: RobotId,
    },
    /// A turn named an identity that no registered robot carries.
    #[error("Robot for specified id does not exist")]
    UnknownRobot {
        /// Identity that was looked up.
        robot: RobotId,
    },
    /// A registered robot holds no cell on the board.
    #[error("Cannot find robot on the board, place same robot on the board again")]
    MissingFromBoard {
        /// Robot that could not be located.
        robot: RobotId,
    },
    /// The board rejected the request.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Operations the command layer issues against a game.
pub trait RobotCoordinator {
    /// Maximum number of robots that may be registered at once.
    fn robot_limit(&self) -> usize;

    /// Changes the robot limit; fails without effect when it would drop below the registry size.
    fn set_robot_limit(&mut self, limit: usize) -> Result<(), CoordinatorError>;

    /// Clears every robot and resizes the board.
    fn initialize_board(&mut self, width: i32, height: i32) -> Result<(), CoordinatorError>;

    /// Places the identified robot, registering it first if it is new.
    fn place(
        &mut self,
        robot: RobotId,
        position: GridPosition,
        facing: Direction,
    ) -> Result<(), CoordinatorError>;

    /// Places a robot under a freshly generated identity and returns that identity.
    fn place_new(
        &mut self,
        position: GridPosition,
        facing: Direction,
    ) -> Result<RobotId, CoordinatorError> {
        let robot = RobotId::generate();
        self.place(robot, position, facing)?;
        Ok(robot)
    }

    /// Advances the robot one cell in the direction it faces.
    fn move_robot(&mut self, robot: RobotId) -> Result<(), CoordinatorError>;

    /// Rotates the robot a quarter turn counter-clockwise.
    fn turn_left(&mut self, robot: RobotId) -> Result<(), CoordinatorError>;

    /// Rotates the robot a quarter turn clockwise.
    fn turn_right(&mut self, robot: RobotId) -> Result<(), CoordinatorError>;

    /// Positions and headings of every registered robot in registration order.
    fn report(&self) -> Result<Vec<RobotReport>, CoordinatorError>;
}

/// Board plus the ordered registry of robots placed on it.
#[derive(Clone, Debug)]
pub struct Coordinator<B = GridBoard, R = ToyRobot> {
    board: B,
    robots: Vec<R>,
    robot_limit: usize,
}

impl<B: Board, R: Robot> Coordinator<B, R> {
    /// Wraps the provided board with an empty registry and the default robot limit.
    ///
    /// The board keeps whatever size it already has; call
    /// [`RobotCoordinator::initialize_board`] to size it.
    #[must_use]
    pub fn new(board: B) -> Self {
        Self {
            board,
            robots: Vec::new(),
            robot_limit: DEFAULT_ROBOT_LIMIT,
        }
    }

    fn registered(&self, robot: RobotId) -> Result<&R, CoordinatorError> {
        self.robots
            .iter()
            .find(|candidate| candidate.id() == robot)
            .ok_or(CoordinatorError::UnregisteredRobot { robot })
    }

    fn registered_mut(&mut self, robot: RobotId) -> Result<&mut R, CoordinatorError> {
        self.robots
            .iter_mut()
            .find(|candidate| candidate.id() == robot)
            .ok_or(CoordinatorError::UnknownRobot { robot })
    }

    fn locate(&self, robot: RobotId) -> Result<GridPosition, CoordinatorError> {
        self.board.position_of(robot).ok_or_else(|| {
            warn!(%robot, "registered robot missing from board");
            CoordinatorError::MissingFromBoard { robot }
        })
    }
}

impl<B: Board + Default, R: Robot> Default for Coordinator<B, R> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: Board, R: Robot> RobotCoordinator for Coordinator<B, R> {
    fn robot_limit(&self) -> usize {
        self.robot_limit
    }

    fn set_robot_limit(&mut self, limit: usize) -> Result<(), CoordinatorError> {
        let registered = self.robots.len();
        if limit < registered {
            return Err(CoordinatorError::LimitBelowRegistered { limit, registered });
        }
        self.robot_limit = limit;
        Ok(())
    }

    fn initialize_board(&mut self, width: i32, height: i32) -> Result<(), CoordinatorError> {
        self.robots.clear();
        self.board.initialize_play_area(width, height)?;
        debug!(width, height, "board initialized");
        Ok(())
    }

    fn place(
        &mut self,
        robot: RobotId,
        position: GridPosition,
        facing: Direction,
    ) -> Result<(), CoordinatorError> {
        if let Some(existing) = self
            .robots
            .iter_mut()
            .find(|candidate| candidate.id() == robot)
        {
            self.board.place(robot, position)?;
            existing.face(facing);
            debug!(%robot, x = position.x(), y = position.y(), %facing, "robot re-placed");
            return Ok(());
        }

        if self.robots.len() >= self.robot_limit {
            debug!(%robot, limit = self.robot_limit, "robot limit reached");
            return Err(CoordinatorError::RobotLimitReached);
        }

        self.board.place(robot, position)?;
        self.robots.push(R::spawn(robot, facing));
        debug!(%robot, x = position.x(), y = position.y(), %facing, "robot placed");
        Ok(())
    }

    fn move_robot(&mut self, robot: RobotId) -> Result<(), CoordinatorError> {
        let step = self.registered(robot)?.step();
        let from = self.locate(robot)?;
        let to = from.offset(step).ok_or(BoardError::OffBoard)?;
        self.board.place(robot, to)?;
        debug!(%robot, x = to.x(), y = to.y(), "robot moved");
        Ok(())
    }

    fn turn_left(&mut self, robot: RobotId) -> Result<(), CoordinatorError> {
        self.registered_mut(robot)?.turn_left();
        Ok(())
    }

    fn turn_right(&mut self, robot: RobotId) -> Result<(), CoordinatorError> {
        self.registered_mut(robot)?.turn_right();
        Ok(())
    }

    fn report(&self) -> Result<Vec<RobotReport>, CoordinatorError> {
        self.robots
            .iter()
            .map(|robot| -> Result<RobotReport, CoordinatorError> {
                Ok(RobotReport {
                    robot: robot.id(),
                    position: self.locate(robot.id())?,
                    facing: robot.facing(),
                })
            })
            .collect()
    }
}

/// Builds a coordinator over a dense board sized and limited by the settings.
pub fn initialize_game(settings: &GameSettings) -> Result<Coordinator, CoordinatorError> {
    let mut coordinator = Coordinator::new(GridBoard::new());
    coordinator.initialize_board(settings.board_width, settings.board_height)?;
    coordinator.set_robot_limit(settings.robot_limit)?;
    Ok(coordinator)
}

/// Query functions that provide read-only access to the coordinator state.
pub mod query {
    use toy_robot_core::{GridPosition, RobotId};

    use super::{Board, Coordinator};

    /// Provides read-only access to the board.
    #[must_use]
    pub fn board<B, R>(coordinator: &Coordinator<B, R>) -> &B {
        &coordinator.board
    }

    /// Registered robots in registration order.
    #[must_use]
    pub fn robots<B, R>(coordinator: &Coordinator<B, R>) -> &[R] {
        &coordinator.robots
    }

    /// Cell held by the robot, if it is on the board.
    #[must_use]
    pub fn position_of<B: Board, R>(
        coordinator: &Coordinator<B, R>,
        robot: RobotId,
    ) -> Option<GridPosition> {
        coordinator.board.position_of(robot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(width: i32, height: i32, limit: usize) -> Coordinator {
        initialize_game(&GameSettings {
            board_width: width,
            board_height: height,
            robot_limit: limit,
        })
        .expect("valid settings")
    }

    #[test]
    fn initialize_game_applies_settings() {
        let coordinator = game(7, 3, 2);
        assert_eq!(query::board(&coordinator).dimensions(), (7, 3));
        assert_eq!(coordinator.robot_limit(), 2);
        assert!(query::robots(&coordinator).is_empty());
    }

    #[test]
    fn initialize_game_rejects_empty_board() {
        let error = initialize_game(&GameSettings {
            board_width: 0,
            ..GameSettings::default()
        })
        .expect_err("zero width must fail");
        assert_eq!(
            error.to_string(),
            "Width and Height values must be greater than 0"
        );
    }

    #[test]
    fn placing_registers_robot_and_occupies_cell() {
        let mut coordinator = game(5, 5, 1);
        let robot = RobotId::from_u128(1);

        coordinator
            .place(robot, GridPosition::new(1, 1), Direction::North)
            .expect("placement succeeds");

        assert_eq!(query::robots(&coordinator).len(), 1);
        assert_eq!(
            query::position_of(&coordinator, robot),
            Some(GridPosition::new(1, 1))
        );
    }

    #[test]
    fn robot_limit_blocks_new_identities() {
        let mut coordinator = game(5, 5, 1);
        coordinator
            .place(RobotId::from_u128(1), GridPosition::new(1, 1), Direction::North)
            .expect("first robot fits");

        let error = coordinator
            .place(RobotId::from_u128(2), GridPosition::new(2, 2), Direction::North)
            .expect_err("second robot exceeds limit");

        assert_eq!(error, CoordinatorError::RobotLimitReached);
        assert_eq!(query::robots(&coordinator).len(), 1);
    }

    #[test]
    fn replacing_known_robot_updates_heading_and_cell() {
        let mut coordinator = game(5, 5, 1);
        let robot = RobotId::from_u128(1);
        coordinator
            .place(robot, GridPosition::new(1, 1), Direction::North)
            .expect("placement succeeds");

        coordinator
            .place(robot, GridPosition::new(3, 4), Direction::South)
            .expect("re-placement succeeds");

        let report = coordinator.report().expect("report succeeds");
        assert_eq!(
            report,
            vec![RobotReport {
                robot,
                position: GridPosition::new(3, 4),
                facing: Direction::South,
            }]
        );
    }

    #[test]
    fn failed_replacement_keeps_previous_heading() {
        let mut coordinator = game(5, 5, 1);
        let robot = RobotId::from_u128(1);
        coordinator
            .place(robot, GridPosition::new(1, 1), Direction::North)
            .expect("placement succeeds");

        let error = coordinator
            .place(robot, GridPosition::new(9, 9), Direction::South)
            .expect_err("off-board re-placement fails");

        assert_eq!(error, CoordinatorError::Board(BoardError::OffBoard));
        let report = coordinator.report().expect("report succeeds");
        assert_eq!(report[0].facing, Direction::North);
        assert_eq!(report[0].position, GridPosition::new(1, 1));
    }

    #[test]
    fn failed_fresh_placement_registers_nothing() {
        let mut coordinator = game(5, 5, 1);

        let error = coordinator
            .place(RobotId::from_u128(1), GridPosition::new(-1, 0), Direction::East)
            .expect_err("out of bounds placement fails");

        assert!(matches!(
            error,
            CoordinatorError::Board(BoardError::OutOfBounds { .. })
        ));
        assert!(query::robots(&coordinator).is_empty());
        assert_eq!(coordinator.report(), Ok(Vec::new()));
    }

    #[test]
    fn move_applies_heading_offset() {
        let mut coordinator = game(5, 5, 1);
        let robot = RobotId::from_u128(1);
        coordinator
            .place(robot, GridPosition::new(1, 2), Direction::East)
            .expect("placement succeeds");

        coordinator.move_robot(robot).expect("move succeeds");

        assert_eq!(
            query::position_of(&coordinator, robot),
            Some(GridPosition::new(2, 2))
        );
    }

    #[test]
    fn move_off_board_leaves_robot_in_place() {
        let mut coordinator = game(5, 5, 1);
        let robot = RobotId::from_u128(1);
        coordinator
            .place(robot, GridPosition::new(0, 0), Direction::South)
            .expect("placement succeeds");

        let error = coordinator.move_robot(robot).expect_err("move must fail");

        assert_eq!(
            error.to_string(),
            "Unable to move robot. Moving robot in current direction will move it off the board."
        );
        assert_eq!(
            query::position_of(&coordinator, robot),
            Some(GridPosition::new(0, 0))
        );
    }

    #[test]
    fn unknown_robot_cannot_move_or_turn() {
        let mut coordinator = game(5, 5, 1);
        let stranger = RobotId::from_u128(42);
        let unknown = CoordinatorError::UnknownRobot { robot: stranger };

        let moved = coordinator.move_robot(stranger).expect_err("move refused");
        assert_eq!(moved, CoordinatorError::UnregisteredRobot { robot: stranger });
        assert_eq!(
            moved.to_string(),
            "Robot for specified id does not exist, place robot on the board again"
        );

        assert_eq!(coordinator.turn_left(stranger), Err(unknown.clone()));
        assert_eq!(coordinator.turn_right(stranger), Err(unknown.clone()));
        assert_eq!(unknown.to_string(), "Robot for specified id does not exist");
    }

    #[test]
    fn reinitializing_board_clears_registry() {
        let mut coordinator = game(5, 5, 1);
        let robot = RobotId::from_u128(1);
        coordinator
            .place(robot, GridPosition::new(0, 0), Direction::North)
            .expect("placement succeeds");

        coordinator.initialize_board(3, 3).expect("resize succeeds");

        assert!(query::robots(&coordinator).is_empty());
        assert_eq!(
            coordinator.move_robot(robot),
            Err(CoordinatorError::UnregisteredRobot { robot })
        );
    }

    #[test]
    fn limit_cannot_drop_below_registry_size() {
        let mut coordinator = game(5, 5, 2);
        coordinator
            .place(RobotId::from_u128(1), GridPosition::new(0, 0), Direction::North)
            .expect("placement succeeds");
        coordinator
            .place(RobotId::from_u128(2), GridPosition::new(1, 0), Direction::North)
            .expect("placement succeeds");

        assert_eq!(
            coordinator.set_robot_limit(1),
            Err(CoordinatorError::LimitBelowRegistered {
                limit: 1,
                registered: 2
            })
        );
        assert_eq!(coordinator.robot_limit(), 2);
    }

    #[test]
    fn place_new_generates_distinct_identities() {
        let mut coordinator = game(5, 5, 2);
        let first = coordinator
            .place_new(GridPosition::new(0, 0), Direction::North)
            .expect("first placement succeeds");
        let second = coordinator
            .place_new(GridPosition::new(4, 4), Direction::West)
            .expect("second placement succeeds");

        assert_ne!(first, second);
        let order: Vec<RobotId> = coordinator
            .report()
            .expect("report succeeds")
            .into_iter()
            .map(|entry| entry.robot)
            .collect();
        assert_eq!(order, vec![first, second]);
    }
}
