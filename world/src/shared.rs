//! Lock-guarded coordinator handle for multi-threaded callers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use toy_robot_core::{Direction, GridPosition, RobotId, RobotReport};

use crate::{CoordinatorError, RobotCoordinator};

/// Cloneable handle that serialises every mutation of one coordinator.
///
/// All mutating calls take the write lock, so the board and registry change
/// together under a single exclusion boundary. Reports share the read lock.
#[derive(Debug)]
pub struct SharedCoordinator<C> {
    inner: Arc<RwLock<C>>,
}

impl<C> Clone for SharedCoordinator<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: RobotCoordinator> SharedCoordinator<C> {
    /// Moves the coordinator behind the lock.
    #[must_use]
    pub fn new(coordinator: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(coordinator)),
        }
    }

    /// Runs a read-only closure against the guarded coordinator.
    pub fn with<T>(&self, inspect: impl FnOnce(&C) -> T) -> T {
        inspect(&self.read())
    }

    // Coordinator operations are atomic; a poisoned guard still holds consistent state.
    fn read(&self) -> RwLockReadGuard<'_, C> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, C> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: RobotCoordinator> RobotCoordinator for SharedCoordinator<C> {
    fn robot_limit(&self) -> usize {
        self.read().robot_limit()
    }

    fn set_robot_limit(&mut self, limit: usize) -> Result<(), CoordinatorError> {
        self.write().set_robot_limit(limit)
    }

    fn initialize_board(&mut self, width: i32, height: i32) -> Result<(), CoordinatorError> {
        self.write().initialize_board(width, height)
    }

    fn place(
        &mut self,
        robot: RobotId,
        position: GridPosition,
        facing: Direction,
    ) -> Result<(), CoordinatorError> {
        self.write().place(robot, position, facing)
    }

    fn place_new(
        &mut self,
        position: GridPosition,
        facing: Direction,
    ) -> Result<RobotId, CoordinatorError> {
        self.write().place_new(position, facing)
    }

    fn move_robot(&mut self, robot: RobotId) -> Result<(), CoordinatorError> {
        self.write().move_robot(robot)
    }

    fn turn_left(&mut self, robot: RobotId) -> Result<(), CoordinatorError> {
        self.write().turn_left(robot)
    }

    fn turn_right(&mut self, robot: RobotId) -> Result<(), CoordinatorError> {
        self.write().turn_right(robot)
    }

    fn report(&self) -> Result<Vec<RobotReport>, CoordinatorError> {
        self.read().report()
    }
}
