//! Errors raised while building a maze.
//!
//! Rejected or ignored moves are not errors, see `navigation::MoveOutcome`.

// Create the Error, ErrorKind, ResultExt, and Result types
use error_chain::error_chain;

use crate::cells::GridCoordinate;

/// Mazes narrower or shorter than this have no interior cell to carve from.
pub const MIN_DIMENSION: usize = 3;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}, width and height must be at least {}",
                    width, height, MIN_DIMENSION)
        }
        InconsistentGoal(goal: GridCoordinate) {
            description("goal is not reachable from the start")
            display("goal {} is not reachable from the start", goal)
        }
    }
}
