//! Player movement through a generated maze.
//!
//! The controller is driven by discrete requests. Whoever animates a move
//! reports back with [`NavigationController::complete_move`]; until then further
//! move requests are dropped. The controller never owns the maze, it is handed
//! the current one with each request.

use log::trace;
use std::mem;

use crate::cells::{offset_coordinate, CompassPrimary, GridCoordinate};
use crate::maze::Maze;

/// Player facing status, for presentation only. Acceptance of a move is gated
/// solely by the busy flag.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PlayerState {
    Idle,
    Moving,
    HitWall,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveOutcome {
    Accepted {
        position: GridCoordinate,
        reached_goal: bool,
    },
    /// Out of bounds or into a wall. The position is unchanged.
    Rejected,
    /// A previous move has not completed yet.
    Ignored,
}

/// Notifications for renderers, audio and the like. Data only.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum NavigationEvent {
    MoveStarted {
        from: GridCoordinate,
        to: GridCoordinate,
    },
    MoveCompleted(GridCoordinate),
    WallHit(GridCoordinate),
    GoalReached(GridCoordinate),
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    position: GridCoordinate,
    state: PlayerState,
    busy: bool,
    events: Vec<NavigationEvent>,
}

impl NavigationController {
    pub fn new(start: GridCoordinate) -> NavigationController {
        NavigationController {
            position: start,
            state: PlayerState::Idle,
            busy: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> GridCoordinate {
        self.position
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Can the player stand on `target`: inside the grid and not a wall.
    pub fn is_valid(maze: &Maze, target: GridCoordinate) -> bool {
        maze.grid().is_passage(target)
    }

    /// Try to step one cell in `direction`.
    pub fn request_move(&mut self, maze: &Maze, direction: CompassPrimary) -> MoveOutcome {
        debug_assert!(maze.grid().is_passage(self.position),
                      "player is off the passages at {}", self.position);

        if self.busy {
            trace!("Ignoring {:?} move, still moving to {}", direction, self.position);
            return MoveOutcome::Ignored;
        }

        let from = self.position;
        let target = offset_coordinate(from, direction, 1)
            .filter(|target| NavigationController::is_valid(maze, *target));

        match target {
            Some(to) => {
                self.busy = true;
                self.state = PlayerState::Moving;
                self.position = to;
                self.events.push(NavigationEvent::MoveStarted { from, to });

                let reached_goal = to == maze.goal();
                if reached_goal {
                    self.events.push(NavigationEvent::GoalReached(to));
                }
                trace!("Moving {:?} from {} to {}", direction, from, to);
                MoveOutcome::Accepted {
                    position: to,
                    reached_goal,
                }
            }
            None => {
                self.state = PlayerState::HitWall;
                self.events.push(NavigationEvent::WallHit(from));
                trace!("Wall hit moving {:?} from {}", direction, from);
                MoveOutcome::Rejected
            }
        }
    }

    /// The move transition has finished, accept the next move.
    /// Does nothing when no move is in flight.
    pub fn complete_move(&mut self) {
        if self.busy {
            self.busy = false;
            self.state = PlayerState::Idle;
            self.events.push(NavigationEvent::MoveCompleted(self.position));
        }
    }

    /// The wall hit reaction has finished.
    pub fn complete_wall_hit(&mut self) {
        if self.state == PlayerState::HitWall {
            self.state = PlayerState::Idle;
        }
    }

    /// Take the events raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<NavigationEvent> {
        mem::replace(&mut self.events, Vec::new())
    }
}
