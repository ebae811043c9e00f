//! One player's game: the current maze and the navigation state on it.

use log::info;

use crate::cells::{CellKind, CompassPrimary, GridCoordinate};
use crate::errors::Result;
use crate::generators;
use crate::maze::Maze;
use crate::navigation::{MoveOutcome, NavigationController, NavigationEvent, PlayerState};
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// The reference maze is 20 cells square.
pub const DEFAULT_MAZE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: Width,
    pub height: Height,
    /// Seed of the first maze; the n-th regeneration uses `seed + n`.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            width: Width(DEFAULT_MAZE_SIZE),
            height: Height(DEFAULT_MAZE_SIZE),
            seed: None,
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    generation: u64,
    maze: Maze,
    navigation: NavigationController,
    moves_made: usize,
    wall_hits: usize,
    has_won: bool,
}

impl GameSession {
    /// Generate the first maze and put the player on its start.
    pub fn new(config: SessionConfig) -> Result<GameSession> {
        let maze = generators::generate(config.width, config.height, config.seed)?;
        let navigation = NavigationController::new(maze.start());
        info!("New {}x{} maze, start {} goal {}",
              config.width.0, config.height.0, maze.start(), maze.goal());
        Ok(GameSession {
            config,
            generation: 0,
            maze,
            navigation,
            moves_made: 0,
            wall_hits: 0,
            has_won: false,
        })
    }

    /// Replace the maze and reset the player. Any move still in flight is
    /// discarded along with its pending events.
    ///
    /// On error the current maze and player are left untouched.
    pub fn regenerate(&mut self) -> Result<()> {
        let generation = self.generation + 1;
        let seed = self.config.seed.map(|seed| seed.wrapping_add(generation));
        let maze = generators::generate(self.config.width, self.config.height, seed)?;

        self.navigation = NavigationController::new(maze.start());
        self.maze = maze;
        self.generation = generation;
        self.moves_made = 0;
        self.wall_hits = 0;
        self.has_won = false;
        info!("Regenerated maze #{}, start {} goal {}",
              generation, self.maze.start(), self.maze.goal());
        Ok(())
    }

    pub fn request_move(&mut self, direction: CompassPrimary) -> MoveOutcome {
        let outcome = self.navigation.request_move(&self.maze, direction);
        match outcome {
            MoveOutcome::Accepted { reached_goal, position } => {
                self.moves_made += 1;
                if reached_goal && !self.has_won {
                    self.has_won = true;
                    info!("Goal {} reached in {} moves", position, self.moves_made);
                }
            }
            MoveOutcome::Rejected => self.wall_hits += 1,
            MoveOutcome::Ignored => {}
        }
        outcome
    }

    #[inline]
    pub fn complete_move(&mut self) {
        self.navigation.complete_move();
    }

    #[inline]
    pub fn complete_wall_hit(&mut self) {
        self.navigation.complete_wall_hit();
    }

    #[inline]
    pub fn drain_events(&mut self) -> Vec<NavigationEvent> {
        self.navigation.drain_events()
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn cell_at(&self, row: RowIndex, column: ColumnIndex) -> Option<CellKind> {
        self.maze.cell_at(row, column)
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        self.maze.dimensions()
    }

    #[inline]
    pub fn start_position(&self) -> GridCoordinate {
        self.maze.start()
    }

    #[inline]
    pub fn goal_position(&self) -> GridCoordinate {
        self.maze.goal()
    }

    #[inline]
    pub fn current_position(&self) -> GridCoordinate {
        self.navigation.position()
    }

    #[inline]
    pub fn player_state(&self) -> PlayerState {
        self.navigation.state()
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.navigation.is_busy()
    }

    #[inline]
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    #[inline]
    pub fn wall_hits(&self) -> usize {
        self.wall_hits
    }

    #[inline]
    pub fn has_won(&self) -> bool {
        self.has_won
    }
}
