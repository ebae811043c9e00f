//! **maze_escape** generates perfect mazes and moves a player through them one
//! cell at a time, reporting wall hits and goal arrival.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod maze;
pub mod navigation;
pub mod pathing;
pub mod session;
pub mod units;
mod utils;
