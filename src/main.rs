use docopt::Docopt;
use log::{debug, info, warn};
use serde_derive::Deserialize;
use maze_escape::{
    cells::CompassPrimary,
    grid_displays::{DisplayedGrid, GridDisplay, PathDisplay, StartEndPointsDisplay},
    maze::Maze,
    navigation::MoveOutcome,
    pathing,
    session::{GameSession, SessionConfig},
    units::{Height, Width},
};
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Escape

Usage:
    maze_escape_driver -h | --help
    maze_escape_driver [--width=<w> --height=<h>] [--seed=<s>] [--moves=<keys>] [--show-path] [--regenerate=<n>] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --width=<w>            The maze width in cells [default: 20].
    --height=<h>           The maze height in cells [default: 20].
    --seed=<s>             Seed for reproducible mazes. A fresh random maze is made if not given.
    --moves=<keys>         Play a sequence of WASD key presses from the start. Each accepted move completes before the next key.
    --show-path            Mark the shortest route from start to goal.
    --regenerate=<n>       Replace the maze n times before playing, like pressing restart [default: 0].
    --text-out=<path>      Write the final maze text to a file instead of stdout.
    --save-edges=<path>    Serialize the passage graph to a text file: each line is a pair of numbers. Line 1: n(#cells) m(#edges). Line 2+ edge between cells. Uses 1-based row major cell indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_moves: String,
    flag_show_path: bool,
    flag_regenerate: usize,
    flag_text_out: String,
    flag_save_edges: String,
}

// Create the Error, ErrorKind, ResultExt, and Result types for the driver.
// Maze errors from the library are linked in so `?` works on them directly.
mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Maze(::maze_escape::errors::Error, ::maze_escape::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let config = SessionConfig {
        width: Width(args.flag_width),
        height: Height(args.flag_height),
        seed: args.flag_seed,
    };
    let mut session = GameSession::new(config)?;
    for _ in 0..args.flag_regenerate {
        session.regenerate()?;
    }

    if !args.flag_moves.is_empty() {
        play_moves(&mut session, &args.flag_moves);
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(session.maze(), &args.flag_save_edges)?;
    }

    let text = maze_text(&session, args.flag_show_path);
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Feed key presses to the session, completing every transition immediately.
/// Keys that are not WASD are skipped.
fn play_moves(session: &mut GameSession, keys: &str) {
    for key in keys.chars() {
        let direction = match CompassPrimary::from_key(key) {
            Some(direction) => direction,
            None => {
                warn!("Skipping unknown key {:?}", key);
                continue;
            }
        };

        match session.request_move(direction) {
            MoveOutcome::Accepted { position, reached_goal } => {
                info!("{:?} -> {}{}", direction, position, if reached_goal { " (goal!)" } else { "" });
                session.complete_move();
            }
            MoveOutcome::Rejected => {
                info!("{:?} -> wall at {}", direction, session.current_position());
                session.complete_wall_hit();
            }
            MoveOutcome::Ignored => {}
        }
        for event in session.drain_events() {
            debug!("{:?}", event);
        }
    }

    info!("Position {} after {} moves and {} wall hits{}",
          session.current_position(),
          session.moves_made(),
          session.wall_hits(),
          if session.has_won() { ", maze cleared" } else { "" });
}

fn maze_text(session: &GameSession, show_path: bool) -> String {
    let maze = session.maze();
    let markers = StartEndPointsDisplay::new(maze, Some(session.current_position()));

    let path = if show_path { solution_path(maze) } else { Vec::new() };
    let path_display = PathDisplay::new(&path, Some(&markers));
    let overlay: &dyn GridDisplay = if show_path { &path_display } else { &markers };

    format!("{}", DisplayedGrid::new(maze.grid(), overlay))
}

fn solution_path(maze: &Maze) -> Vec<maze_escape::cells::GridCoordinate> {
    pathing::Distances::new(maze.grid(), maze.start())
        .and_then(|distances| pathing::shortest_path(maze.grid(), &distances, maze.goal()))
        .unwrap_or_else(Vec::new)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {
    let grid = maze.grid();

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", grid.size(), grid.links_count()));

    for (src, dst) in grid.iter_links() {
        let index_a = grid.grid_coordinate_to_index(src)
            .ok_or("Links iter should give valid coordinate")?;
        let index_b = grid.grid_coordinate_to_index(dst)
            .ok_or("Links iter should give valid coordinate")?;
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
