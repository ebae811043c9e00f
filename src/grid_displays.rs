use itertools::Itertools;
use std::fmt;

use crate::cells::{CellKind, GridCoordinate};
use crate::grid::Grid;
use crate::maze::Maze;
use crate::utils::FnvHashSet;

const WALL_GLYPH: char = '#';
const PASSAGE_GLYPH: char = ' ';

/// Text overlay for a grid dump: decides the glyph of passage cells.
pub trait GridDisplay {
    /// None leaves the plain passage glyph.
    fn render_cell_body(&self, _: GridCoordinate) -> Option<char> {
        None
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: GridCoordinate,
    goal: GridCoordinate,
    player: Option<GridCoordinate>,
}

impl StartEndPointsDisplay {
    pub fn new(maze: &Maze, player: Option<GridCoordinate>) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start: maze.start(),
            goal: maze.goal(),
            player,
        }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> Option<char> {
        if self.player == Some(coord) {
            Some('@')
        } else if coord == self.goal {
            Some('G')
        } else if coord == self.start {
            Some('S')
        } else {
            None
        }
    }
}

/// Marks the cells of a route, deferring to another overlay first.
pub struct PathDisplay<'a> {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
    underneath: Option<&'a dyn GridDisplay>,
}

impl<'a> PathDisplay<'a> {
    pub fn new(path: &[GridCoordinate], underneath: Option<&'a dyn GridDisplay>) -> PathDisplay<'a> {
        PathDisplay {
            on_path_coordinates: path.iter().cloned().collect(),
            underneath,
        }
    }
}

impl<'a> GridDisplay for PathDisplay<'a> {
    fn render_cell_body(&self, coord: GridCoordinate) -> Option<char> {
        self.underneath
            .and_then(|display| display.render_cell_body(coord))
            .or_else(|| if self.on_path_coordinates.contains(&coord) { Some('.') } else { None })
    }
}

/// A grid with an overlay, ready for `{}` formatting.
pub struct DisplayedGrid<'a> {
    grid: &'a Grid,
    overlay: &'a dyn GridDisplay,
}

impl<'a> DisplayedGrid<'a> {
    pub fn new(grid: &'a Grid, overlay: &'a dyn GridDisplay) -> DisplayedGrid<'a> {
        DisplayedGrid { grid, overlay }
    }
}

fn write_rows<F>(f: &mut fmt::Formatter, grid: &Grid, passage_glyph: F) -> fmt::Result
    where F: Fn(GridCoordinate) -> char
{
    for row in grid.iter_row() {
        let line = row.into_iter()
            .map(|coord| match grid.cell_at(coord) {
                Some(CellKind::Passage) => passage_glyph(coord),
                _ => WALL_GLYPH,
            })
            .join("");
        writeln!(f, "{}", line)?;
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_rows(f, self, |_| PASSAGE_GLYPH)
    }
}

impl<'a> fmt::Display for DisplayedGrid<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let overlay = self.overlay;
        write_rows(f, self.grid, |coord| overlay.render_cell_body(coord).unwrap_or(PASSAGE_GLYPH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn small_maze() -> Maze {
        let grid = Grid::from_text_rows(&["#####",
                                          "#   #",
                                          "### #",
                                          "#   #",
                                          "#####"]);
        Maze::from_parts(grid, gc(1, 1), gc(1, 3))
    }

    #[test]
    fn plain_grid_text() {
        let maze = small_maze();
        assert_eq!(format!("{}", maze.grid()),
                   "#####\n#   #\n### #\n#   #\n#####\n");
    }

    #[test]
    fn start_goal_and_player_markers() {
        let maze = small_maze();
        let overlay = StartEndPointsDisplay::new(&maze, Some(gc(3, 2)));
        assert_eq!(format!("{}", DisplayedGrid::new(maze.grid(), &overlay)),
                   "#####\n#S  #\n###@#\n#G  #\n#####\n");
    }

    #[test]
    fn path_overlay_keeps_end_points() {
        let maze = small_maze();
        let markers = StartEndPointsDisplay::new(&maze, None);
        let path = [gc(1, 1), gc(2, 1), gc(3, 1), gc(3, 2), gc(3, 3), gc(2, 3), gc(1, 3)];
        let overlay = PathDisplay::new(&path, Some(&markers));
        assert_eq!(format!("{}", DisplayedGrid::new(maze.grid(), &overlay)),
                   "#####\n#S..#\n###.#\n#G..#\n#####\n");
    }

    #[test]
    fn overlay_never_paints_walls() {
        let maze = small_maze();
        let path = [gc(0, 0), gc(4, 4)];
        let overlay = PathDisplay::new(&path, None);
        assert_eq!(format!("{}", DisplayedGrid::new(maze.grid(), &overlay)),
                   format!("{}", maze.grid()));
    }
}
