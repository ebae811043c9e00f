use crate::cells::{CellKind, GridCoordinate};
use crate::grid::Grid;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// A generated maze: the carved grid plus its start and goal cells.
/// Immutable once built; a new maze replaces an old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    start: GridCoordinate,
    goal: GridCoordinate,
}

impl Maze {
    pub(crate) fn from_parts(grid: Grid, start: GridCoordinate, goal: GridCoordinate) -> Maze {
        Maze { grid, start, goal }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> GridCoordinate {
        self.goal
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        self.grid.dimensions()
    }

    #[inline]
    pub fn cell_at(&self, row: RowIndex, column: ColumnIndex) -> Option<CellKind> {
        self.grid.cell_at_row_column(row, column)
    }
}
