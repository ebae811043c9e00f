use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

/// Classification of a single grid cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellKind {
    Wall,
    Passage,
}

/// A cell position on the grid. `x` is the column, `y` is the row.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
/// Passage to passage links leaving one cell eastwards or southwards.
pub type CoordinatePairSmallVec = SmallVec<[(GridCoordinate, GridCoordinate); 2]>;

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> GridCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        GridCoordinate::new(col as u32, row as u32)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_width: usize) -> GridCoordinate {
        let x = index % row_width;
        let y = index / row_width;
        GridCoordinate::new(x as u32, y as u32)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Carving order of the maze generator: up, right, down, left.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    /// Unit step `(dx, dy)` in grid space. North is towards row 0.
    pub fn offset(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }

    /// WASD key bindings, either case.
    pub fn from_key(key: char) -> Option<CompassPrimary> {
        match key.to_ascii_lowercase() {
            'w' => Some(CompassPrimary::North),
            's' => Some(CompassPrimary::South),
            'a' => Some(CompassPrimary::West),
            'd' => Some(CompassPrimary::East),
            _ => None,
        }
    }
}

/// Creates a new coordinate `steps` cells away in the given direction.
/// Returns None if the coordinate is not representable (negative); the upper
/// bounds are for the grid to check.
pub fn offset_coordinate(coord: GridCoordinate,
                         dir: CompassPrimary,
                         steps: u32)
                         -> Option<GridCoordinate> {
    let (dx, dy) = dir.offset();
    let x = i64::from(coord.x) + dx * i64::from(steps);
    let y = i64::from(coord.y) + dy * i64::from(steps);
    if x < 0 || y < 0 || x > i64::from(u32::MAX) || y > i64::from(u32::MAX) {
        None
    } else {
        Some(GridCoordinate::new(x as u32, y as u32))
    }
}
