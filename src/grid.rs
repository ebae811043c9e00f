use bit_set::BitSet;
use petgraph::graph::{NodeIndex, UnGraph};
use std::fmt;

use crate::cells::{
    offset_coordinate, CellKind, CompassPrimary, CoordinatePairSmallVec, CoordinateSmallVec, GridCoordinate,
};
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{ColumnIndex, Height, RowIndex, Width};
use crate::utils;

/// A rectangular grid of wall and passage cells.
///
/// Only the generator carves passages, so a `Grid` handed out by a `Maze` is
/// effectively immutable.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    passages: BitSet,
    width: Width,
    height: Height,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width, self.height, self.passage_count())
    }
}

impl Grid {
    /// A grid where every cell is a wall.
    pub(crate) fn filled_with_walls(width: Width, height: Height) -> Grid {
        Grid {
            passages: BitSet::with_capacity(width.0 * height.0),
            width,
            height,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        (self.width, self.height)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Wall or passage classification, None outside of the grid.
    pub fn cell_at(&self, coord: GridCoordinate) -> Option<CellKind> {
        self.grid_coordinate_to_index(coord).map(|index| {
            if self.passages.contains(index) {
                CellKind::Passage
            } else {
                CellKind::Wall
            }
        })
    }

    #[inline]
    pub fn cell_at_row_column(&self, row: RowIndex, column: ColumnIndex) -> Option<CellKind> {
        self.cell_at(GridCoordinate::from_row_column_indices(column, row))
    }

    #[inline]
    pub fn is_passage(&self, coord: GridCoordinate) -> bool {
        self.cell_at(coord) == Some(CellKind::Passage)
    }

    /// Reclassify a cell as a passage. Returns false if the coordinate is invalid.
    pub(crate) fn carve(&mut self, coord: GridCoordinate) -> bool {
        if let Some(index) = self.grid_coordinate_to_index(coord) {
            self.passages.insert(index);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction, 1).filter(|c| self.is_valid_coordinate(*c))
    }

    /// Cells to the North, East, South or West of a cell, whatever their classification.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Passage cells one step away from a passage cell. Walls have no links.
    pub fn links(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        if !self.is_passage(coord) {
            return CoordinateSmallVec::new();
        }
        self.neighbours(coord)
            .into_iter()
            .filter(|neighbour| self.is_passage(*neighbour))
            .collect()
    }

    /// Number of unit step adjacencies between passage cells.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.height)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.width, self.height)
    }

    pub fn iter_passages<'a>(&'a self) -> impl Iterator<Item = GridCoordinate> + 'a {
        let row_width = self.width.0;
        self.passages
            .iter()
            .map(move |index| GridCoordinate::from_row_major_index(index, row_width))
    }

    /// Every passage to passage adjacency exactly once, as (cell, east or south neighbour).
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        self.iter_passages().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                .filter(|neighbour| self.is_passage(*neighbour))
                .map(|neighbour| (coord, neighbour))
                .collect::<CoordinatePairSmallVec>()
        })
    }

    /// The passage cells as an undirected graph, one node per passage and one
    /// edge per unit step link.
    pub fn passage_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let passages = self.passage_count();
        let mut graph = UnGraph::with_capacity(passages, passages);
        let mut node_indices = utils::fnv_hashmap::<GridCoordinate, NodeIndex>(passages);

        for coord in self.iter_passages() {
            node_indices.insert(coord, graph.add_node(coord));
        }
        for (a, b) in self.iter_links() {
            if let (Some(&a_index), Some(&b_index)) = (node_indices.get(&a), node_indices.get(&b)) {
                graph.add_edge(a_index, b_index, ());
            }
        }
        graph
    }

    /// Build a grid from text rows, `#` for walls and anything else for passages.
    #[cfg(test)]
    pub(crate) fn from_text_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Grid::filled_with_walls(Width(width), Height(height));
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                if glyph != '#' {
                    grid.carve(GridCoordinate::new(x as u32, y as u32));
                }
            }
        }
        grid
    }
}
