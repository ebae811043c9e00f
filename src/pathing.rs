use petgraph::algo::{connected_components, is_cyclic_undirected};
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Flood fill step counts from a start cell to every passage cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if the start is not a passage cell of the grid.
    pub fn new(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {
        if !grid.is_passage(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.passage_count());
        distances.insert(start_coordinate, 0);

        // Every link is one step, so the first distance recorded for a cell is
        // already its shortest. The map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in grid.links(*cell_coord) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Number of cells reached, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back from `end_point` towards the start, always stepping to a linked
/// neighbour one closer. None if the end is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.links(current_coord)
            .into_iter()
            .find(|coord| distances_from_start.distance_from_start_to(*coord) == Some(current_distance - 1))?;

        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// A perfect maze has exactly one route between any two passage cells: the
/// passages form a single connected, acyclic component.
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let graph = grid.passage_graph();
    graph.node_count() > 0 && connected_components(&graph) == 1 && !is_cyclic_undirected(&graph)
}
