use bit_set::BitSet;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::cells::{offset_coordinate, CompassPrimary, GridCoordinate};
use crate::errors::{ErrorKind, Result, MIN_DIMENSION};
use crate::grid::Grid;
use crate::maze::Maze;
use crate::pathing::Distances;
use crate::units::{Height, Width};
use crate::utils;

/// Where carving starts and where the player starts.
pub const CARVE_ORIGIN: GridCoordinate = GridCoordinate { x: 1, y: 1 };

/// Generate a maze with the recursive backtracker, then place the start and goal.
///
/// The same `seed` always yields the same maze for a given `rand` release;
/// `StdRng` may change its output between `rand` versions, so stored seeds are
/// only stable while the dependency is pinned. Without a seed the thread local
/// random source is used.
pub fn generate(width: Width, height: Height, seed: Option<u64>) -> Result<Maze> {
    match seed {
        Some(s) => generate_with_rng(width, height, &mut StdRng::seed_from_u64(s)),
        None => generate_with_rng(width, height, &mut rand::thread_rng()),
    }
}

/// Like `generate`, drawing every carving choice from `rng`.
///
/// Fails with `InvalidDimensions` when either side is below `MIN_DIMENSION`.
pub fn generate_with_rng<R: Rng>(width: Width, height: Height, rng: &mut R) -> Result<Maze> {
    if width.0 < MIN_DIMENSION || height.0 < MIN_DIMENSION {
        return Err(ErrorKind::InvalidDimensions(width.0, height.0).into());
    }

    let mut grid = recursive_backtracker(width, height, rng);
    let goal = select_goal(&mut grid);

    let reachable = Distances::new(&grid, CARVE_ORIGIN)
        .and_then(|distances| distances.distance_from_start_to(goal))
        .is_some();
    if !reachable {
        return Err(ErrorKind::InconsistentGoal(goal).into());
    }

    debug!("Generated {}x{} maze with {} passages, goal at {}",
           width.0, height.0, grid.passage_count(), goal);
    Ok(Maze::from_parts(grid, CARVE_ORIGIN, goal))
}

/// Carve a perfect maze into an all wall grid with a randomised depth first
/// search on the lattice of odd coordinates.
///
/// Lattice cells are two steps apart; linking two of them carves the wall cell
/// between them. The explicit stack holds the current route back to the origin,
/// so there is no recursion depth limit on big grids. The outer border is never
/// carved.
pub fn recursive_backtracker<R: Rng>(width: Width, height: Height, rng: &mut R) -> Grid {
    let mut grid = Grid::filled_with_walls(width, height);
    let mut visited = BitSet::with_capacity(grid.size());

    if !is_interior(width, height, CARVE_ORIGIN) {
        return grid;
    }

    mark_visited(&mut grid, &mut visited, CARVE_ORIGIN);
    let mut stack = vec![CARVE_ORIGIN];

    while let Some(&current) = stack.last() {

        // (lattice neighbour, wall between) pairs in up, right, down, left order
        let candidates = CompassPrimary::ALL
            .iter()
            .filter_map(|dir| {
                let next = offset_coordinate(current, *dir, 2)?;
                let between = offset_coordinate(current, *dir, 1)?;
                let index = grid.grid_coordinate_to_index(next)?;
                if is_interior(width, height, next) && !visited.contains(index) {
                    Some((next, between))
                } else {
                    None
                }
            })
            .collect::<SmallVec<[(GridCoordinate, GridCoordinate); 4]>>();

        if candidates.is_empty() {
            stack.pop();
        } else {
            let (next, between) = candidates[rng.gen_range(0..candidates.len())];
            grid.carve(between);
            mark_visited(&mut grid, &mut visited, next);
            stack.push(next);
        }
    }

    grid
}

/// Carve a lattice cell and record it as joined to the maze.
fn mark_visited(grid: &mut Grid, visited: &mut BitSet, coord: GridCoordinate) {
    grid.carve(coord);
    if let Some(index) = grid.grid_coordinate_to_index(coord) {
        visited.insert(index);
    }
}

/// Pick the goal near the corner opposite the start: the first passage scanning
/// the bottom three interior rows upwards, each from the right.
///
/// If that window holds no passage the corner cell `(width - 2, height - 2)` is
/// forced open together with a corridor to the closest passage, so the goal is
/// always connected to the rest of the maze.
pub fn select_goal(grid: &mut Grid) -> GridCoordinate {
    let (Width(width), Height(height)) = grid.dimensions();

    for y in (height.saturating_sub(4)..=height - 2).rev() {
        for x in (width.saturating_sub(4)..=width - 2).rev() {
            let coord = GridCoordinate::new(x as u32, y as u32);
            if grid.is_passage(coord) {
                return coord;
            }
        }
    }

    let corner = GridCoordinate::new((width - 2) as u32, (height - 2) as u32);
    warn!("No passage near the goal corner, carving a corridor to {}", corner);
    carve_connecting_corridor(grid, corner);
    corner
}

/// Carve `from` and the shortest interior route from it to the nearest passage.
fn carve_connecting_corridor(grid: &mut Grid, from: GridCoordinate) {
    let (width, height) = grid.dimensions();
    let mut came_from = utils::fnv_hashmap::<GridCoordinate, GridCoordinate>(grid.size());
    let mut frontier = VecDeque::new();
    came_from.insert(from, from);
    frontier.push_back(from);

    let mut reached = None;
    while let Some(current) = frontier.pop_front() {
        if current != from && grid.is_passage(current) {
            reached = Some(current);
            break;
        }
        for neighbour in grid.neighbours(current) {
            if is_interior(width, height, neighbour) && !came_from.contains_key(&neighbour) {
                came_from.insert(neighbour, current);
                frontier.push_back(neighbour);
            }
        }
    }

    grid.carve(from);
    if let Some(mut cell) = reached {
        while let Some(&previous) = came_from.get(&cell) {
            if previous == cell {
                break;
            }
            grid.carve(previous);
            cell = previous;
        }
    }
}

#[inline]
fn is_interior(width: Width, height: Height, coord: GridCoordinate) -> bool {
    let (x, y) = (coord.x as usize, coord.y as usize);
    x >= 1 && y >= 1 && x + 1 < width.0 && y + 1 < height.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellKind;
    use crate::errors::Error;
    use crate::pathing::is_perfect_maze;
    use quickcheck::quickcheck;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn dimension_from(n: u8) -> usize {
        MIN_DIMENSION + (n as usize % 40)
    }

    fn is_connected(maze: &Maze) -> bool {
        Distances::new(maze.grid(), maze.start())
            .map_or(false, |distances| distances.reachable_count() == maze.grid().passage_count())
    }

    fn border_is_walled(grid: &Grid) -> bool {
        let (Width(width), Height(height)) = grid.dimensions();
        grid.iter()
            .filter(|c| c.x == 0 || c.y == 0 || c.x as usize == width - 1 || c.y as usize == height - 1)
            .all(|c| grid.cell_at(c) == Some(CellKind::Wall))
    }

    fn expect_kind(result: Result<Maze>) -> ErrorKind {
        match result {
            Ok(maze) => panic!("expected an error, got {:?}", maze),
            Err(Error(kind, _)) => kind,
        }
    }

    #[test]
    fn too_small_dimensions_are_rejected() {
        match expect_kind(generate(Width(2), Height(20), Some(1))) {
            ErrorKind::InvalidDimensions(2, 20) => {}
            other => panic!("unexpected error {:?}", other),
        }
        match expect_kind(generate(Width(20), Height(0), None)) {
            ErrorKind::InvalidDimensions(20, 0) => {}
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn smallest_maze_is_a_single_cell() {
        let maze = generate(Width(3), Height(3), Some(9)).unwrap();
        assert_eq!(maze.start(), gc(1, 1));
        assert_eq!(maze.goal(), gc(1, 1));
        assert_eq!(maze.grid().passage_count(), 1);
    }

    #[test]
    fn reference_size_maze() {
        let maze = generate(Width(20), Height(20), Some(2024)).unwrap();
        let grid = maze.grid();

        assert_eq!(maze.start(), CARVE_ORIGIN);
        assert!(grid.is_passage(maze.start()));
        assert!(grid.is_passage(maze.goal()));
        // every odd lattice cell from 1 to 17 joins the tree
        assert_eq!(maze.goal(), gc(17, 17));
        assert!(border_is_walled(grid));
        for i in 0..20 {
            assert_eq!(grid.cell_at(gc(i, 18)), Some(CellKind::Wall));
            assert_eq!(grid.cell_at(gc(18, i)), Some(CellKind::Wall));
        }
        assert!(is_connected(&maze));
        assert_eq!(grid.links_count(), grid.passage_count() - 1);
        assert!(is_perfect_maze(grid));
    }

    #[test]
    fn odd_size_maze_reaches_the_last_interior_row() {
        let maze = generate(Width(21), Height(15), Some(77)).unwrap();
        // 10 x 7 lattice cells and 69 walls carved between them
        assert_eq!(maze.grid().passage_count(), 10 * 7 + 10 * 7 - 1);
        assert_eq!(maze.goal(), gc(19, 13));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(Width(20), Height(20), Some(42)).unwrap();
        let b = generate(Width(20), Height(20), Some(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.grid(), b.grid());
        assert_eq!((a.start(), a.goal()), (b.start(), b.goal()));
    }

    #[test]
    fn unseeded_generation_is_still_perfect() {
        for _ in 0..10 {
            let maze = generate(Width(15), Height(11), None).unwrap();
            assert!(is_connected(&maze));
            assert!(is_perfect_maze(maze.grid()));
        }
    }

    #[test]
    fn goal_scan_prefers_bottom_right() {
        let mut grid = Grid::from_text_rows(&["#######",
                                              "#     #",
                                              "# # # #",
                                              "#     #",
                                              "# ### #",
                                              "# #   #",
                                              "#######"]);
        assert_eq!(select_goal(&mut grid), gc(5, 5));

        let mut grid = Grid::from_text_rows(&["#######",
                                              "#     #",
                                              "# #####",
                                              "#   # #",
                                              "### # #",
                                              "#   ###",
                                              "#######"]);
        // row 5 from the right: (5,5) and (4,5) are walls, (3,5) is open
        assert_eq!(select_goal(&mut grid), gc(3, 5));
    }

    #[test]
    fn goal_fallback_carves_a_connecting_corridor() {
        let mut grid = Grid::filled_with_walls(Width(7), Height(7));
        grid.carve(CARVE_ORIGIN);

        let goal = select_goal(&mut grid);
        assert_eq!(goal, gc(5, 5));
        assert!(grid.is_passage(goal));

        let maze = Maze::from_parts(grid, CARVE_ORIGIN, goal);
        let distances = Distances::new(maze.grid(), maze.start()).unwrap();
        assert_eq!(distances.distance_from_start_to(goal), Some(8));
        assert!(is_connected(&maze));
        assert!(is_perfect_maze(maze.grid()));
        assert!(border_is_walled(maze.grid()));
    }

    #[test]
    fn quickcheck_generated_mazes_are_spanning_trees() {
        fn prop(seed: u64, w: u8, h: u8) -> bool {
            let (width, height) = (dimension_from(w), dimension_from(h));
            let maze = match generate(Width(width), Height(height), Some(seed)) {
                Ok(maze) => maze,
                Err(_) => return false,
            };
            let grid = maze.grid();
            is_connected(&maze) &&
            grid.links_count() == grid.passage_count() - 1 &&
            border_is_walled(grid) &&
            grid.is_passage(maze.goal())
        }
        quickcheck(prop as fn(u64, u8, u8) -> bool)
    }

    #[test]
    fn quickcheck_seeded_generation_is_deterministic() {
        fn prop(seed: u64, w: u8, h: u8) -> bool {
            let (width, height) = (Width(dimension_from(w)), Height(dimension_from(h)));
            match (generate(width, height, Some(seed)), generate(width, height, Some(seed))) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
        }
        quickcheck(prop as fn(u64, u8, u8) -> bool)
    }
}
