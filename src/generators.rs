use crate::cells::{CellCoordinate, CoordinateOptionSmallVec, ALL_DIRECTIONS};
use crate::passages::{InvalidGridError, PassageGrid};

use bit_set::BitSet;
use rand::Rng;

/// Carve a perfect maze into the grid with the randomized depth-first
/// ("recursive backtracker") algorithm, starting the traversal at `start`.
///
/// Every newly visited cell assembles its four neighbours (up, right, down,
/// left), shuffles them into a uniformly random order, then walks them in
/// that order skipping out-of-bounds and already-visited cells, opening the
/// shared passage and descending otherwise. Visiting only unvisited cells
/// means the open passages form a spanning tree: size() - 1 passages,
/// every cell reachable, no cycles.
///
/// The traversal keeps its own worklist of frames so the depth of a carved
/// corridor never translates into call-stack depth.
pub fn recursive_backtracker<R: Rng>(
    grid: &mut PassageGrid,
    start: CellCoordinate,
    rng: &mut R,
) -> Result<(), InvalidGridError> {

    if !grid.is_valid_coordinate(start) {
        return Err(InvalidGridError::OutOfBoundsStart(start));
    }

    let mut carver = Carver::new(grid.size());
    carver.carve(grid, start, rng);
    Ok(())
}

/// Uniform in-place Fisher-Yates shuffle: swap a uniformly random element of
/// the unprocessed prefix to the end of that prefix, shrinking the prefix
/// each step. The neighbour visitation order this produces is what decides
/// the maze's branching structure, so a biased permutation would skew the
/// topology towards particular corridor directions.
fn shuffle<T, R: Rng>(rng: &mut R, values: &mut [T]) {
    let mut counter = values.len();
    while counter > 1 {
        let index = rng.gen_range(0, counter);
        counter -= 1;
        values.swap(counter, index);
    }
}

/// One depth-first traversal in progress: the visited set plus a stack of
/// per-cell frames standing in for the call stack of the recursive
/// formulation.
struct Carver {
    visited: BitSet,
    stack: Vec<Frame>,
}

struct Frame {
    cell: CellCoordinate,
    /// This cell's neighbours in their shuffled visitation order;
    /// out-of-bounds entries are None.
    neighbours: CoordinateOptionSmallVec,
    next: usize,
}

impl Frame {
    fn next_candidate(&mut self) -> Option<CellCoordinate> {
        while self.next < self.neighbours.len() {
            let candidate = self.neighbours[self.next];
            self.next += 1;
            if candidate.is_some() {
                return candidate;
            }
        }
        None
    }
}

impl Carver {
    fn new(cells_count: usize) -> Carver {
        Carver {
            visited: BitSet::with_capacity(cells_count),
            stack: Vec::with_capacity(cells_count),
        }
    }

    fn carve<R: Rng>(&mut self, grid: &mut PassageGrid, start: CellCoordinate, rng: &mut R) {

        self.enter(grid, start, rng);

        while !self.stack.is_empty() {
            let top = self.stack.len() - 1;
            let candidate = self.stack[top].next_candidate();

            match candidate {
                Some(next_cell) => {
                    if self.visited.contains(cell_index(grid, next_cell)) {
                        // Carving into a visited cell would close a cycle.
                        continue;
                    }
                    let cell = self.stack[top].cell;
                    let linked = grid.link(cell, next_cell);
                    debug_assert!(linked.is_ok(), "carve step linked non-neighbour cells");
                    self.enter(grid, next_cell, rng);
                }
                None => {
                    // Neighbour list exhausted, backtrack.
                    let _ = self.stack.pop();
                }
            }
        }
    }

    fn enter<R: Rng>(&mut self, grid: &PassageGrid, cell: CellCoordinate, rng: &mut R) {
        self.visited.insert(cell_index(grid, cell));

        let mut neighbours: CoordinateOptionSmallVec = ALL_DIRECTIONS
            .iter()
            .map(|&direction| grid.neighbour_at_direction(cell, direction))
            .collect();
        shuffle(rng, &mut *neighbours);

        self.stack.push(Frame {
            cell,
            neighbours,
            next: 0,
        });
    }
}

fn cell_index(grid: &PassageGrid, coord: CellCoordinate) -> usize {
    grid.grid_coordinate_to_index(coord)
        .expect("traversal coordinates stay inside the grid")
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::analysis;
    use crate::pathing::Distances;
    use crate::units::{ColumnsCount, RowsCount};

    use itertools::Itertools;
    use quickcheck::quickcheck;
    use rand::{SeedableRng, XorShiftRng};

    fn seeded_rng(seed: u32) -> XorShiftRng {
        XorShiftRng::from_seed([0x193a_6754 ^ seed, 0xa8a7_d469, 0x9783_0e05, 0x113b_a7bb])
    }

    fn carved_grid(rows: usize, columns: usize, start: CellCoordinate, seed: u32) -> PassageGrid {
        let mut grid = PassageGrid::new(RowsCount(rows), ColumnsCount(columns))
            .expect("test grid dimensions are valid");
        let mut rng = seeded_rng(seed);
        recursive_backtracker(&mut grid, start, &mut rng).expect("start cell is in bounds");
        grid
    }

    #[test]
    fn single_cell_grid_has_no_passages() {
        let grid = carved_grid(1, 1, CellCoordinate::new(0, 0), 1);
        assert_eq!(grid.links_count(), 0);
        assert!(analysis::is_perfect_maze(&grid));
    }

    #[test]
    fn two_by_two_is_a_spanning_tree() {
        for seed in 0..50 {
            let grid = carved_grid(2, 2, CellCoordinate::new(0, 0), seed);
            assert_eq!(grid.links_count(), 3);
            assert!(analysis::is_perfect_maze(&grid));
        }
    }

    #[test]
    fn five_by_five_interior_start() {
        for seed in 0..50 {
            let grid = carved_grid(5, 5, CellCoordinate::new(2, 2), seed);
            assert_eq!(grid.links_count(), 24);
            assert!(analysis::is_perfect_maze(&grid));
        }
    }

    #[test]
    fn every_cell_is_reachable_from_the_start() {
        let start = CellCoordinate::new(3, 1);
        let grid = carved_grid(6, 9, start, 7);
        let distances = Distances::<u32>::new(&grid, start).expect("start cell is in bounds");
        assert_eq!(distances.reached_count(), grid.size());
    }

    #[test]
    fn out_of_bounds_start_rejected_before_carving() {
        let mut grid = PassageGrid::new(RowsCount(3), ColumnsCount(3))
            .expect("test grid dimensions are valid");
        let outside = CellCoordinate::new(3, 0);
        let mut rng = seeded_rng(0);
        assert_eq!(recursive_backtracker(&mut grid, outside, &mut rng),
                   Err(InvalidGridError::OutOfBoundsStart(outside)));
        assert_eq!(grid.links_count(), 0);
    }

    #[test]
    fn carve_is_deterministic_for_a_fixed_seed() {
        let a = carved_grid(8, 6, CellCoordinate::new(5, 2), 99);
        let b = carved_grid(8, 6, CellCoordinate::new(5, 2), 99);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = seeded_rng(42);
        for len in 0..10 {
            let original: Vec<u32> = (0..len).collect();
            let mut shuffled = original.clone();
            shuffle(&mut rng, &mut shuffled[..]);
            assert_eq!(shuffled.iter().cloned().sorted(), original);
        }
    }

    #[test]
    fn quickcheck_carved_grids_are_spanning_trees() {
        fn prop(rows: usize, columns: usize, seed: u32) -> bool {
            let rows = rows % 12 + 1;
            let columns = columns % 12 + 1;
            let mut rng = seeded_rng(seed);
            let mut grid = PassageGrid::new(RowsCount(rows), ColumnsCount(columns))
                .expect("dimensions are non-zero");
            let start = grid.random_cell(&mut rng);
            recursive_backtracker(&mut grid, start, &mut rng).expect("start cell is in bounds");

            grid.links_count() == rows * columns - 1 && analysis::is_perfect_maze(&grid)
        }
        quickcheck(prop as fn(usize, usize, u32) -> bool);
    }

    #[test]
    fn quickcheck_same_seed_same_maze() {
        fn prop(seed: u32) -> bool {
            let carve = |seed| carved_grid(5, 7, CellCoordinate::new(0, 0), seed);
            carve(seed) == carve(seed)
        }
        quickcheck(prop as fn(u32) -> bool);
    }
}
