use std::fmt::{Debug, Display};
use std::ops::Add;

use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::CellCoordinate;
use crate::passages::PassageGrid;
use crate::utils;
use crate::utils::FnvHashMap;

/// Trait (hack) used purely as a generic type parameter alias because it
/// looks ugly to type this out each time. Generic parameter type aliases are
/// not in the language; `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord> MaxDistance for T {}

/// Breadth-first flood fill distances from a start cell to every cell
/// reachable through open passages.
///
/// Every passage costs one step, so a cell's distance is final the first
/// time the frontier reaches it and the distances map doubles as the
/// visited set.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: CellCoordinate,
    distances: FnvHashMap<CellCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    pub fn new(grid: &PassageGrid, start_coordinate: CellCoordinate) -> Option<Distances<MaxDistanceT>> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                // Unprocessed cells are infinitely far from the start, which
                // shows up as the max value when first touched.
                let distance_to_cell: MaxDistanceT = *distances.entry(*cell_coord)
                    .or_insert_with(Bounded::max_value);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord)
                    .expect("frontier cell has an invalid coordinate");
                for link_coordinate in &*links {

                    let distance_to_link: MaxDistanceT = *distances.entry(*link_coordinate)
                        .or_insert_with(Bounded::max_value);
                    if distance_to_link == Bounded::max_value() {

                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
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
    pub fn start(&self) -> CellCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: CellCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells the flood fill reached, the start included. Equals the
    /// grid size exactly when the open passages connect every cell.
    #[inline(always)]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[CellCoordinate; 8]> {
        let mut furthest = SmallVec::<[CellCoordinate; 8]>::new();
        let furthest_distance = self.max();

        for (coord, distance) in &self.distances {
            if *distance == furthest_distance {
                furthest.push(*coord);
            }
        }
        furthest
    }
}
