use petgraph::graph::{Graph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::Undirected;

use crate::cells::{CellCoordinate, Direction};
use crate::passages::PassageGrid;
use crate::pathing::Distances;

/// Scanning rightwards and downwards from every cell touches each passage
/// slot exactly once.
const SCAN_DIRECTIONS: [Direction; 2] = [Direction::Right, Direction::Down];

/// Export the open-passage structure as an undirected graph: one node per
/// cell in row major order, one edge per open passage.
pub fn passage_graph(grid: &PassageGrid) -> Graph<(), (), Undirected, u32> {
    let mut graph = Graph::<(), (), Undirected, u32>::with_capacity(grid.size(), grid.links_count());
    for _ in 0..grid.size() {
        let _ = graph.add_node(());
    }

    for_each_open_passage(grid, |a, b| {
        let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    });

    graph
}

/// Does the open-passage structure form a spanning tree over the grid?
///
/// Checks all three facets separately rather than relying on any two
/// implying the third: the open passage count is size() - 1, no passage
/// joins two already-connected cells (a union-find pass performs zero
/// redundant unions), and a flood fill from one cell reaches every cell.
pub fn is_perfect_maze(grid: &PassageGrid) -> bool {
    let cells_count = grid.size();

    if grid.links_count() != cells_count - 1 {
        return false;
    }

    let mut components = UnionFind::<u32>::new(cells_count);
    let mut redundant_union = false;
    for_each_open_passage(grid, |a, b| {
        if !components.union(a as u32, b as u32) {
            redundant_union = true;
        }
    });
    if redundant_union {
        return false;
    }

    Distances::<u32>::new(grid, CellCoordinate::new(0, 0))
        .map_or(false, |distances| distances.reached_count() == cells_count)
}

fn for_each_open_passage<F: FnMut(usize, usize)>(grid: &PassageGrid, mut visit: F) {
    for cell in grid.iter() {
        for &direction in &SCAN_DIRECTIONS {
            if let Some(neighbour) = grid.neighbour_at_direction(cell, direction) {
                if grid.is_linked(cell, neighbour) {
                    let a = grid.grid_coordinate_to_index(cell)
                        .expect("iterated cell is a valid coordinate");
                    let b = grid.grid_coordinate_to_index(neighbour)
                        .expect("neighbour of a valid cell is a valid coordinate");
                    visit(a, b);
                }
            }
        }
    }
}
