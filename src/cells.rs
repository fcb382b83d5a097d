use crate::units::ColumnsCount;
use smallvec::SmallVec;

/// A (row, column) cell address in the maze grid, 0-indexed from the top-left.
#[derive(Hash, Eq, PartialEq, Debug, Copy, Clone, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: u32,
    pub column: u32,
}

impl CellCoordinate {
    pub fn new(row: u32, column: u32) -> CellCoordinate {
        CellCoordinate { row, column }
    }

    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> CellCoordinate {
        let ColumnsCount(columns) = columns;
        CellCoordinate {
            row: (index / columns) as u32,
            column: (index % columns) as u32,
        }
    }
}

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<CellCoordinate>; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// The fixed order a cell's neighbour list is assembled in before it is
/// shuffled by a maze generator.
pub const ALL_DIRECTIONS: [Direction; 4] =
    [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

/// The coordinate one step away in `direction`, or `None` when the step would
/// leave the non-negative quadrant. Staying within a particular grid's bounds
/// is the grid's own check.
pub fn offset_coordinate(coord: CellCoordinate, direction: Direction) -> Option<CellCoordinate> {
    let CellCoordinate { row, column } = coord;
    match direction {
        Direction::Up => row.checked_sub(1).map(|r| CellCoordinate::new(r, column)),
        Direction::Right => Some(CellCoordinate::new(row, column + 1)),
        Direction::Down => Some(CellCoordinate::new(row + 1, column)),
        Direction::Left => column.checked_sub(1).map(|c| CellCoordinate::new(row, c)),
    }
}
