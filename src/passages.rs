use crate::cells::{
    offset_coordinate, CellCoordinate, CoordinateSmallVec, Direction, ALL_DIRECTIONS,
};
use crate::units::{ColumnsCount, RowsCount};

use rand::Rng;
use std::cmp;
use std::fmt;

/// Grid construction / traversal preconditions that were not met.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum InvalidGridError {
    ZeroDimension,
    OutOfBoundsStart(CellCoordinate),
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbours,
}

/// A rows × columns cell grid plus the two boolean wall-opening matrices that
/// describe a carved maze.
///
/// `horizontals[r][c]` open means no wall between cell (r, c) and (r+1, c);
/// `verticals[r][c]` open means no wall between cell (r, c) and (r, c+1).
/// Everything starts closed (all walls present) and a generator opens
/// passages through `link`. After carving the grids are treated as immutable
/// output.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct PassageGrid {
    rows: usize,
    columns: usize,
    horizontals: Vec<bool>, // (rows - 1) * columns slots, row major
    verticals: Vec<bool>,   // rows * (columns - 1) slots, row major
    open_count: usize,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum WallSlot {
    Horizontal(usize),
    Vertical(usize),
}

impl PassageGrid {
    /// An all-walls grid. Degenerate dimensions are rejected up front rather
    /// than producing a malformed maze later.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<PassageGrid, InvalidGridError> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        if rows == 0 || columns == 0 {
            return Err(InvalidGridError::ZeroDimension);
        }

        Ok(PassageGrid {
            rows,
            columns,
            horizontals: vec![false; (rows - 1) * columns],
            verticals: vec![false; rows * (columns - 1)],
            open_count: 0,
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    /// How many passages are open. A perfect maze ends with size() - 1.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.open_count
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        (coord.row as usize) < self.rows && (coord.column as usize) < self.columns
    }

    /// Convert a grid coordinate to a one dimensional index in the range
    /// 0..grid.size(). Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: CellCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns + coord.column as usize)
        } else {
            None
        }
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> CellCoordinate {
        let index = rng.gen::<usize>() % self.size();
        CellCoordinate::from_row_major_index(index, self.columns())
    }

    pub fn neighbour_at_direction(
        &self,
        coord: CellCoordinate,
        direction: Direction,
    ) -> Option<CellCoordinate> {
        offset_coordinate(coord, direction).filter(|c| self.is_valid_coordinate(*c))
    }

    /// Cells that are grid-adjacent to `coord`, but not necessarily joined to
    /// it by an open passage.
    pub fn neighbours(&self, coord: CellCoordinate) -> CoordinateSmallVec {
        ALL_DIRECTIONS
            .iter()
            .filter_map(|&direction| self.neighbour_at_direction(coord, direction))
            .collect()
    }

    /// Open the passage between two grid-adjacent cells. Idempotent.
    pub fn link(&mut self, a: CellCoordinate, b: CellCoordinate) -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let slot = self.wall_slot(a, b).ok_or(CellLinkError::NotNeighbours)?;

        let open = match slot {
            WallSlot::Horizontal(index) => &mut self.horizontals[index],
            WallSlot::Vertical(index) => &mut self.verticals[index],
        };
        if !*open {
            *open = true;
            self.open_count += 1;
        }
        Ok(())
    }

    /// Is the passage between two cells open?
    pub fn is_linked(&self, a: CellCoordinate, b: CellCoordinate) -> bool {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        match self.wall_slot(a, b) {
            Some(WallSlot::Horizontal(index)) => self.horizontals[index],
            Some(WallSlot::Vertical(index)) => self.verticals[index],
            None => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: CellCoordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour| self.is_linked(coord, neighbour))
    }

    /// Cells joined to `coord` by an open passage, or None for an invalid
    /// coordinate.
    pub fn links(&self, coord: CellCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        Some(
            self.neighbours(coord)
                .iter()
                .cloned()
                .filter(|&neighbour| self.is_linked(coord, neighbour))
                .collect(),
        )
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns(),
            cells_count: self.size(),
        }
    }

    /// The wall storage slot separating two grid-adjacent cells.
    fn wall_slot(&self, a: CellCoordinate, b: CellCoordinate) -> Option<WallSlot> {
        let (a_row, a_column) = (a.row as usize, a.column as usize);
        let (b_row, b_column) = (b.row as usize, b.column as usize);

        if a_column == b_column && (a_row + 1 == b_row || b_row + 1 == a_row) {
            let top_row = cmp::min(a_row, b_row);
            Some(WallSlot::Horizontal(top_row * self.columns + a_column))
        } else if a_row == b_row && (a_column + 1 == b_column || b_column + 1 == a_column) {
            let left_column = cmp::min(a_column, b_column);
            Some(WallSlot::Vertical(a_row * (self.columns - 1) + left_column))
        } else {
            None
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns: ColumnsCount,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = CellCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = CellCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a PassageGrid {
    type Item = CellCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PassageGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let coord = |row: usize, column: usize| CellCoordinate::new(row as u32, column as u32);

        // Special case the north most boundary, every other row of wall text
        // is owned by the cell row above it.
        let mut output = String::from(WALL_RD);
        for column in 0..self.columns {
            output.push_str(WALL_LR_3);
            let is_right_open = self.is_neighbour_linked(coord(0, column), Direction::Right);
            if is_right_open {
                output.push_str(WALL_LR);
            } else {
                let is_last_column = column == self.columns - 1;
                if is_last_column {
                    output.push_str(WALL_LD);
                } else {
                    output.push_str(WALL_LRD);
                }
            }
        }
        output.push('\n');

        for row in 0..self.rows {

            let is_last_row = row == self.rows - 1;

            // Starts off by special case rendering the west most boundary of
            // the row. The top section of the cell is done by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::from("");

            for column in 0..self.columns {

                let cell = coord(row, column);
                let is_first_column = column == 0;
                let is_last_column = column == self.columns - 1;
                let right_open = self.is_neighbour_linked(cell, Direction::Right);
                let down_open = self.is_neighbour_linked(cell, Direction::Down);

                // Each cell uses the southern wall of the cell above it as its
                // own northern wall, so only the room space, the eastern
                // boundary and the southern boundary minus the south west
                // corner need rendering here.
                row_middle_section_render.push_str("   ");
                row_middle_section_render.push_str(if right_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if down_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if down_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => {
                        if right_open {
                            WALL_LR
                        } else {
                            WALL_LRU
                        }
                    }
                    (false, true) => {
                        if down_open {
                            WALL_UD
                        } else {
                            WALL_LUD
                        }
                    }
                    (false, false) => {
                        let access_se_from_right = self
                            .neighbour_at_direction(cell, Direction::Right)
                            .map_or(false, |c| self.is_neighbour_linked(c, Direction::Down));
                        let access_se_from_down = self
                            .neighbour_at_direction(cell, Direction::Down)
                            .map_or(false, |c| self.is_neighbour_linked(c, Direction::Right));
                        let show_right_section = !access_se_from_right;
                        let show_down_section = !access_se_from_down;
                        let show_up_section = !right_open;
                        let show_left_section = !down_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools; // a trait

    fn grid(rows: usize, columns: usize) -> PassageGrid {
        PassageGrid::new(RowsCount(rows), ColumnsCount(columns))
            .expect("test grid dimensions are valid")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(PassageGrid::new(RowsCount(0), ColumnsCount(5)).unwrap_err(),
                   InvalidGridError::ZeroDimension);
        assert_eq!(PassageGrid::new(RowsCount(5), ColumnsCount(0)).unwrap_err(),
                   InvalidGridError::ZeroDimension);
        assert_eq!(PassageGrid::new(RowsCount(0), ColumnsCount(0)).unwrap_err(),
                   InvalidGridError::ZeroDimension);
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[CellCoordinate]| {
            let neighbours: Vec<CellCoordinate> = g.neighbours(coord).iter().cloned().sorted();
            let expected: Vec<CellCoordinate> = expected_neighbours.iter().cloned().sorted();
            assert_eq!(neighbours, expected);
        };
        let cc = |row, column| CellCoordinate::new(row, column);

        // corners
        check_expected_neighbours(cc(0, 0), &[cc(0, 1), cc(1, 0)]);
        check_expected_neighbours(cc(0, 9), &[cc(0, 8), cc(1, 9)]);
        check_expected_neighbours(cc(9, 0), &[cc(8, 0), cc(9, 1)]);
        check_expected_neighbours(cc(9, 9), &[cc(8, 9), cc(9, 8)]);

        // side element examples
        check_expected_neighbours(cc(0, 1), &[cc(0, 0), cc(0, 2), cc(1, 1)]);
        check_expected_neighbours(cc(1, 0), &[cc(0, 0), cc(1, 1), cc(2, 0)]);
        check_expected_neighbours(cc(8, 9), &[cc(7, 9), cc(8, 8), cc(9, 9)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(cc(1, 1), &[cc(0, 1), cc(1, 0), cc(1, 2), cc(2, 1)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = grid(2, 2);
        let cc = |row, column| CellCoordinate::new(row, column);
        let check_neighbour = |coord, direction: Direction, expected| {
            assert_eq!(g.neighbour_at_direction(coord, direction), expected);
        };
        check_neighbour(cc(0, 0), Direction::Up, None);
        check_neighbour(cc(0, 0), Direction::Left, None);
        check_neighbour(cc(0, 0), Direction::Right, Some(cc(0, 1)));
        check_neighbour(cc(0, 0), Direction::Down, Some(cc(1, 0)));

        check_neighbour(cc(1, 1), Direction::Down, None);
        check_neighbour(cc(1, 1), Direction::Right, None);
        check_neighbour(cc(1, 1), Direction::Up, Some(cc(0, 1)));
        check_neighbour(cc(1, 1), Direction::Left, Some(cc(1, 0)));
    }

    #[test]
    fn grid_size() {
        assert_eq!(grid(10, 10).size(), 100);
        assert_eq!(grid(3, 7).size(), 21);
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = grid(3, 3);
        let cc = |row, column| CellCoordinate::new(row, column);
        let coords = &[cc(0, 0), cc(0, 1), cc(0, 2), cc(1, 0), cc(1, 1), cc(1, 2), cc(2, 0),
                       cc(2, 1), cc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(cc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(cc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(cc(u32::max_value(), u32::max_value())), None);
    }

    #[test]
    fn random_cell() {
        let g = grid(4, 7);
        let mut rng = rand::weak_rng();
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter() {
        let g = grid(2, 2);
        assert_eq!(g.iter().collect::<Vec<CellCoordinate>>(),
                   &[CellCoordinate::new(0, 0),
                     CellCoordinate::new(0, 1),
                     CellCoordinate::new(1, 0),
                     CellCoordinate::new(1, 1)]);
        assert_eq!(g.iter().size_hint(), (4, Some(4)));
    }

    #[test]
    fn linking_cells() {
        let mut g = grid(4, 4);
        let a = CellCoordinate::new(1, 0);
        let b = CellCoordinate::new(2, 0);
        let c = CellCoordinate::new(3, 0);

        let sorted_links = |grid: &PassageGrid, coord| -> Vec<CellCoordinate> {
            grid.links(coord).expect("coordinate is invalid").iter().cloned().sorted()
        };
        macro_rules! links_sorted {
            ($x:expr) => (sorted_links(&g, $x))
        }

        // Testing that the order of the arguments to `is_linked` does not matter
        macro_rules! bi_check_linked {
            ($x:expr, $y:expr) => (g.is_linked($x, $y) && g.is_linked($y, $x))
        }

        // a, b and c start with no links
        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(a, c));
        assert!(!bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);
        assert_eq!(links_sorted!(b), vec![]);
        assert_eq!(links_sorted!(c), vec![]);
        assert_eq!(g.links_count(), 0);

        g.link(a, b).expect("link failed");
        // a - b linked bi-directionally
        assert!(bi_check_linked!(a, b));
        assert_eq!(links_sorted!(a), vec![b]);
        assert_eq!(links_sorted!(b), vec![a]);
        assert!(g.is_neighbour_linked(a, Direction::Down));
        assert!(g.is_neighbour_linked(b, Direction::Up));
        assert!(!g.is_neighbour_linked(a, Direction::Up));
        assert!(!g.is_neighbour_linked(b, Direction::Down));
        assert_eq!(g.links_count(), 1);

        g.link(b, c).expect("link failed");
        // a - b still linked bi-directionally after linking b - c
        // b linked to a & c bi-directionally
        assert!(bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert!(!bi_check_linked!(a, c));
        assert_eq!(links_sorted!(a), vec![b]);
        assert_eq!(links_sorted!(b), vec![a, c]);
        assert_eq!(links_sorted!(c), vec![b]);
        assert_eq!(g.links_count(), 2);
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = grid(4, 4);
        let a = CellCoordinate::new(0, 0);
        assert_eq!(g.link(a, a), Err(CellLinkError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = grid(4, 4);
        let good_coord = CellCoordinate::new(0, 0);
        let invalid_coord = CellCoordinate::new(100, 100);
        assert_eq!(g.link(good_coord, invalid_coord),
                   Err(CellLinkError::InvalidGridCoordinate));
    }

    #[test]
    fn no_links_between_non_neighbours() {
        let mut g = grid(4, 4);
        let a = CellCoordinate::new(0, 0);
        let diagonal = CellCoordinate::new(1, 1);
        let far = CellCoordinate::new(0, 2);
        assert_eq!(g.link(a, diagonal), Err(CellLinkError::NotNeighbours));
        assert_eq!(g.link(a, far), Err(CellLinkError::NotNeighbours));
    }

    #[test]
    fn no_parallel_duplicated_linked_cells() {
        let mut g = grid(4, 4);
        let a = CellCoordinate::new(0, 0);
        let b = CellCoordinate::new(0, 1);
        g.link(a, b).expect("link failed");
        g.link(a, b).expect("link failed");
        assert_smallvec_eq!(g.links(a).unwrap(), &[b]);
        assert_smallvec_eq!(g.links(b).unwrap(), &[a]);
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn display_small_carved_grid() {
        let mut g = grid(2, 2);
        g.link(CellCoordinate::new(0, 0), CellCoordinate::new(0, 1)).expect("link failed");
        g.link(CellCoordinate::new(0, 0), CellCoordinate::new(1, 0)).expect("link failed");

        let expected = "┌───────┐\n\
                        │       │\n\
                        │   ┌───┤\n\
                        │   │   │\n\
                        └───┴───┘\n";
        assert_eq!(format!("{}", g), expected);
    }
}
