use rand::Rng;

use crate::cells::{CellCoordinate, Direction};
use crate::passages::PassageGrid;
use crate::units::{Height, Width};

/// An axis-aligned rectangle in viewport coordinates, addressed by its
/// centre. The physics layer instantiates one static body per segment.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct BodySegment {
    pub centre_x: f64,
    pub centre_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps grid coordinates onto a continuous viewport: each cell covers a
/// fixed unit width/height derived from the viewport size and the grid
/// dimensions.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Layout {
    rows: usize,
    columns: usize,
    width: f64,
    height: f64,
    wall_thickness: f64,
}

impl Layout {
    pub fn new(grid: &PassageGrid, viewport_width: Width, viewport_height: Height, wall_thickness: f64) -> Layout {
        Layout {
            rows: grid.rows().0,
            columns: grid.columns().0,
            width: viewport_width.0,
            height: viewport_height.0,
            wall_thickness,
        }
    }

    #[inline]
    pub fn unit_width(&self) -> f64 {
        self.width / self.columns as f64
    }

    #[inline]
    pub fn unit_height(&self) -> f64 {
        self.height / self.rows as f64
    }

    pub fn cell_centre(&self, coord: CellCoordinate) -> (f64, f64) {
        ((f64::from(coord.column) + 0.5) * self.unit_width(),
         (f64::from(coord.row) + 0.5) * self.unit_height())
    }

    /// The four static walls framing the viewport edges.
    pub fn boundary_walls(&self) -> [BodySegment; 4] {
        let thickness = self.wall_thickness;
        [BodySegment {
             centre_x: self.width / 2.0,
             centre_y: thickness,
             width: self.width,
             height: thickness,
         },
         BodySegment {
             centre_x: self.width / 2.0,
             centre_y: self.height - thickness,
             width: self.width,
             height: thickness,
         },
         BodySegment {
             centre_x: thickness,
             centre_y: self.height / 2.0,
             width: thickness,
             height: self.height,
         },
         BodySegment {
             centre_x: self.width - thickness,
             centre_y: self.height / 2.0,
             width: thickness,
             height: self.height,
         }]
    }

    /// One wall segment per passage slot the carve left closed: an open
    /// passage means the absence of a wall body, a closed one means its
    /// presence.
    pub fn maze_walls(&self, grid: &PassageGrid) -> Vec<BodySegment> {
        let unit_width = self.unit_width();
        let unit_height = self.unit_height();
        let thickness = self.wall_thickness;

        let mut walls = Vec::new();
        for cell in grid.iter() {
            let (row, column) = (f64::from(cell.row), f64::from(cell.column));

            if let Some(below) = grid.neighbour_at_direction(cell, Direction::Down) {
                if !grid.is_linked(cell, below) {
                    walls.push(BodySegment {
                        centre_x: (column + 0.5) * unit_width,
                        centre_y: (row + 1.0) * unit_height,
                        width: unit_width,
                        height: thickness,
                    });
                }
            }
            if let Some(right) = grid.neighbour_at_direction(cell, Direction::Right) {
                if !grid.is_linked(cell, right) {
                    walls.push(BodySegment {
                        centre_x: (column + 1.0) * unit_width,
                        centre_y: (row + 0.5) * unit_height,
                        width: thickness,
                        height: unit_height,
                    });
                }
            }
        }
        walls
    }

    /// The goal body: a cell-centred rectangle inset far enough from the
    /// surrounding walls for the ball to reach it.
    pub fn goal_segment(&self, coord: CellCoordinate) -> BodySegment {
        let (centre_x, centre_y) = self.cell_centre(coord);
        BodySegment {
            centre_x,
            centre_y,
            width: self.unit_width() - self.wall_thickness * 4.0,
            height: self.unit_height() - self.wall_thickness * 4.0,
        }
    }

    /// Radius of the player ball: it must fit through the narrower of the
    /// two passage dimensions.
    pub fn ball_radius(&self) -> f64 {
        self.unit_width().min(self.unit_height()) / 2.0 - self.wall_thickness * 4.0
    }

    /// The velocity increment one key press applies to the ball, on either
    /// axis.
    pub fn nudge_speed(&self) -> f64 {
        self.unit_height() / 30.0
    }
}

/// Pick the goal cell and the player-start cell at random, re-sampling the
/// player cell until it differs from the goal. On a single-cell grid the two
/// coincide as there is nothing distinct to sample.
pub fn place_goal_and_player<R: Rng>(grid: &PassageGrid, rng: &mut R) -> (CellCoordinate, CellCoordinate) {
    let goal = grid.random_cell(rng);
    if grid.size() < 2 {
        return (goal, goal);
    }

    let mut player = grid.random_cell(rng);
    while player == goal {
        player = grid.random_cell(rng);
    }
    (goal, player)
}
