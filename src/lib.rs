//! **mazeball** carves perfect mazes over a rectangular cell grid and derives
//! the static-body placement data (walls, goal, player ball) that a 2d
//! physics/rendering layer instantiates.

pub mod analysis;
pub mod cells;
pub mod generators;
pub mod layout;
pub mod passages;
pub mod pathing;
pub mod units;
mod utils;
