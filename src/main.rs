use docopt::Docopt;
use mazeball::{
    analysis,
    cells::CellCoordinate,
    generators,
    layout::{self, Layout},
    passages::PassageGrid,
    units::{ColumnsCount, Height, RowsCount, Width},
};
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazeball

Usage:
    mazeball_driver -h | --help
    mazeball_driver [--rows=<r>] [--columns=<c>] [--seed=<n>] [--start-row=<sr> --start-column=<sc>] [--viewport-width=<w>] [--viewport-height=<h>] [--wall-thickness=<t>] [--text-out=<path>] [--save-walls=<path>] [--check]

Options:
    -h --help              Show this screen.
    --rows=<r>             Cell rows in the maze grid [default: 10].
    --columns=<c>          Cell columns in the maze grid [default: 20].
    --seed=<n>             Seed the random number generator for a reproducible maze.
    --start-row=<sr>       Row of the cell the carve starts from (random if not given).
    --start-column=<sc>    Column of the cell the carve starts from (random if not given).
    --viewport-width=<w>   Continuous-space width the grid maps onto [default: 1280].
    --viewport-height=<h>  Continuous-space height the grid maps onto [default: 720].
    --wall-thickness=<t>   Wall body thickness in viewport units [default: 1].
    --text-out=<path>      Output file path for the textual rendering of the maze.
    --save-walls=<path>    Write the wall body segments to a text file. Line 1 is the segment count, every further line is `centre-x centre-y width height`.
    --check                Verify the carved maze is a spanning tree before rendering.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u32>,
    flag_start_row: Option<u32>,
    flag_start_column: Option<u32>,
    flag_viewport_width: f64,
    flag_viewport_height: f64,
    flag_wall_thickness: f64,
    flag_text_out: String,
    flag_save_walls: String,
    flag_check: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut rng = match args.flag_seed {
        Some(seed) => {
            XorShiftRng::from_seed([0x193a_6754 ^ seed, 0xa8a7_d469, 0x9783_0e05, 0x113b_a7bb])
        }
        None => rand::weak_rng(),
    };

    let mut grid = PassageGrid::new(RowsCount(args.flag_rows), ColumnsCount(args.flag_columns))
        .map_err(|e| format!("Invalid grid dimensions: {:?}", e))?;

    let start = match (args.flag_start_row, args.flag_start_column) {
        (Some(row), Some(column)) => CellCoordinate::new(row, column),
        _ => grid.random_cell(&mut rng),
    };

    generators::recursive_backtracker(&mut grid, start, &mut rng)
        .map_err(|e| format!("Maze generation rejected: {:?}", e))?;

    if args.flag_check && !analysis::is_perfect_maze(&grid) {
        return Err("Generated maze is not a spanning tree".into());
    }

    let rendered = format!("{}", grid);
    if args.flag_text_out.is_empty() {
        println!("{}", rendered);
    } else {
        write_text_to_file(&rendered, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    let maze_layout = Layout::new(&grid,
                                  Width(args.flag_viewport_width),
                                  Height(args.flag_viewport_height),
                                  args.flag_wall_thickness);

    let (goal, player) = layout::place_goal_and_player(&grid, &mut rng);
    let (goal_x, goal_y) = maze_layout.cell_centre(goal);
    let (player_x, player_y) = maze_layout.cell_centre(player);
    println!("goal cell ({}, {}) centred at ({:.1}, {:.1})",
             goal.row, goal.column, goal_x, goal_y);
    println!("player cell ({}, {}) centred at ({:.1}, {:.1}), ball radius {:.1}, nudge speed {:.2}",
             player.row,
             player.column,
             player_x,
             player_y,
             maze_layout.ball_radius(),
             maze_layout.nudge_speed());

    if !args.flag_save_walls.is_empty() {
        save_wall_segments(&grid, &maze_layout, &args.flag_save_walls)?;
    }

    Ok(())
}

/// Serialize every static wall body (viewport boundary first, then the
/// closed maze passages) for a physics layer to instantiate.
fn save_wall_segments(grid: &PassageGrid, maze_layout: &Layout, file_path: &str) -> Result<()> {

    let mut segments = maze_layout.boundary_walls().to_vec();
    segments.extend(maze_layout.maze_walls(grid));

    let mut wall_data = String::new();
    wall_data.push_str(&segments.len().to_string());
    wall_data.push('\n');
    for segment in &segments {
        wall_data.push_str(&format!("{} {} {} {}\n",
                                    segment.centre_x,
                                    segment.centre_y,
                                    segment.width,
                                    segment.height));
    }

    write_text_to_file(&wall_data, file_path)
        .chain_err(|| format!("Failed to write wall segments to text file {}", file_path))?;

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
