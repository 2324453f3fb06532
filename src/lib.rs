//! # astar_visualizer
//!
//! Paint barriers, a start and an end on a square grid and watch an
//! [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) find the shortest path between
//! them. Movement is restricted to the 4-neighbourhood with unit costs, so the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) is used as heuristic.
//!
//! The search records its progress in the states of the [Cell]s it touches and hands the [Grid]
//! to a callback after every step, which is all a frontend needs to animate it. Drawing and input
//! handling are not part of this crate: the [Visualizer] drives any [Frontend] implementation.
pub mod cell;
pub mod config;
pub mod grid;
pub mod palette;
pub mod search;
pub mod visualizer;

pub use crate::cell::{Cell, CellState};
pub use crate::config::{ConfigError, VisualizerConfig};
pub use crate::grid::Grid;
pub use crate::search::{search, SearchError, SearchOutcome};
pub use crate::visualizer::{Event, Frontend, Visualizer};
pub use grid_util::point::Point;

/// The [Point] of the cell at `row` and `col`.
pub fn cell_pos(row: usize, col: usize) -> Point {
    Point::new(col as i32, row as i32)
}
