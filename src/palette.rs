//! Lookup tables from [CellState] to what a frontend draws for it. The search never looks at any
//! of this.
use crate::cell::CellState;

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const BLACK: Rgb = [0, 0, 0];
pub const RED: Rgb = [255, 0, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const BLUE: Rgb = [0, 0, 255];
pub const GREY: Rgb = [128, 128, 128];
pub const TURQUOISE: Rgb = [64, 224, 208];

/// Colour used for the lines separating cells.
pub const GRID_LINE: Rgb = GREY;

pub fn color(state: CellState) -> Rgb {
    match state {
        CellState::Empty => WHITE,
        CellState::Barrier => BLACK,
        CellState::Start => BLUE,
        CellState::End => GREY,
        CellState::Open => GREEN,
        CellState::Closed => RED,
        CellState::Path => TURQUOISE,
    }
}

/// Single character used when printing a [Grid](crate::grid::Grid) as text.
pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Barrier => '#',
        CellState::Start => 'S',
        CellState::End => 'E',
        CellState::Open => 'o',
        CellState::Closed => 'x',
        CellState::Path => '*',
    }
}
