use grid_util::point::Point;
use smallvec::SmallVec;

/// Number of neighbours a cell can have on a 4-neighbourhood.
pub const N_NEIGHBOURS: usize = 4;

/// Neighbour list of a [Cell]. Holds positions rather than references so that the [Grid](crate::grid::Grid)
/// remains the sole owner of its cells.
pub type Neighbours = SmallVec<[Point; N_NEIGHBOURS]>;

/// The state a [Cell] is in. Barrier, start and end are painted by the user, open, closed and path
/// are written by the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl CellState {
    /// Whether the state was written by a search run.
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::Path)
    }
    pub fn is_traversable(self) -> bool {
        self != CellState::Barrier
    }
}

/// A single position on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    state: CellState,
    neighbours: Neighbours,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            pos: Point::new(col as i32, row as i32),
            state: CellState::Empty,
            neighbours: Neighbours::new(),
        }
    }
    pub fn row(&self) -> usize {
        self.pos.y as usize
    }
    pub fn col(&self) -> usize {
        self.pos.x as usize
    }
    /// Position of the cell, `x` being the column and `y` the row.
    pub fn pos(&self) -> Point {
        self.pos
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }
    /// The traversable neighbours as of the last [refresh](crate::grid::Grid::refresh_neighbors).
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbours
    }
    pub(crate) fn set_neighbors(&mut self, neighbours: Neighbours) {
        self.neighbours = neighbours;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty() {
        let cell = Cell::new(3, 7);
        assert_eq!(cell.row(), 3);
        assert_eq!(cell.col(), 7);
        assert_eq!(cell.pos(), Point::new(7, 3));
        assert_eq!(cell.state(), CellState::Empty);
        assert!(cell.neighbors().is_empty());
    }

    #[test]
    fn search_marks() {
        let marks = [CellState::Open, CellState::Closed, CellState::Path];
        for state in marks {
            assert!(state.is_search_mark());
        }
        for state in [
            CellState::Empty,
            CellState::Barrier,
            CellState::Start,
            CellState::End,
        ] {
            assert!(!state.is_search_mark());
        }
        assert!(!CellState::Barrier.is_traversable());
        assert!(CellState::Start.is_traversable());
    }
}
