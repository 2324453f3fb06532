use crate::cell::{Cell, CellState, Neighbours};
use crate::palette;
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use log::info;
use petgraph::unionfind::UnionFind;

/// Offsets of the 4-neighbourhood as `(row, col)` deltas, in the order down, up, right, left.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// [Grid] owns a square array of [Cell]s addressed by [Point]s where `x` is the column and `y` the
/// row. Next to the cells it maintains the connected components of traversable cells using a
/// [UnionFind] structure, which lets callers find out whether the end can be reached at all.
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(0)
    }
}

impl Grid {
    /// Builds a `size` by `size` grid of empty cells.
    pub fn new(size: usize) -> Grid {
        let mut grid = Grid {
            size,
            cells: Grid::build_cells(size),
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }
    fn build_cells(size: usize) -> Vec<Cell> {
        (0..size)
            .cartesian_product(0..size)
            .map(|(row, col)| Cell::new(row, col))
            .collect()
    }
    /// Replaces every cell with a fresh empty one. Barriers, start, end and search markings are all
    /// discarded.
    pub fn reset(&mut self) {
        info!("Resetting {0}x{0} grid", self.size);
        *self = Grid::new(self.size);
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }
    fn get_ix(&self, pos: Point) -> usize {
        pos.y as usize * self.size + pos.x as usize
    }
    pub fn cell(&self, pos: Point) -> Option<&Cell> {
        if self.in_bounds(pos) {
            Some(&self.cells[self.get_ix(pos)])
        } else {
            None
        }
    }
    pub fn state(&self, pos: Point) -> Option<CellState> {
        self.cell(pos).map(Cell::state)
    }
    /// Updates the state of a cell, returning [false] if `pos` lies outside the grid. Joins newly
    /// connected components and flags the components as dirty if they are (potentially) broken
    /// apart into multiple.
    pub fn set_state(&mut self, pos: Point, state: CellState) -> bool {
        let Some(previous) = self.state(pos) else {
            return false;
        };
        if previous.is_traversable() != state.is_traversable() {
            if state.is_traversable() {
                let ix = self.get_ix(pos);
                for n in self.neighbors_of(pos) {
                    let n_ix = self.get_ix(n);
                    self.components.union(ix, n_ix);
                }
            } else {
                self.components_dirty = true;
            }
        }
        let ix = self.get_ix(pos);
        self.cells[ix].set_state(state);
        true
    }
    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// Position of the first cell (in row-major order) with the given state.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.cells
            .iter()
            .find(|cell| cell.state() == state)
            .map(Cell::pos)
    }
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state() == state).count()
    }
    /// The in-bounds, non-barrier 4-neighbours of `pos`, ordered down, up, right, left.
    pub fn neighbors_of(&self, pos: Point) -> Neighbours {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(d_row, d_col)| Point::new(pos.x + d_col, pos.y + d_row))
            .filter(|&n| self.state(n).is_some_and(CellState::is_traversable))
            .collect()
    }
    /// Recomputes the cached neighbour list of every cell. Has to be called after editing barriers
    /// and before starting a search.
    pub fn refresh_neighbors(&mut self) {
        for ix in 0..self.cells.len() {
            let neighbours = self.neighbors_of(self.cells[ix].pos());
            self.cells[ix].set_neighbors(neighbours);
        }
    }
    /// Sets every open, closed and path cell back to empty. Barriers, start and end are kept.
    pub fn clear_search_data(&mut self) {
        for cell in self
            .cells
            .iter_mut()
            .filter(|cell| cell.state().is_search_mark())
        {
            cell.set_state(CellState::Empty);
        }
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Positions outside the grid or on a
    /// barrier are never reachable.
    pub fn unreachable(&self, start: Point, goal: Point) -> bool {
        let traversable = |p| self.state(p).is_some_and(CellState::is_traversable);
        if traversable(start) && traversable(goal) {
            let start_ix = self.get_ix(start);
            let goal_ix = self.get_ix(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                info!("{} and {} are not equivalent components", start_ix, goal_ix);
                true
            }
        } else {
            true
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up traversable neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let n = self.size;
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            let cell = &self.cells[ix];
            if !cell.state().is_traversable() {
                continue;
            }
            let pos = cell.pos();
            for other in [Point::new(pos.x + 1, pos.y), Point::new(pos.x, pos.y + 1)] {
                if self.state(other).is_some_and(CellState::is_traversable) {
                    let other_ix = self.get_ix(other);
                    self.components.union(ix, other_ix);
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.size == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.size) {
            let line = row
                .iter()
                .map(|cell| palette::glyph(cell.state()))
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_pos;

    #[test]
    fn build_is_square_and_empty() {
        let grid = Grid::new(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cells().count(), 16);
        assert_eq!(grid.count(CellState::Empty), 16);
        for (ix, cell) in grid.cells().enumerate() {
            assert_eq!(cell.row(), ix / 4);
            assert_eq!(cell.col(), ix % 4);
        }
    }

    #[test]
    fn bounds() {
        let grid = Grid::new(3);
        assert!(grid.in_bounds(cell_pos(2, 2)));
        assert!(!grid.in_bounds(Point::new(-1, 0)));
        assert!(!grid.in_bounds(Point::new(0, 3)));
        assert!(grid.cell(Point::new(3, 0)).is_none());
        assert_eq!(grid.state(Point::new(0, -1)), None);
    }

    #[test]
    fn set_state_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(2);
        assert!(!grid.set_state(Point::new(2, 0), CellState::Barrier));
        assert!(grid.set_state(cell_pos(1, 0), CellState::Barrier));
        assert_eq!(grid.state(cell_pos(1, 0)), Some(CellState::Barrier));
    }

    #[test]
    fn neighbour_order_and_bounds() {
        let grid = Grid::new(3);
        let centre = cell_pos(1, 1);
        assert_eq!(
            grid.neighbors_of(centre).as_slice(),
            &[cell_pos(2, 1), cell_pos(0, 1), cell_pos(1, 2), cell_pos(1, 0)]
        );
        let corner = grid.neighbors_of(cell_pos(0, 0));
        assert_eq!(corner.as_slice(), &[cell_pos(1, 0), cell_pos(0, 1)]);
    }

    /// A barrier next to a cell never shows up in its neighbour list after a refresh.
    #[test]
    fn barriers_are_not_neighbours() {
        //  ___
        // |   |
        // | # |
        // |   |
        //  ___
        let mut grid = Grid::new(3);
        let barrier = cell_pos(1, 1);
        grid.set_state(barrier, CellState::Barrier);
        grid.refresh_neighbors();
        for cell in grid.cells() {
            assert!(!cell.neighbors().contains(&barrier));
            assert!(!cell.neighbors().contains(&cell.pos()));
            assert!(cell.neighbors().iter().all(|&n| grid.in_bounds(n)));
        }
        assert_eq!(grid.cell(cell_pos(0, 1)).unwrap().neighbors().len(), 2);
    }

    #[test]
    fn neighbour_lists_are_snapshots() {
        let mut grid = Grid::new(2);
        grid.refresh_neighbors();
        grid.set_state(cell_pos(0, 1), CellState::Barrier);
        // Stale until refreshed.
        assert!(grid
            .cell(cell_pos(0, 0))
            .unwrap()
            .neighbors()
            .contains(&cell_pos(0, 1)));
        grid.refresh_neighbors();
        assert_eq!(
            grid.cell(cell_pos(0, 0)).unwrap().neighbors(),
            &[cell_pos(1, 0)]
        );
    }

    #[test]
    fn reset_is_idempotent() {
        let mut grid = Grid::new(4);
        grid.set_state(cell_pos(0, 0), CellState::Start);
        grid.set_state(cell_pos(3, 3), CellState::End);
        grid.set_state(cell_pos(1, 1), CellState::Barrier);
        grid.set_state(cell_pos(2, 2), CellState::Closed);
        grid.reset();
        let once = grid.to_string();
        grid.reset();
        assert_eq!(grid.to_string(), once);
        assert_eq!(grid.count(CellState::Empty), 16);
        assert_eq!(grid.find(CellState::Start), None);
        assert_eq!(grid.find(CellState::End), None);
        assert!(!grid.components_dirty);
    }

    #[test]
    fn clear_search_data_keeps_user_cells() {
        let mut grid = Grid::new(3);
        grid.set_state(cell_pos(0, 0), CellState::Start);
        grid.set_state(cell_pos(2, 2), CellState::End);
        grid.set_state(cell_pos(1, 1), CellState::Barrier);
        grid.set_state(cell_pos(0, 1), CellState::Open);
        grid.set_state(cell_pos(1, 0), CellState::Closed);
        grid.set_state(cell_pos(2, 1), CellState::Path);
        grid.clear_search_data();
        assert_eq!(grid.state(cell_pos(0, 0)), Some(CellState::Start));
        assert_eq!(grid.state(cell_pos(2, 2)), Some(CellState::End));
        assert_eq!(grid.state(cell_pos(1, 1)), Some(CellState::Barrier));
        assert_eq!(grid.count(CellState::Empty), 6);
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        //  ___
        // | # |
        // | # |
        // | # |
        //  ___
        let mut grid = Grid::new(3);
        for row in 0..3 {
            grid.set_state(cell_pos(row, 1), CellState::Barrier);
        }
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(cell_pos(0, 0), cell_pos(2, 0)));
        assert!(grid.unreachable(cell_pos(0, 0), cell_pos(0, 2)));
        assert!(grid.unreachable(cell_pos(0, 0), cell_pos(1, 1)));
        assert!(grid.unreachable(cell_pos(0, 0), Point::new(5, 5)));
    }

    #[test]
    fn opening_a_barrier_joins_components() {
        let mut grid = Grid::new(3);
        for row in 0..3 {
            grid.set_state(cell_pos(row, 1), CellState::Barrier);
        }
        grid.update();
        grid.set_state(cell_pos(1, 1), CellState::Empty);
        assert!(!grid.components_dirty);
        assert!(grid.reachable(cell_pos(0, 0), cell_pos(0, 2)));
    }

    #[test]
    fn display_uses_glyphs() {
        let mut grid = Grid::new(3);
        grid.set_state(cell_pos(0, 0), CellState::Start);
        grid.set_state(cell_pos(1, 1), CellState::Barrier);
        grid.set_state(cell_pos(2, 2), CellState::End);
        assert_eq!(grid.to_string(), "S..\n.#.\n..E\n");
        assert_eq!(Grid::new(0).to_string(), "");
    }
}
