//! Editing a [Grid] through pixel clicks and key commands, and running searches on it. Drawing and
//! input are left to a [Frontend].
use crate::cell::CellState;
use crate::config::{ConfigError, VisualizerConfig};
use crate::grid::Grid;
use crate::search::{search, SearchOutcome};
use grid_util::point::Point;
use log::{debug, info, warn};
use std::ops::ControlFlow;

/// User input, already decoded from whatever windowing system produced it. Pixel coordinates are
/// relative to the top-left corner of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Left click: places the start, then the end, then barriers.
    Paint { x: i32, y: i32 },
    /// Right click: empties a cell, forgetting the start or end if it was one.
    Erase { x: i32, y: i32 },
    StartSearch,
    /// Replaces the grid with an empty one.
    Clear,
    Quit,
}

/// Rendering and input capabilities handed to the [Visualizer].
pub trait Frontend {
    /// Draws the grid. Called once per frame and after every search step.
    fn render(&mut self, grid: &Grid);
    /// The next event, or [None] once the input is closed.
    fn next_event(&mut self) -> Option<Event>;
    /// Polled after every search step; returning [true] cancels the search and quits.
    fn poll_cancel(&mut self) -> bool {
        false
    }
}

/// Owns the grid together with the positions of the start and end.
#[derive(Clone, Debug)]
pub struct Visualizer {
    config: VisualizerConfig,
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Result<Visualizer, ConfigError> {
        config.validate()?;
        info!(
            "Creating {0}x{0} grid in a {1} px window",
            config.rows, config.window_size
        );
        Ok(Visualizer {
            config,
            grid: Grid::new(config.rows),
            start: None,
            end: None,
        })
    }
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }
    /// Maps a pixel to the cell drawn under it, if any.
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Option<Point> {
        // Cells may be wider than i32::MAX pixels
        let cell_size = i64::from(self.config.cell_size());
        if x < 0 || y < 0 || cell_size == 0 {
            return None;
        }
        let (col, row) = (i64::from(x) / cell_size, i64::from(y) / cell_size);
        let pos = Point::new(i32::try_from(col).ok()?, i32::try_from(row).ok()?);
        if self.grid.in_bounds(pos) {
            Some(pos)
        } else {
            None
        }
    }
    /// Top-left pixel of the cell at `pos`.
    pub fn cell_origin(&self, pos: Point) -> Option<(u32, u32)> {
        if !self.grid.in_bounds(pos) {
            return None;
        }
        let cell_size = self.config.cell_size();
        Some((pos.x as u32 * cell_size, pos.y as u32 * cell_size))
    }
    fn set_cell(&mut self, pos: Point, state: CellState) -> bool {
        let changed = self.grid.state(pos).is_some_and(|previous| previous != state);
        self.grid.set_state(pos, state) && changed
    }
    /// Places the start if there is none, otherwise the end if there is none, otherwise a barrier.
    /// Start and end are never painted over. Returns whether the cell changed.
    pub fn paint(&mut self, pos: Point) -> bool {
        if !self.grid.in_bounds(pos) {
            return false;
        }
        let pos_opt = Some(pos);
        if self.start.is_none() && pos_opt != self.end {
            debug!("Placing start at {}", pos);
            self.start = pos_opt;
            self.set_cell(pos, CellState::Start)
        } else if self.end.is_none() && pos_opt != self.start {
            debug!("Placing end at {}", pos);
            self.end = pos_opt;
            self.set_cell(pos, CellState::End)
        } else if pos_opt != self.start && pos_opt != self.end {
            self.set_cell(pos, CellState::Barrier)
        } else {
            false
        }
    }
    /// Sets the cell at `pos` back to empty, whatever it held. Returns whether the cell changed.
    pub fn erase(&mut self, pos: Point) -> bool {
        if !self.grid.in_bounds(pos) {
            return false;
        }
        let pos_opt = Some(pos);
        if pos_opt == self.start {
            debug!("Removing start at {}", pos);
            self.start = None;
        } else if pos_opt == self.end {
            debug!("Removing end at {}", pos);
            self.end = None;
        }
        self.set_cell(pos, CellState::Empty)
    }
    /// Discards the whole grid, including the start and end.
    pub fn reset_grid(&mut self) {
        self.grid.reset();
        self.start = None;
        self.end = None;
    }
    /// Clears the markings of a previous run, refreshes the neighbour lists and searches from the
    /// start to the end. Returns [None] if either is missing.
    pub fn run_search<F>(&mut self, on_step: F) -> Option<SearchOutcome>
    where
        F: FnMut(&Grid) -> ControlFlow<()>,
    {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            info!("Place both a start and an end before searching");
            return None;
        };
        self.grid.clear_search_data();
        self.grid.refresh_neighbors();
        self.grid.update();
        if self.grid.unreachable(start, end) {
            info!("{} cannot be reached from {}, exploring anyway", end, start);
        }
        match search(&mut self.grid, start, end, on_step) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("Search not started: {}", e);
                None
            }
        }
    }
    /// Applies a single event. Breaks when the visualizer should quit.
    pub fn handle_event<R>(&mut self, event: Event, frontend: &mut R) -> ControlFlow<()>
    where
        R: Frontend + ?Sized,
    {
        match event {
            Event::Paint { x, y } => match self.cell_at_pixel(x, y) {
                Some(pos) => {
                    self.paint(pos);
                }
                None => debug!("Ignoring click at ({}, {}) outside the grid", x, y),
            },
            Event::Erase { x, y } => match self.cell_at_pixel(x, y) {
                Some(pos) => {
                    self.erase(pos);
                }
                None => debug!("Ignoring click at ({}, {}) outside the grid", x, y),
            },
            Event::StartSearch => {
                let outcome = self.run_search(|grid| {
                    frontend.render(grid);
                    if frontend.poll_cancel() {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                });
                if outcome == Some(SearchOutcome::Cancelled) {
                    return ControlFlow::Break(());
                }
            }
            Event::Clear => self.reset_grid(),
            Event::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }
    /// Renders and handles events until the frontend quits or runs out of input.
    pub fn run<R>(&mut self, frontend: &mut R)
    where
        R: Frontend + ?Sized,
    {
        loop {
            frontend.render(&self.grid);
            let Some(event) = frontend.next_event() else {
                break;
            };
            if self.handle_event(event, frontend).is_break() {
                break;
            }
        }
        info!("Visualizer closed");
    }
}
