use astar_visualizer::{cell_pos, search, CellState, Grid};
use std::ops::ControlFlow;

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S # E|
// |  #  |
// |  #  |
// |  #  |
// |     |
//  _____
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = Grid::new(5);
    for row in 0..4 {
        grid.set_state(cell_pos(row, 2), CellState::Barrier);
    }
    let start = cell_pos(0, 0);
    let end = cell_pos(0, 4);
    grid.set_state(start, CellState::Start);
    grid.set_state(end, CellState::End);
    grid.refresh_neighbors();
    println!("{}", grid);
    let mut steps = 0;
    let outcome = search(&mut grid, start, end, |_| {
        steps += 1;
        ControlFlow::Continue(())
    })
    .unwrap();
    println!("{}", grid);
    println!("{} steps", steps);
    if let Some(path) = outcome.path() {
        println!("Path:");
        for p in path {
            println!("{:?}", p);
        }
    }
}
