use astar_visualizer::{Event, Frontend, Grid, Visualizer, VisualizerConfig};
use std::collections::VecDeque;

// Drives the visualizer with a fixed list of clicks and key presses, printing the grid as text
// whenever a search step completes.

struct TextFrontend {
    events: VecDeque<Event>,
    steps: usize,
}

impl Frontend for TextFrontend {
    fn render(&mut self, grid: &Grid) {
        self.steps += 1;
        println!("Frame {}:\n{}", self.steps, grid);
    }
    fn next_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

fn main() {
    const ROWS: usize = 8;
    let config = VisualizerConfig::new(160, ROWS);
    let cell = config.cell_size() as i32;
    let at = |row: i32, col: i32| (col * cell + cell / 2, row * cell + cell / 2);

    let mut events = Vec::new();
    for (row, col) in [(1, 1), (6, 6)] {
        let (x, y) = at(row, col);
        events.push(Event::Paint { x, y });
    }
    for row in 0..6 {
        let (x, y) = at(row, 4);
        events.push(Event::Paint { x, y });
    }
    events.push(Event::StartSearch);
    events.push(Event::Quit);

    let mut frontend = TextFrontend {
        events: events.into(),
        steps: 0,
    };
    match Visualizer::new(config) {
        Ok(mut visualizer) => visualizer.run(&mut frontend),
        Err(e) => eprintln!("{}", e),
    }
}
