//! A* search over a [Grid] which leaves its bookkeeping visible in the cell states, so that a
//! frontend can show the search as it progresses.
use crate::cell::{CellState, Neighbours};
use crate::grid::Grid;
use core::fmt;
use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{info, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Cost of moving to an adjacent cell.
const EDGE_COST: u32 = 1;

/// Result of a completed, exhausted or interrupted [search].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end was reached. Holds the path from start to end, both included.
    Found(Vec<Point>),
    /// The frontier ran empty before reaching the end.
    Exhausted,
    /// The step callback asked to stop.
    Cancelled,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
    /// Number of edges on the found path.
    pub fn path_cost(&self) -> Option<usize> {
        self.path().map(|path| path.len() - 1)
    }
}

/// Violated preconditions of [search]. The grid is left untouched when one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    OutOfBounds(Point),
    SameStartAndEnd(Point),
    Blocked(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "{} lies outside the grid", p),
            Self::SameStartAndEnd(p) => write!(f, "start and end are both {}", p),
            Self::Blocked(p) => write!(f, "{} is a barrier", p),
        }
    }
}

impl std::error::Error for SearchError {}

struct SmallestCostHolder {
    estimated_cost: u32,
    order: u64,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.order == other.order
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: smallest estimate first, then earliest insertion
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.order.cmp(&self.order),
            s => s,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Score {
    cost: u32,
    parent: usize,
}

/// Manhattan distance, admissible and consistent on a 4-neighbourhood with unit costs.
pub fn heuristic(p1: &Point, p2: &Point) -> u32 {
    p1.manhattan_distance(p2).unsigned_abs()
}

fn reverse_path(scores: &FxIndexMap<Point, Score>, start: usize) -> Vec<Point> {
    let mut i = start;
    let mut path: Vec<Point> = std::iter::from_fn(|| {
        scores.get_index(i).map(|(node, score)| {
            i = score.parent;
            *node
        })
    })
    .collect();
    path.reverse();
    path
}

fn check_preconditions(grid: &Grid, start: Point, end: Point) -> Result<(), SearchError> {
    for pos in [start, end] {
        match grid.state(pos) {
            None => return Err(SearchError::OutOfBounds(pos)),
            Some(CellState::Barrier) => return Err(SearchError::Blocked(pos)),
            Some(_) => {}
        }
    }
    if start == end {
        return Err(SearchError::SameStartAndEnd(start));
    }
    Ok(())
}

/// Computes a shortest path from `start` to `end` using A* with the [heuristic] above.
///
/// Expects the neighbour lists of `grid` to be freshly [refreshed](Grid::refresh_neighbors).
/// While running, discovered cells are marked [Open](CellState::Open), expanded cells other than
/// `start` [Closed](CellState::Closed) and, once the end is reached, the interior of the path
/// [Path](CellState::Path). `on_step` is called with the grid after every expansion and after every
/// path cell is marked; returning [ControlFlow::Break] stops the search with
/// [SearchOutcome::Cancelled].
///
/// Ties between equal estimates are broken by insertion order, which makes the exact sequence of
/// markings reproducible for a given grid.
pub fn search<F>(
    grid: &mut Grid,
    start: Point,
    end: Point,
    mut on_step: F,
) -> Result<SearchOutcome, SearchError>
where
    F: FnMut(&Grid) -> ControlFlow<()>,
{
    if let Err(e) = check_preconditions(grid, start, end) {
        warn!("Refusing to search: {}", e);
        return Err(e);
    }
    info!("Searching path from {} to {}", start, end);
    let mut counter: u64 = 0;
    let mut frontier = BinaryHeap::new();
    frontier.push(SmallestCostHolder {
        estimated_cost: heuristic(&start, &end),
        order: counter,
        index: 0,
    });
    let mut in_frontier: FxHashSet<Point> = FxHashSet::default();
    in_frontier.insert(start);
    let mut scores: FxIndexMap<Point, Score> = FxIndexMap::default();
    scores.insert(
        start,
        Score {
            cost: 0,
            parent: usize::MAX,
        },
    );
    while let Some(SmallestCostHolder { index, .. }) = frontier.pop() {
        let Some((&current, &Score { cost, .. })) = scores.get_index(index) else {
            continue;
        };
        in_frontier.remove(&current);
        if current == end {
            let path = reverse_path(&scores, index);
            info!("Found path of length {} after {} insertions", path.len() - 1, counter);
            // Marked walking back from the end, as the parent chain is followed
            for &p in path[1..path.len() - 1].iter().rev() {
                grid.set_state(p, CellState::Path);
                if on_step(grid).is_break() {
                    warn!("Search cancelled while marking the path");
                    return Ok(SearchOutcome::Cancelled);
                }
            }
            return Ok(SearchOutcome::Found(path));
        }
        let neighbours = grid
            .cell(current)
            .map(|cell| Neighbours::from_slice(cell.neighbors()))
            .unwrap_or_default();
        for neighbour in neighbours {
            let new_cost = cost + EDGE_COST;
            let n; // index for neighbour
            match scores.entry(neighbour) {
                Vacant(e) => {
                    n = e.index();
                    e.insert(Score {
                        cost: new_cost,
                        parent: index,
                    });
                }
                Occupied(mut e) => {
                    if e.get().cost > new_cost {
                        n = e.index();
                        e.insert(Score {
                            cost: new_cost,
                            parent: index,
                        });
                    } else {
                        continue;
                    }
                }
            }
            if in_frontier.insert(neighbour) {
                counter += 1;
                frontier.push(SmallestCostHolder {
                    estimated_cost: new_cost + heuristic(&neighbour, &end),
                    order: counter,
                    index: n,
                });
                if neighbour != end {
                    grid.set_state(neighbour, CellState::Open);
                }
            }
        }
        if on_step(grid).is_break() {
            warn!("Search cancelled with {} cells in the frontier", frontier.len());
            return Ok(SearchOutcome::Cancelled);
        }
        if current != start {
            grid.set_state(current, CellState::Closed);
        }
    }
    info!("{} is not reachable from {}", end, start);
    Ok(SearchOutcome::Exhausted)
}
