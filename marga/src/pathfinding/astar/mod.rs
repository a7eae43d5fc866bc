//! A* search over grids and graphs.
//!
//! - Binary-heap open set keyed by `f = g + h`
//! - Equal `f` resolves to the most recently pushed entry
//! - Scaled Manhattan, octile or Euclidean heuristic from the model
//! - Closed nodes reopen only on a strictly cheaper `g`

mod planner;
mod types;

pub use planner::AStarPlanner;
pub use types::{NodeState, SearchOutcome, SearchState};

use crate::nav::{NavModel, NodeIndex};

/// Quick path finding over a model
pub fn find_path(model: &NavModel, start: NodeIndex, goal: NodeIndex) -> SearchOutcome {
    AStarPlanner::new(model).find_path(start, goal)
}

/// Check if the goal is reachable
pub fn path_exists(model: &NavModel, start: NodeIndex, goal: NodeIndex) -> bool {
    find_path(model, start, goal).found()
}
