//! Path planning algorithms.
//!
//! - **A* Search**: cheapest path over a [`NavModel`](crate::nav::NavModel)
//! - **Refinement**: line-of-sight shortcuts and colinear collapse
//!
//! ```rust,ignore
//! use marga::pathfinding::{find_path, refine, RefineConfig};
//!
//! let outcome = find_path(&model, model.start(), model.goal());
//! if outcome.found() {
//!     let waypoints = refine(&outcome.path, &model, &RefineConfig::default());
//! }
//! ```

pub mod astar;
pub mod refine;

pub use astar::{find_path, path_exists, AStarPlanner, SearchOutcome};
pub use refine::{refine, PathRefiner, RefineConfig};
