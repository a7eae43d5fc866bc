//! # Marga: Grid and Graph Pathfinding
//!
//! A* path computation over occupancy grids and positioned graphs, with
//! agent clearance inflation and waypoint refinement.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::{solve, MargaConfig, NodeRef, PathStatus, Scenario, Space};
//!
//! let scenario = Scenario::new(
//!     Space::from_rows(&[".....", ".###.", "....."]),
//!     NodeRef::cell(0, 1),
//!     NodeRef::cell(4, 1),
//! );
//! let report = solve(&scenario, &MargaConfig::default());
//!
//! assert_eq!(report.status, PathStatus::Success);
//! assert_eq!(report.path.first(), Some(&NodeRef::cell(0, 1)));
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Coordinates and movement model
//! - [`scenario`]: Request description (space, endpoints, agent radius)
//! - [`nav`]: Validated navigable model with neighbor and visibility queries
//! - [`clearance`]: Obstacle inflation by agent radius
//! - [`pathfinding`]: A* search and path refinement
//! - [`report`]: Result assembly
//! - [`pipeline`]: End-to-end [`solve`]
//! - [`config`]: TOML configuration
//! - [`io`]: Scenario loading from JSON and YAML
//!
//! ## Data Flow
//!
//! ```text
//!   Scenario ──► nav::build ──► clearance::apply ──► astar::find_path
//!                   │                 │                     │
//!                   ▼                 ▼                     ▼
//!             InvalidScenario   InvalidScenario     raw path (maybe empty)
//!                                                           │
//!                                                    refine::refine
//!                                                           │
//!                                                           ▼
//!                                             report::assemble ──► PathReport
//! ```
//!
//! Each call owns its model and search state, so scenarios can be solved
//! from any number of threads at once.

pub mod clearance;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod nav;
pub mod pathfinding;
pub mod pipeline;
pub mod report;
pub mod scenario;

pub use config::MargaConfig;
pub use crate::core::{GridCoord, Movement, WorldPoint};
pub use error::{Endpoint, MargaError, Result, ScenarioError};
pub use nav::{NavModel, NodeIndex};
pub use pathfinding::{RefineConfig, SearchOutcome};
pub use pipeline::{solve, try_solve};
pub use report::{PathReport, PathStatus};
pub use scenario::{GraphEdge, GraphNode, Grouping, NodeRef, Scenario, SearchOptions, Space};
