//! Core types for the marga pathfinding engine.
//!
//! - [`GridCoord`] and [`WorldPoint`]: Coordinate types
//! - [`CellType`]: ASCII map cell occupancy
//! - [`Movement`]: 4- or 8-connected grid movement

mod cell;
mod movement;
mod point;

pub use cell::CellType;
pub use movement::Movement;
pub use point::{GridCoord, WorldPoint};
