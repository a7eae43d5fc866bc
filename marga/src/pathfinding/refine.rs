//! Path refinement.
//!
//! Reduces a raw A* path to its essential waypoints:
//! - Line-of-sight shortcutting (optional)
//! - Colinear waypoint collapse
//!
//! The output is always a subsequence of the input with the same endpoints,
//! and refining a refined path changes nothing.

use log::trace;

use crate::core::WorldPoint;
use crate::nav::{NavModel, NodeIndex};

/// Path refinement configuration
#[derive(Clone, Debug, PartialEq)]
pub struct RefineConfig {
    /// Shortcut between waypoints with clear line of sight
    pub line_of_sight: bool,
    /// Maximum sine of the turn angle at which graph waypoints count as colinear
    pub colinear_tolerance: f32,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            line_of_sight: true,
            colinear_tolerance: 1e-4,
        }
    }
}

/// Path refiner
pub struct PathRefiner<'a> {
    model: &'a NavModel,
    config: RefineConfig,
}

impl<'a> PathRefiner<'a> {
    pub fn new(model: &'a NavModel, config: RefineConfig) -> Self {
        Self { model, config }
    }

    /// Create with default configuration
    pub fn with_defaults(model: &'a NavModel) -> Self {
        Self::new(model, RefineConfig::default())
    }

    /// Shortcut (if enabled) then collapse colinear waypoints
    pub fn refine(&self, path: &[NodeIndex]) -> Vec<NodeIndex> {
        if path.len() <= 2 {
            return path.to_vec();
        }

        let refined = if self.config.line_of_sight {
            self.collapse_colinear(&self.shortcut(path))
        } else {
            self.collapse_colinear(path)
        };

        trace!(
            "[Refine] {} waypoints -> {} (line_of_sight={})",
            path.len(),
            refined.len(),
            self.config.line_of_sight
        );
        refined
    }

    /// Greedy line-of-sight shortcutting.
    ///
    /// From each anchor, jumps to the furthest later waypoint that is
    /// directly visible. The next waypoint is always accepted.
    pub fn shortcut(&self, path: &[NodeIndex]) -> Vec<NodeIndex> {
        if path.len() <= 2 {
            return path.to_vec();
        }

        let mut result = vec![path[0]];
        let mut anchor = 0;

        while anchor < path.len() - 1 {
            let furthest = ((anchor + 2)..path.len())
                .rev()
                .find(|&j| self.model.line_of_sight(path[anchor], path[j]))
                .unwrap_or(anchor + 1);

            result.push(path[furthest]);
            anchor = furthest;
        }

        result
    }

    /// Drop interior waypoints that continue straight on
    pub fn collapse_colinear(&self, path: &[NodeIndex]) -> Vec<NodeIndex> {
        if path.len() <= 2 {
            return path.to_vec();
        }

        let mut result = vec![path[0]];
        for i in 1..path.len() - 1 {
            let prev = result[result.len() - 1];
            if !self.is_straight(prev, path[i], path[i + 1]) {
                result.push(path[i]);
            }
        }
        result.push(path[path.len() - 1]);
        result
    }

    /// True if `b` lies on the way from `a` to `c` without turning
    fn is_straight(&self, a: NodeIndex, b: NodeIndex, c: NodeIndex) -> bool {
        match (self.model.coord(a), self.model.coord(b), self.model.coord(c)) {
            (Some(a), Some(b), Some(c)) => a.reduced_direction(&b) == b.reduced_direction(&c),
            _ => is_colinear(
                self.model.position(a),
                self.model.position(b),
                self.model.position(c),
                self.config.colinear_tolerance,
            ),
        }
    }
}

/// Quick refinement with the given configuration
pub fn refine(path: &[NodeIndex], model: &NavModel, config: &RefineConfig) -> Vec<NodeIndex> {
    PathRefiner::new(model, config.clone()).refine(path)
}

/// Same-direction test on positions: near-zero cross product, positive dot product
fn is_colinear(a: WorldPoint, b: WorldPoint, c: WorldPoint, tolerance: f32) -> bool {
    let u = b - a;
    let v = c - b;
    if u.dot(&v) <= 0.0 {
        return false;
    }
    u.cross(&v).abs() <= tolerance * u.length() * v.length()
}
