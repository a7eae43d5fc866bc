//! Navigable model built from a scenario.
//!
//! A [`NavModel`] normalizes both kinds of space into indexed nodes with:
//! - positions (grid cells sit at integer coordinates)
//! - traversal costs
//! - obstacle and blocked flags (blocked = obstacle or inflated)
//! - O(1) amortized neighbor enumeration
//!
//! Start and goal are resolved and validated during [`build`].

mod build;
mod sight;

pub use build::build;

use std::collections::HashMap;

use crate::core::{GridCoord, Movement, WorldPoint};
use crate::error::ScenarioError;
use crate::scenario::NodeRef;

/// Index of a node inside a [`NavModel`]
pub type NodeIndex = usize;

/// Outgoing movement to a neighboring node
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: NodeIndex,
    pub weight: f32,
}

/// Connectivity of the model
#[derive(Clone, Debug)]
pub enum Topology {
    Grid {
        width: usize,
        height: usize,
        movement: Movement,
        diagonal_cost: f32,
    },
    Graph {
        ids: Vec<String>,
        index: HashMap<String, NodeIndex>,
        positions: Vec<WorldPoint>,
        adjacency: Vec<Vec<Edge>>,
    },
}

/// Validated navigable structure for one computation
#[derive(Clone, Debug)]
pub struct NavModel {
    topology: Topology,
    costs: Vec<f32>,
    obstacles: Vec<bool>,
    blocked: Vec<bool>,
    heuristic_scale: f32,
    start: NodeIndex,
    goal: NodeIndex,
    inflation_radius: Option<f32>,
    /// Distance to the nearest obstacle, exact up to the inflation radius
    /// and `f32::INFINITY` beyond it
    obstacle_distance: Option<Vec<f32>>,
}

impl NavModel {
    /// Total number of nodes (free and blocked)
    #[inline]
    pub fn node_count(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn start(&self) -> NodeIndex {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> NodeIndex {
        self.goal
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Grid movement model, `None` for graphs
    pub fn movement(&self) -> Option<Movement> {
        match &self.topology {
            Topology::Grid { movement, .. } => Some(*movement),
            Topology::Graph { .. } => None,
        }
    }

    /// Node cannot be entered (obstacle or inflated)
    #[inline]
    pub fn is_blocked(&self, node: NodeIndex) -> bool {
        self.blocked[node]
    }

    /// Node is an obstacle from the scenario itself
    #[inline]
    pub fn is_obstacle(&self, node: NodeIndex) -> bool {
        self.obstacles[node]
    }

    /// Traversal cost of entering the node
    #[inline]
    pub fn cost(&self, node: NodeIndex) -> f32 {
        self.costs[node]
    }

    /// Number of blocked nodes
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    /// Radius applied by the clearance adapter, if any
    pub fn inflation_radius(&self) -> Option<f32> {
        self.inflation_radius
    }

    /// Distance to the nearest obstacle after inflation.
    ///
    /// `None` when no inflation was applied; `f32::INFINITY` for nodes farther
    /// than the inflation radius from every obstacle.
    pub fn obstacle_distance(&self, node: NodeIndex) -> Option<f32> {
        self.obstacle_distance.as_ref().map(|d| d[node])
    }

    /// Position of a node (grid cells at integer coordinates)
    pub fn position(&self, node: NodeIndex) -> WorldPoint {
        match &self.topology {
            Topology::Grid { width, .. } => grid_coord(*width, node).center(),
            Topology::Graph { positions, .. } => positions[node],
        }
    }

    /// Grid coordinate of a node, `None` for graphs
    pub fn coord(&self, node: NodeIndex) -> Option<GridCoord> {
        match &self.topology {
            Topology::Grid { width, .. } => Some(grid_coord(*width, node)),
            Topology::Graph { .. } => None,
        }
    }

    /// Index of a grid cell, `None` if out of bounds or not a grid
    pub fn index_of(&self, coord: GridCoord) -> Option<NodeIndex> {
        match &self.topology {
            Topology::Grid { width, height, .. } => grid_index(*width, *height, coord),
            Topology::Graph { .. } => None,
        }
    }

    /// External reference for a node
    pub fn node_ref(&self, node: NodeIndex) -> NodeRef {
        match &self.topology {
            Topology::Grid { width, .. } => grid_coord(*width, node).into(),
            Topology::Graph { ids, .. } => NodeRef::Id(ids[node].clone()),
        }
    }

    /// Resolve an external reference to a node index
    pub fn resolve(&self, reference: &NodeRef) -> Result<NodeIndex, ScenarioError> {
        match (&self.topology, reference) {
            (Topology::Grid { width, height, .. }, NodeRef::Cell { x, y }) => {
                grid_index(*width, *height, GridCoord::new(*x, *y)).ok_or(
                    ScenarioError::OutOfBounds {
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                    },
                )
            }
            (Topology::Graph { index, .. }, NodeRef::Id(id)) => index
                .get(id)
                .copied()
                .ok_or_else(|| ScenarioError::UnknownNode(id.clone())),
            (Topology::Grid { .. }, NodeRef::Id(_)) => Err(ScenarioError::MismatchedReference {
                reference: reference.to_string(),
                space: "grid",
            }),
            (Topology::Graph { .. }, NodeRef::Cell { .. }) => {
                Err(ScenarioError::MismatchedReference {
                    reference: reference.to_string(),
                    space: "graph",
                })
            }
        }
    }

    /// Collect unblocked neighbors of `node` into `out` (cleared first).
    ///
    /// Grid diagonal steps are only offered when both orthogonal cells they
    /// pass between are free, so paths never cut a blocked corner.
    pub fn neighbors(&self, node: NodeIndex, out: &mut Vec<Edge>) {
        out.clear();
        match &self.topology {
            Topology::Grid {
                width,
                height,
                movement,
                diagonal_cost,
            } => {
                let coord = grid_coord(*width, node);
                let free = |c: GridCoord| {
                    grid_index(*width, *height, c).filter(|&i| !self.blocked[i])
                };

                for neighbor in coord.neighbors_4() {
                    if let Some(i) = free(neighbor) {
                        out.push(Edge {
                            to: i,
                            weight: self.costs[i],
                        });
                    }
                }

                if movement.allows_diagonal() {
                    for neighbor in &coord.neighbors_8()[4..] {
                        let side_x = GridCoord::new(neighbor.x, coord.y);
                        let side_y = GridCoord::new(coord.x, neighbor.y);
                        if free(side_x).is_none() || free(side_y).is_none() {
                            continue;
                        }
                        if let Some(i) = free(*neighbor) {
                            out.push(Edge {
                                to: i,
                                weight: diagonal_cost * self.costs[i],
                            });
                        }
                    }
                }
            }
            Topology::Graph { adjacency, .. } => {
                out.extend(
                    adjacency[node]
                        .iter()
                        .filter(|e| !self.blocked[e.to])
                        .map(|e| Edge {
                            to: e.to,
                            weight: e.weight + self.costs[e.to],
                        }),
                );
            }
        }
    }

    /// Cheapest single-step cost from `from` to `to`, if they are adjacent
    pub fn edge_weight(&self, from: NodeIndex, to: NodeIndex) -> Option<f32> {
        let mut edges = Vec::new();
        self.neighbors(from, &mut edges);
        edges
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.weight)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Total cost of a node sequence, `None` if any step is not an edge
    pub fn path_cost(&self, path: &[NodeIndex]) -> Option<f32> {
        path.windows(2)
            .map(|w| self.edge_weight(w[0], w[1]))
            .sum()
    }

    /// Admissible, consistent estimate of the remaining cost
    pub fn heuristic(&self, from: NodeIndex, to: NodeIndex) -> f32 {
        let estimate = match &self.topology {
            Topology::Grid {
                width,
                movement,
                diagonal_cost,
                ..
            } => {
                let a = grid_coord(*width, from);
                let b = grid_coord(*width, to);

                match movement {
                    Movement::Four => a.manhattan_distance(&b) as f32,
                    Movement::Eight => {
                        // Octile distance
                        let dx = (a.x - b.x).abs() as f32;
                        let dy = (a.y - b.y).abs() as f32;
                        let min = dx.min(dy);
                        let max = dx.max(dy);
                        min * diagonal_cost + (max - min)
                    }
                }
            }
            Topology::Graph { positions, .. } => positions[from].distance(&positions[to]),
        };
        self.heuristic_scale * estimate
    }

    /// Mark a node as blocked
    pub(crate) fn block(&mut self, node: NodeIndex) {
        self.blocked[node] = true;
    }

    pub(crate) fn set_inflation(&mut self, radius: f32, distances: Vec<f32>) {
        self.inflation_radius = Some(radius);
        self.obstacle_distance = Some(distances);
    }
}

#[inline]
fn grid_coord(width: usize, node: NodeIndex) -> GridCoord {
    GridCoord::new((node % width) as i32, (node / width) as i32)
}

#[inline]
fn grid_index(width: usize, height: usize, coord: GridCoord) -> Option<NodeIndex> {
    if coord.x < 0 || coord.y < 0 {
        return None;
    }
    let (x, y) = (coord.x as usize, coord.y as usize);
    if x >= width || y >= height {
        return None;
    }
    Some(y * width + x)
}
