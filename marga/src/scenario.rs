//! Scenario description consumed by the pipeline.
//!
//! A scenario holds:
//! - The navigable space (a grid or an explicit graph)
//! - Extra obstacle references
//! - Start and goal references
//! - Optional agent parameters (`grouping.radius`)
//! - Optional per-scenario search overrides
//!
//! ## Example JSON
//!
//! ```json
//! {
//!   "space": { "type": "grid", "rows": ["....", ".##.", "...."] },
//!   "start": { "x": 0, "y": 0 },
//!   "goal": { "x": 3, "y": 2 },
//!   "grouping": { "radius": 1.5 }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::core::{GridCoord, Movement};

/// Reference to a node: a grid cell or a graph node id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum NodeRef {
    /// Grid cell
    Cell { x: i32, y: i32 },
    /// Graph node id
    Id(String),
}

/// Accepted spellings of a node reference
#[derive(Deserialize)]
#[serde(untagged)]
enum NodeRefRepr {
    Cell { x: i32, y: i32 },
    Pair(i32, i32),
    Id(String),
    Index(u64),
}

impl<'de> Deserialize<'de> for NodeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NodeRefRepr::deserialize(deserializer).map(NodeRef::from)
    }
}

impl From<NodeRefRepr> for NodeRef {
    fn from(repr: NodeRefRepr) -> Self {
        match repr {
            NodeRefRepr::Cell { x, y } | NodeRefRepr::Pair(x, y) => NodeRef::Cell { x, y },
            NodeRefRepr::Id(id) => NodeRef::Id(id),
            NodeRefRepr::Index(i) => NodeRef::Id(i.to_string()),
        }
    }
}

impl NodeRef {
    /// Reference to grid cell (x, y)
    pub fn cell(x: i32, y: i32) -> Self {
        NodeRef::Cell { x, y }
    }

    /// Reference to a graph node by id
    pub fn id(id: impl Into<String>) -> Self {
        NodeRef::Id(id.into())
    }

    /// Grid coordinate, if this is a cell reference
    pub fn as_coord(&self) -> Option<GridCoord> {
        match self {
            NodeRef::Cell { x, y } => Some(GridCoord::new(*x, *y)),
            NodeRef::Id(_) => None,
        }
    }
}

impl From<GridCoord> for NodeRef {
    fn from(coord: GridCoord) -> Self {
        NodeRef::Cell {
            x: coord.x,
            y: coord.y,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Cell { x, y } => write!(f, "({}, {})", x, y),
            NodeRef::Id(id) => write!(f, "'{}'", id),
        }
    }
}

/// Navigable space definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Space {
    /// Regular grid of unit cells
    Grid {
        /// Columns (derived from `rows` when 0)
        #[serde(default)]
        width: usize,
        /// Rows (derived from `rows` when 0)
        #[serde(default)]
        height: usize,
        /// Movement model (overrides options and config)
        #[serde(default)]
        movement: Option<Movement>,
        /// ASCII map, `rows[y]` character `x`: `.` free, `#` obstacle
        #[serde(default)]
        rows: Option<Vec<String>>,
        /// Row-major traversal cost per cell (default 1.0)
        #[serde(default)]
        costs: Option<Vec<f32>>,
    },
    /// Explicit graph with positioned nodes
    Graph {
        nodes: Vec<GraphNode>,
        #[serde(default)]
        edges: Vec<GraphEdge>,
        /// Edges are one-way when true
        #[serde(default)]
        directed: bool,
    },
}

impl Space {
    /// Open grid with unit costs
    pub fn grid(width: usize, height: usize) -> Self {
        Space::Grid {
            width,
            height,
            movement: None,
            rows: None,
            costs: None,
        }
    }

    /// Grid parsed from ASCII rows
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        Space::Grid {
            width: 0,
            height: 0,
            movement: None,
            rows: Some(rows.iter().map(|r| r.as_ref().to_string()).collect()),
            costs: None,
        }
    }

    /// Set the grid movement model (no effect on graphs)
    pub fn with_movement(mut self, m: Movement) -> Self {
        if let Space::Grid { movement, .. } = &mut self {
            *movement = Some(m);
        }
        self
    }

    /// Short name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Space::Grid { .. } => "grid",
            Space::Graph { .. } => "graph",
        }
    }
}

/// Graph vertex
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    /// Additive cost for entering this node
    #[serde(default)]
    pub cost: f32,
    /// Node is an obstacle
    #[serde(default)]
    pub blocked: bool,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            cost: 0.0,
            blocked: false,
        }
    }
}

/// Graph edge; undirected unless the graph is `directed`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    /// Movement cost (default: Euclidean length between the endpoints)
    #[serde(default)]
    pub weight: Option<f32>,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight: None,
        }
    }

    pub fn weighted(from: impl Into<String>, to: impl Into<String>, weight: f32) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(from, to)
        }
    }
}

/// Agent parameters for multi-agent clearance
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    /// Agent radius in space units; non-numeric values read as absent
    #[serde(default, deserialize_with = "lenient_radius")]
    pub radius: Option<f32>,
}

/// Per-scenario overrides of the configured search behaviour
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub movement: Option<Movement>,
    #[serde(default)]
    pub line_of_sight: Option<bool>,
}

/// A pathfinding request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub space: Space,
    #[serde(default)]
    pub obstacles: Vec<NodeRef>,
    pub start: NodeRef,
    pub goal: NodeRef,
    #[serde(default)]
    pub grouping: Option<Grouping>,
    #[serde(default)]
    pub options: SearchOptions,
}

impl Scenario {
    /// Create a scenario without obstacles or agent parameters
    pub fn new(space: Space, start: NodeRef, goal: NodeRef) -> Self {
        Self {
            space,
            obstacles: Vec::new(),
            start,
            goal,
            grouping: None,
            options: SearchOptions::default(),
        }
    }

    /// Add obstacle references
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = NodeRef>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Set the agent radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.grouping = Some(Grouping {
            radius: Some(radius),
        });
        self
    }

    /// Override line-of-sight refinement for this scenario
    pub fn with_line_of_sight(mut self, enabled: bool) -> Self {
        self.options.line_of_sight = Some(enabled);
        self
    }

    /// Radius the clearance adapter should apply.
    ///
    /// `None` when no radius was supplied or it is zero.
    pub fn effective_radius(&self) -> Option<f32> {
        self.grouping
            .as_ref()
            .and_then(|g| g.radius)
            .filter(|r| *r != 0.0)
    }

    /// True iff a numeric, finite, strictly positive radius was supplied
    pub fn grouping_enabled(&self) -> bool {
        self.effective_radius()
            .is_some_and(|r| r.is_finite() && r > 0.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RadiusRepr {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Read a radius the way a loosely typed client sends it.
///
/// Numbers pass through, numeric strings are parsed (an empty string is 0),
/// anything else (null, booleans, objects, NaN) means no radius.
fn lenient_radius<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RadiusRepr::deserialize(deserializer)? {
        RadiusRepr::Number(n) => Some(n),
        RadiusRepr::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        RadiusRepr::Other(_) => None,
    };
    Ok(value.filter(|n| !n.is_nan()).map(|n| n as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius_of(json: &str) -> Option<f32> {
        let grouping: Grouping = serde_json::from_str(json).unwrap();
        grouping.radius
    }

    #[test]
    fn test_lenient_radius() {
        assert_eq!(radius_of(r#"{"radius": 2}"#), Some(2.0));
        assert_eq!(radius_of(r#"{"radius": 1.5}"#), Some(1.5));
        assert_eq!(radius_of(r#"{"radius": "3"}"#), Some(3.0));
        assert_eq!(radius_of(r#"{"radius": " 0.5 "}"#), Some(0.5));
        assert_eq!(radius_of(r#"{"radius": ""}"#), Some(0.0));
        assert_eq!(radius_of(r#"{"radius": "wide"}"#), None);
        assert_eq!(radius_of(r#"{"radius": null}"#), None);
        assert_eq!(radius_of(r#"{"radius": true}"#), None);
        assert_eq!(radius_of(r#"{"radius": [1]}"#), None);
        assert_eq!(radius_of(r#"{}"#), None);
    }

    #[test]
    fn test_grouping_enabled() {
        let base = Scenario::new(Space::grid(3, 3), NodeRef::cell(0, 0), NodeRef::cell(2, 2));
        assert!(!base.grouping_enabled());
        assert!(!base.clone().with_radius(0.0).grouping_enabled());
        assert_eq!(base.clone().with_radius(0.0).effective_radius(), None);
        assert!(base.clone().with_radius(1.0).grouping_enabled());
        assert!(!base.clone().with_radius(-1.0).grouping_enabled());
        assert_eq!(base.with_radius(-1.0).effective_radius(), Some(-1.0));
    }

    #[test]
    fn test_node_ref_spellings() {
        let refs: Vec<NodeRef> =
            serde_json::from_str(r#"[{"x": 1, "y": 2}, [3, 4], "a", 7]"#).unwrap();
        assert_eq!(
            refs,
            vec![
                NodeRef::cell(1, 2),
                NodeRef::cell(3, 4),
                NodeRef::id("a"),
                NodeRef::id("7"),
            ]
        );

        let json = serde_json::to_string(&refs[..3]).unwrap();
        assert_eq!(json, r#"[{"x":1,"y":2},{"x":3,"y":4},"a"]"#);
    }

    #[test]
    fn test_parse_graph_space() {
        let json = r#"{
            "space": {
                "type": "graph",
                "nodes": [
                    {"id": "a", "x": 0, "y": 0},
                    {"id": "b", "x": 1, "y": 0, "cost": 0.5}
                ],
                "edges": [{"from": "a", "to": "b", "weight": 2.0}]
            },
            "start": "a",
            "goal": "b"
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        match &scenario.space {
            Space::Graph {
                nodes,
                edges,
                directed,
            } => {
                assert_eq!(nodes.len(), 2);
                assert_eq!(nodes[1].cost, 0.5);
                assert_eq!(edges[0].weight, Some(2.0));
                assert!(!directed);
            }
            other => panic!("expected graph space, got {:?}", other),
        }
        assert_eq!(scenario.start, NodeRef::id("a"));
        assert!(scenario.grouping.is_none());
    }
}
