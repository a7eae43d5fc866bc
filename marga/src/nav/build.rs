//! Scenario validation and model construction.

use std::collections::HashMap;

use log::debug;

use super::{Edge, NavModel, NodeIndex, Topology};
use crate::core::{CellType, Movement, WorldPoint};
use crate::error::{Endpoint, ScenarioError};
use crate::scenario::{GraphEdge, GraphNode, Scenario, Space};

/// Build a navigable model from a scenario.
///
/// `movement` is used for grids whose space does not name a movement model.
/// Validation stops at the first violation, checking the space structure,
/// then obstacle references, then start and goal.
pub fn build(
    scenario: &Scenario,
    movement: Movement,
    diagonal_cost: f32,
) -> Result<NavModel, ScenarioError> {
    let mut model = match &scenario.space {
        Space::Grid {
            width,
            height,
            movement: space_movement,
            rows,
            costs,
        } => build_grid(
            *width,
            *height,
            space_movement.unwrap_or(movement),
            diagonal_cost,
            rows.as_deref(),
            costs.as_deref(),
        )?,
        Space::Graph {
            nodes,
            edges,
            directed,
        } => build_graph(nodes, edges, *directed)?,
    };

    for reference in &scenario.obstacles {
        let node = model.resolve(reference)?;
        model.obstacles[node] = true;
        model.blocked[node] = true;
    }

    model.start = resolve_endpoint(&model, scenario, Endpoint::Start)?;
    model.goal = resolve_endpoint(&model, scenario, Endpoint::Goal)?;
    model.heuristic_scale = heuristic_scale(&model);

    debug!(
        "[NavModel] Built {} model: {} nodes, {} blocked, heuristic scale {:.3}",
        scenario.space.kind(),
        model.node_count(),
        model.blocked_count(),
        model.heuristic_scale
    );

    Ok(model)
}

fn resolve_endpoint(
    model: &NavModel,
    scenario: &Scenario,
    endpoint: Endpoint,
) -> Result<NodeIndex, ScenarioError> {
    let reference = match endpoint {
        Endpoint::Start => &scenario.start,
        Endpoint::Goal => &scenario.goal,
    };
    let node = model.resolve(reference)?;
    if model.is_blocked(node) {
        return Err(ScenarioError::EndpointBlocked(endpoint));
    }
    Ok(node)
}

fn build_grid(
    width: usize,
    height: usize,
    movement: Movement,
    diagonal_cost: f32,
    rows: Option<&[String]>,
    costs: Option<&[f32]>,
) -> Result<NavModel, ScenarioError> {
    let (width, height, obstacles) = match rows {
        Some(rows) => parse_rows(width, height, rows)?,
        None => {
            let count = cell_count(width, height)?;
            (width, height, vec![false; count])
        }
    };
    let count = obstacles.len();

    let costs = match costs {
        Some(costs) => {
            if costs.len() != count {
                return Err(ScenarioError::CostLength {
                    len: costs.len(),
                    expected: count,
                });
            }
            for (i, &cost) in costs.iter().enumerate() {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(ScenarioError::InvalidCost {
                        node: format!("({}, {})", i % width, i / width),
                        cost,
                    });
                }
            }
            costs.to_vec()
        }
        None => vec![1.0; count],
    };

    Ok(NavModel {
        topology: Topology::Grid {
            width,
            height,
            movement,
            diagonal_cost,
        },
        costs,
        blocked: obstacles.clone(),
        obstacles,
        heuristic_scale: 1.0,
        start: 0,
        goal: 0,
        inflation_radius: None,
        obstacle_distance: None,
    })
}

/// Check dimensions and return the number of cells.
///
/// Cell coordinates must fit in `i32`.
fn cell_count(width: usize, height: usize) -> Result<usize, ScenarioError> {
    let invalid = ScenarioError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(invalid);
    }
    width.checked_mul(height).ok_or(invalid)
}

fn parse_rows(
    width: usize,
    height: usize,
    rows: &[String],
) -> Result<(usize, usize, Vec<bool>), ScenarioError> {
    let row_len = rows.first().map_or(0, |r| r.chars().count());
    let derived_width = if width == 0 { row_len } else { width };
    let derived_height = if height == 0 { rows.len() } else { height };

    if derived_height != rows.len() {
        return Err(ScenarioError::InvalidDimensions {
            width: derived_width,
            height: derived_height,
        });
    }
    let count = cell_count(derived_width, derived_height)?;

    let mut obstacles = Vec::with_capacity(count);
    for (y, row) in rows.iter().enumerate() {
        let len = row.chars().count();
        if len != derived_width {
            return Err(ScenarioError::MalformedRow {
                row: y,
                len,
                expected: derived_width,
            });
        }
        for (x, ch) in row.chars().enumerate() {
            let cell = CellType::from_char(ch).ok_or(ScenarioError::InvalidCell { ch, x, y })?;
            obstacles.push(!cell.is_traversable());
        }
    }

    Ok((derived_width, derived_height, obstacles))
}

fn build_graph(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    directed: bool,
) -> Result<NavModel, ScenarioError> {
    if nodes.is_empty() {
        return Err(ScenarioError::EmptyGraph);
    }

    let mut index = HashMap::with_capacity(nodes.len());
    let mut ids = Vec::with_capacity(nodes.len());
    let mut positions = Vec::with_capacity(nodes.len());
    let mut costs = Vec::with_capacity(nodes.len());
    let mut obstacles = Vec::with_capacity(nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.id.clone(), i).is_some() {
            return Err(ScenarioError::DuplicateNode(node.id.clone()));
        }
        let position = WorldPoint::new(node.x, node.y);
        if !position.is_finite() {
            return Err(ScenarioError::InvalidPosition(node.id.clone()));
        }
        if !node.cost.is_finite() || node.cost < 0.0 {
            return Err(ScenarioError::InvalidCost {
                node: node.id.clone(),
                cost: node.cost,
            });
        }
        ids.push(node.id.clone());
        positions.push(position);
        costs.push(node.cost);
        obstacles.push(node.blocked);
    }

    let lookup = |id: &str| {
        index
            .get(id)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownNode(id.to_string()))
    };

    let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); nodes.len()];
    for edge in edges {
        let from = lookup(&edge.from)?;
        let to = lookup(&edge.to)?;
        let weight = edge
            .weight
            .unwrap_or_else(|| positions[from].distance(&positions[to]));
        if !weight.is_finite() || weight < 0.0 {
            return Err(ScenarioError::InvalidWeight {
                from: edge.from.clone(),
                to: edge.to.clone(),
                weight,
            });
        }

        adjacency[from].push(Edge { to, weight });
        if !directed && from != to {
            adjacency[to].push(Edge { to: from, weight });
        }
    }

    Ok(NavModel {
        topology: Topology::Graph {
            ids,
            index,
            positions,
            adjacency,
        },
        costs,
        blocked: obstacles.clone(),
        obstacles,
        heuristic_scale: 1.0,
        start: 0,
        goal: 0,
        inflation_radius: None,
        obstacle_distance: None,
    })
}

/// Smallest cost per unit of heuristic distance.
///
/// Grids: the cheapest free cell. Graphs: the cheapest edge weight per unit
/// of Euclidean length over edges with non-zero length.
fn heuristic_scale(model: &NavModel) -> f32 {
    let scale = match &model.topology {
        Topology::Grid { .. } => (0..model.node_count())
            .filter(|&i| !model.is_blocked(i))
            .map(|i| model.cost(i))
            .fold(f32::INFINITY, f32::min),
        Topology::Graph {
            positions,
            adjacency,
            ..
        } => adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |e| (from, e)))
            .filter_map(|(from, e)| {
                let length = positions[from].distance(&positions[e.to]);
                (length > 0.0).then(|| e.weight / length)
            })
            .fold(f32::INFINITY, f32::min),
    };

    if scale.is_finite() {
        scale
    } else {
        0.0
    }
}
