//! Clearance inflation for agents with a physical radius.
//!
//! Every node whose Euclidean distance to an obstacle is strictly less than
//! the agent radius becomes blocked. Grid distances are measured between
//! cell centers, graph distances between node positions.
//!
//! Grids stamp an exact disk around each obstacle cell that borders
//! free space. The nearest obstacle of any free cell always borders free
//! space, so interior obstacle cells can be skipped. Graphs query a k-d tree
//! of obstacle positions.

use std::collections::HashMap;

use kiddo::{KdTree, SquaredEuclidean};
use log::debug;

use crate::core::{GridCoord, WorldPoint};
use crate::error::{Endpoint, ScenarioError};
use crate::nav::{NavModel, NodeIndex, Topology};

/// Bucket size of kiddo's default `KdTree`.
///
/// The tree panics when more points than this share one value on an axis.
const KD_BUCKET_SIZE: usize = 32;

/// Block every node closer than `radius` to an obstacle.
///
/// An absent or zero radius leaves the model untouched. Fails when the
/// radius is negative or not finite, or when the start or goal ends up
/// inside the inflated region.
pub fn apply(mut model: NavModel, radius: Option<f32>) -> Result<NavModel, ScenarioError> {
    let radius = match radius {
        None => return Ok(model),
        Some(r) if r == 0.0 => return Ok(model),
        Some(r) if !r.is_finite() || r < 0.0 => return Err(ScenarioError::InvalidRadius(r)),
        Some(r) => r,
    };

    let distances = match model.topology() {
        Topology::Grid { width, height, .. } => grid_distances(&model, *width, *height, radius),
        Topology::Graph { positions, .. } => graph_distances(&model, positions, radius),
    };

    let before = model.blocked_count();
    for (node, &distance) in distances.iter().enumerate() {
        if distance < radius {
            model.block(node);
        }
    }
    debug!(
        "[Clearance] Radius {}: {} nodes inflated",
        radius,
        model.blocked_count() - before
    );

    for (endpoint, node) in [(Endpoint::Start, model.start()), (Endpoint::Goal, model.goal())] {
        if model.is_blocked(node) {
            return Err(ScenarioError::EndpointInflated { endpoint, radius });
        }
    }

    model.set_inflation(radius, distances);
    Ok(model)
}

/// Distance to the nearest obstacle cell, `INFINITY` at or beyond `radius`
fn grid_distances(model: &NavModel, width: usize, height: usize, radius: f32) -> Vec<f32> {
    let mut distances = vec![f32::INFINITY; model.node_count()];

    // Offsets never reach past the grid on either axis
    let radius_sq = f64::from(radius) * f64::from(radius);
    let reach = f64::from(radius).ceil() as i64;
    let reach_x = reach.min(width as i64 - 1);
    let reach_y = reach.min(height as i64 - 1);

    let mut disk = Vec::new();
    for dy in -reach_y..=reach_y {
        for dx in -reach_x..=reach_x {
            let d_sq = (dx * dx + dy * dy) as f64;
            let d = d_sq.sqrt() as f32;
            // The f32 check keeps the field in step with the blocking test
            if d_sq < radius_sq && d < radius {
                disk.push((GridCoord::new(dx as i32, dy as i32), d));
            }
        }
    }

    for node in 0..model.node_count() {
        if !model.is_obstacle(node) {
            continue;
        }
        distances[node] = 0.0;

        let Some(center) = model.coord(node) else {
            continue;
        };
        let borders_free = center
            .neighbors_4()
            .iter()
            .any(|&n| model.index_of(n).is_some_and(|i| !model.is_obstacle(i)));
        if !borders_free {
            continue;
        }

        for &(offset, d) in &disk {
            if let Some(i) = model.index_of(center + offset) {
                if d < distances[i] {
                    distances[i] = d;
                }
            }
        }
    }

    debug_assert_eq!(distances.len(), width * height);
    distances
}

/// Distance to the nearest obstacle node, `INFINITY` at or beyond `radius`
fn graph_distances(model: &NavModel, positions: &[WorldPoint], radius: f32) -> Vec<f32> {
    let obstacles: Vec<NodeIndex> = (0..model.node_count())
        .filter(|&i| model.is_obstacle(i))
        .collect();
    if obstacles.is_empty() {
        return vec![f32::INFINITY; model.node_count()];
    }

    let nearest: Vec<f32> = if fits_kd_buckets(&obstacles, positions) {
        let mut tree: KdTree<f32, 2> = KdTree::new();
        for &o in &obstacles {
            tree.add(&[positions[o].x, positions[o].y], o as u64);
        }
        positions
            .iter()
            .map(|p| tree.nearest_one::<SquaredEuclidean>(&[p.x, p.y]).distance.sqrt())
            .collect()
    } else {
        debug!("[Clearance] Obstacles share coordinates, scanning pairwise");
        positions
            .iter()
            .map(|p| {
                obstacles
                    .iter()
                    .map(|&o| p.distance(&positions[o]))
                    .fold(f32::INFINITY, f32::min)
            })
            .collect()
    };

    nearest
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            if model.is_obstacle(i) {
                0.0
            } else if d < radius {
                d
            } else {
                f32::INFINITY
            }
        })
        .collect()
}

/// No axis value is shared by more obstacles than a tree bucket holds
fn fits_kd_buckets(obstacles: &[NodeIndex], positions: &[WorldPoint]) -> bool {
    let mut xs: HashMap<u32, usize> = HashMap::new();
    let mut ys: HashMap<u32, usize> = HashMap::new();
    for &o in obstacles {
        let p = positions[o];
        // Adding 0.0 folds -0.0 into 0.0
        for (counts, value) in [(&mut xs, p.x), (&mut ys, p.y)] {
            let count = counts.entry((value + 0.0).to_bits()).or_insert(0);
            *count += 1;
            if *count > KD_BUCKET_SIZE {
                return false;
            }
        }
    }
    true
}
