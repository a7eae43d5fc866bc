//! Test utilities for marga integration tests.
//!
//! Scenario builders, random map generators and a brute-force shortest-path
//! oracle.

#![allow(dead_code)]

use marga::{GraphEdge, GraphNode, Movement, NavModel, NodeIndex, NodeRef, Scenario, Space};
use rand::rngs::StdRng;
use rand::Rng;

/// Grid scenario from ASCII rows with the given movement model.
pub fn grid_scenario(
    rows: &[&str],
    start: (i32, i32),
    goal: (i32, i32),
    movement: Movement,
) -> Scenario {
    Scenario::new(
        Space::from_rows(rows).with_movement(movement),
        NodeRef::cell(start.0, start.1),
        NodeRef::cell(goal.0, goal.1),
    )
}

/// Random obstacle map with the corners kept free.
pub fn random_rows(rng: &mut StdRng, width: usize, height: usize, density: f64) -> Vec<String> {
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let corner = (x == 0 && y == 0) || (x == width - 1 && y == height - 1);
                    if !corner && rng.gen_bool(density) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}

/// Random grid scenario between opposite corners.
pub fn random_grid(rng: &mut StdRng, width: usize, height: usize, density: f64) -> Scenario {
    let rows = random_rows(rng, width, height, density);
    let movement = if rng.gen_bool(0.5) {
        Movement::Four
    } else {
        Movement::Eight
    };
    Scenario::new(
        Space::from_rows(&rows).with_movement(movement),
        NodeRef::cell(0, 0),
        NodeRef::cell(width as i32 - 1, height as i32 - 1),
    )
}

/// Random positioned graph with arbitrary non-negative weights.
pub fn random_graph(rng: &mut StdRng, nodes: usize, edges: usize) -> Scenario {
    let graph_nodes: Vec<GraphNode> = (0..nodes)
        .map(|i| {
            let mut node = GraphNode::new(
                format!("n{}", i),
                rng.gen_range(0.0..20.0),
                rng.gen_range(0.0..20.0),
            );
            if rng.gen_bool(0.2) {
                node.cost = rng.gen_range(0.0..3.0);
            }
            node
        })
        .collect();

    let graph_edges: Vec<GraphEdge> = (0..edges)
        .map(|_| {
            let from = format!("n{}", rng.gen_range(0..nodes));
            let to = format!("n{}", rng.gen_range(0..nodes));
            if rng.gen_bool(0.5) {
                GraphEdge::weighted(from, to, rng.gen_range(0.0..30.0))
            } else {
                GraphEdge::new(from, to)
            }
        })
        .collect();

    Scenario::new(
        Space::Graph {
            nodes: graph_nodes,
            edges: graph_edges,
            directed: rng.gen_bool(0.3),
        },
        NodeRef::id("n0"),
        NodeRef::id(format!("n{}", nodes - 1)),
    )
}

/// Mark random graph nodes as obstacles, never the start or goal.
pub fn block_random_nodes(scenario: &mut Scenario, rng: &mut StdRng, density: f64) {
    let endpoints = [scenario.start.clone(), scenario.goal.clone()];
    if let Space::Graph { nodes, .. } = &mut scenario.space {
        for node in nodes.iter_mut() {
            let id = NodeRef::id(node.id.clone());
            if !endpoints.contains(&id) && rng.gen_bool(density) {
                node.blocked = true;
            }
        }
    }
}

/// Cheapest cost from `start` to every node (no heuristic, no heap).
pub fn dijkstra_all(model: &NavModel, start: NodeIndex) -> Vec<f32> {
    let n = model.node_count();
    let mut dist = vec![f32::INFINITY; n];
    let mut done = vec![false; n];
    let mut edges = Vec::new();
    dist[start] = 0.0;

    loop {
        let next = (0..n)
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(u) = next else { break };
        done[u] = true;

        model.neighbors(u, &mut edges);
        for edge in &edges {
            let candidate = dist[u] + edge.weight;
            if candidate < dist[edge.to] {
                dist[edge.to] = candidate;
            }
        }
    }
    dist
}

/// Cheapest cost from `start` to `goal`, if reachable.
pub fn dijkstra(model: &NavModel, start: NodeIndex, goal: NodeIndex) -> Option<f32> {
    let d = dijkstra_all(model, start)[goal];
    d.is_finite().then_some(d)
}

/// Grid coordinates of report references.
pub fn cells(path: &[NodeRef]) -> Vec<(i32, i32)> {
    path.iter()
        .filter_map(|r| r.as_coord())
        .map(|c| (c.x, c.y))
        .collect()
}

/// True if `sub` appears in `full` in order.
pub fn is_subsequence<T: PartialEq>(sub: &[T], full: &[T]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|s| it.any(|f| f == s))
}

/// Loose float comparison for path costs summed in different orders.
pub fn costs_match(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * a.abs().max(b.abs()).max(1.0)
}
