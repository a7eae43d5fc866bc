//! A* planner implementation.

use std::collections::BinaryHeap;
use std::time::Instant;

use log::{debug, trace};

use super::types::{HeapEntry, NodeState, SearchOutcome, SearchState};
use crate::nav::{NavModel, NodeIndex};

/// A* pathfinder over a [`NavModel`]
pub struct AStarPlanner<'a> {
    model: &'a NavModel,
}

impl<'a> AStarPlanner<'a> {
    pub fn new(model: &'a NavModel) -> Self {
        Self { model }
    }

    /// Find the cheapest path from `start` to `goal`.
    ///
    /// Returns an empty path when the goal is unreachable or an endpoint is
    /// blocked. Elapsed time covers the whole call.
    pub fn find_path(&self, start: NodeIndex, goal: NodeIndex) -> SearchOutcome {
        let timer = Instant::now();
        let mut outcome = self.search(start, goal);
        outcome.elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0;
        outcome
    }

    fn search(&self, start: NodeIndex, goal: NodeIndex) -> SearchOutcome {
        let model = self.model;
        trace!(
            "[AStar] find_path: start={} goal={}",
            model.node_ref(start),
            model.node_ref(goal)
        );

        if model.is_blocked(start) || model.is_blocked(goal) {
            debug!("[AStar] FAILED: endpoint blocked");
            return SearchOutcome::not_found(0);
        }

        let mut states = vec![SearchState::default(); model.node_count()];
        let mut open_set = BinaryHeap::new();
        let mut seq = 0u64;

        let h_start = model.heuristic(start, goal);
        states[start] = SearchState {
            g: 0.0,
            h: h_start,
            f: h_start,
            parent: None,
            state: NodeState::Open,
        };
        open_set.push(HeapEntry {
            node: start,
            g_cost: 0.0,
            f_cost: h_start,
            seq,
        });

        let mut nodes_expanded = 0;
        let mut edges = Vec::with_capacity(8);

        while let Some(current) = open_set.pop() {
            let node = current.node;

            // Superseded by a cheaper push, or already expanded
            if states[node].state == NodeState::Closed || current.g_cost > states[node].g {
                continue;
            }

            // Goal reached
            if node == goal {
                return self.reconstruct_path(&states, goal, nodes_expanded);
            }

            states[node].state = NodeState::Closed;
            nodes_expanded += 1;

            model.neighbors(node, &mut edges);
            for edge in &edges {
                let tentative_g = current.g_cost + edge.weight;
                let neighbor = &mut states[edge.to];
                if tentative_g >= neighbor.g {
                    continue;
                }

                if neighbor.state == NodeState::Unseen {
                    neighbor.h = model.heuristic(edge.to, goal);
                } else if neighbor.state == NodeState::Closed {
                    trace!("[AStar] Reopening {}", model.node_ref(edge.to));
                }
                neighbor.g = tentative_g;
                neighbor.f = tentative_g + neighbor.h;
                neighbor.parent = Some(node);
                neighbor.state = NodeState::Open;

                seq += 1;
                open_set.push(HeapEntry {
                    node: edge.to,
                    g_cost: tentative_g,
                    f_cost: neighbor.f,
                    seq,
                });
            }
        }

        debug!(
            "[AStar] FAILED: NoPath after expanding {} nodes",
            nodes_expanded
        );
        SearchOutcome::not_found(nodes_expanded)
    }

    /// Walk parent links back from the goal
    fn reconstruct_path(
        &self,
        states: &[SearchState],
        goal: NodeIndex,
        nodes_expanded: usize,
    ) -> SearchOutcome {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(prev) = states[current].parent {
            path.push(prev);
            current = prev;
        }
        path.reverse();

        let cost = states[goal].g;
        trace!(
            "[AStar] SUCCESS: path length={} nodes, cost={:.2}, nodes_expanded={}",
            path.len(),
            cost,
            nodes_expanded
        );

        SearchOutcome {
            path,
            cost,
            nodes_expanded,
            elapsed_ms: 0.0,
        }
    }
}
