//! A* search types.

use std::cmp::Ordering;

use crate::nav::NodeIndex;

/// Open-set entry
#[derive(Clone, Copy, Debug)]
pub(super) struct HeapEntry {
    pub node: NodeIndex,
    pub g_cost: f32, // Cost from start when pushed
    pub f_cost: f32, // g_cost + heuristic
    pub seq: u64,    // Push order
}

impl Eq for HeapEntry {}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest f first; on equal f the latest push wins
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lifecycle of a node within one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeState {
    #[default]
    Unseen,
    Open,
    Closed,
}

/// Per-node bookkeeping for one search run
#[derive(Clone, Copy, Debug)]
pub struct SearchState {
    pub g: f32,
    pub h: f32,
    pub f: f32,
    pub parent: Option<NodeIndex>,
    pub state: NodeState,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            g: f32::INFINITY,
            h: 0.0,
            f: f32::INFINITY,
            parent: None,
            state: NodeState::Unseen,
        }
    }
}

/// Result of one A* run
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Node sequence from start to goal (empty if no path)
    pub path: Vec<NodeIndex>,
    /// Sum of edge weights along `path` (infinite if no path)
    pub cost: f32,
    /// Number of nodes closed during the search
    pub nodes_expanded: usize,
    /// Wall-clock search time in milliseconds
    pub elapsed_ms: f64,
}

impl SearchOutcome {
    pub(super) fn not_found(nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: f32::INFINITY,
            nodes_expanded,
            elapsed_ms: 0.0,
        }
    }

    /// Whether a path was found
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}
