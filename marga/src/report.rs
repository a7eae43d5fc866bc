//! Result assembly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::scenario::NodeRef;

/// Outcome category of a computation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    Success,
    NoPath,
    InvalidScenario,
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStatus::Success => write!(f, "success"),
            PathStatus::NoPath => write!(f, "no_path"),
            PathStatus::InvalidScenario => write!(f, "invalid_scenario"),
        }
    }
}

/// Final result of one scenario
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathReport {
    pub status: PathStatus,
    /// Human-readable status message
    pub message: String,
    /// Search time for computed results, validation time for invalid ones
    pub elapsed_ms: f64,
    /// Raw path, start to goal
    pub path: Vec<NodeRef>,
    /// Refined waypoints, a subsequence of `path`
    pub refined_path: Vec<NodeRef>,
    /// Raw path cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f32>,
    #[serde(default)]
    pub nodes_expanded: usize,
    /// Whether clearance inflation was requested
    #[serde(default)]
    pub grouping: bool,
}

impl PathReport {
    /// Report for a scenario rejected before the search
    pub fn invalid(error: &ScenarioError, elapsed_ms: f64) -> Self {
        Self {
            status: PathStatus::InvalidScenario,
            message: format!("Invalid scenario: {}", error),
            elapsed_ms: elapsed_ms.max(0.0),
            path: Vec::new(),
            refined_path: Vec::new(),
            cost: None,
            nodes_expanded: 0,
            grouping: false,
        }
    }

    /// Attach search statistics
    pub fn with_search_stats(mut self, cost: f32, nodes_expanded: usize) -> Self {
        self.cost = cost.is_finite().then_some(cost);
        self.nodes_expanded = nodes_expanded;
        self
    }

    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }
}

/// Build the report for a completed search.
///
/// The status depends only on whether the raw path is empty.
pub fn assemble(path: Vec<NodeRef>, refined_path: Vec<NodeRef>, elapsed_ms: f64) -> PathReport {
    let (status, message) = if path.is_empty() {
        (PathStatus::NoPath, "No path found")
    } else {
        (PathStatus::Success, "Path found")
    };

    PathReport {
        status,
        message: message.to_string(),
        elapsed_ms: elapsed_ms.max(0.0),
        path,
        refined_path,
        cost: None,
        nodes_expanded: 0,
        grouping: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Endpoint;

    #[test]
    fn test_assemble_success() {
        let path = vec![NodeRef::cell(0, 0), NodeRef::cell(1, 0), NodeRef::cell(2, 0)];
        let refined = vec![NodeRef::cell(0, 0), NodeRef::cell(2, 0)];
        let report = assemble(path.clone(), refined.clone(), 1.25);

        assert_eq!(report.status, PathStatus::Success);
        assert_eq!(report.message, "Path found");
        assert_eq!(report.path, path);
        assert_eq!(report.refined_path, refined);
        assert_eq!(report.elapsed_ms, 1.25);
    }

    #[test]
    fn test_assemble_no_path() {
        let report = assemble(Vec::new(), Vec::new(), 0.5).with_search_stats(f32::INFINITY, 12);
        assert_eq!(report.status, PathStatus::NoPath);
        assert_eq!(report.message, "No path found");
        assert_eq!(report.cost, None);
        assert_eq!(report.nodes_expanded, 12);
    }

    #[test]
    fn test_invalid_report() {
        let report = PathReport::invalid(&ScenarioError::EndpointBlocked(Endpoint::Start), 0.1);
        assert_eq!(report.status, PathStatus::InvalidScenario);
        assert_eq!(report.message, "Invalid scenario: start node is obstructed");
        assert!(report.path.is_empty() && report.refined_path.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let report = assemble(vec![NodeRef::id("a")], vec![NodeRef::id("a")], 0.0)
            .with_search_stats(0.0, 0)
            .with_grouping(true);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["path"], serde_json::json!(["a"]));
        assert_eq!(json["cost"], 0.0);
        assert_eq!(json["grouping"], true);
    }
}
