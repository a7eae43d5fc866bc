//! Error types for marga

use std::fmt;

use thiserror::Error;

/// Which end of the requested route an error refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Structural problems with a scenario.
///
/// These halt the pipeline before any search runs. A scenario that is valid
/// but has no route is not an error; it yields a `NoPath` report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("grid dimensions {width}x{height} are not valid")]
    InvalidDimensions { width: usize, height: usize },

    #[error("map row {row} has length {len}, expected {expected}")]
    MalformedRow { row: usize, len: usize, expected: usize },

    #[error("unknown map character '{ch}' at ({x}, {y})")]
    InvalidCell { ch: char, x: usize, y: usize },

    #[error("cost grid has {len} entries, expected {expected}")]
    CostLength { len: usize, expected: usize },

    #[error("traversal cost {cost} of node {node} must be finite and non-negative")]
    InvalidCost { node: String, cost: f32 },

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("reference {reference} does not match a {space} space")]
    MismatchedReference { reference: String, space: &'static str },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("node '{0}' has a non-finite position")]
    InvalidPosition(String),

    #[error("edge {from} -> {to} has weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { from: String, to: String, weight: f32 },

    #[error("{0} node is obstructed")]
    EndpointBlocked(Endpoint),

    #[error("agent radius {0} must be finite and non-negative")]
    InvalidRadius(f32),

    #[error("{endpoint} node lies within agent radius {radius} of an obstacle")]
    EndpointInflated { endpoint: Endpoint, radius: f32 },
}

/// Marga error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),
}

impl From<serde_json::Error> for MargaError {
    fn from(e: serde_json::Error) -> Self {
        MargaError::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for MargaError {
    fn from(e: serde_yaml::Error) -> Self {
        MargaError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
