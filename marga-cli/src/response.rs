//! JSON response envelope printed once per scenario file.

use marga::io::ScenarioFile;
use marga::{NodeRef, PathReport};
use serde::Serialize;

/// Outcome of one scenario file.
///
/// `status` is true whenever the file was read and solved, including
/// `NoPath` and invalid-scenario results; the result itself is in `message`.
#[derive(Clone, Debug, Serialize)]
pub struct Response {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    pub name: String,
    pub size: u64,
    #[serde(rename = "elapsedMS")]
    pub elapsed_ms: f64,
    pub path: Vec<NodeRef>,
    pub refined_path: Vec<NodeRef>,
}

impl Response {
    /// Envelope for a file that was loaded and solved
    pub fn solved(file: &ScenarioFile, report: &PathReport) -> Self {
        Self {
            status: true,
            message: report.message.clone(),
            grouping: Some(report.grouping),
            data: Some(ResponseData {
                name: file.name.clone(),
                size: file.size,
                elapsed_ms: report.elapsed_ms,
                path: report.path.clone(),
                refined_path: report.refined_path.clone(),
            }),
        }
    }

    /// Envelope for a file that could not be read or parsed
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
            grouping: None,
            data: None,
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
