//! Scenario parsing from JSON and YAML.

use std::path::Path;

use crate::error::{MargaError, Result};
use crate::scenario::Scenario;

/// Text encoding of a scenario file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Yaml,
}

impl ScenarioFormat {
    /// Pick the format from a file extension (`.yaml`/`.yml`, else JSON)
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ScenarioFormat::Yaml,
            _ => ScenarioFormat::Json,
        }
    }

    /// Parse scenario text in this format
    pub fn parse(self, content: &str) -> Result<Scenario> {
        match self {
            ScenarioFormat::Json => scenario_from_json(content),
            ScenarioFormat::Yaml => scenario_from_yaml(content),
        }
    }
}

/// A scenario together with the file it came from
#[derive(Clone, Debug)]
pub struct ScenarioFile {
    /// File name without directories
    pub name: String,
    /// File size in bytes
    pub size: u64,
    pub scenario: Scenario,
}

/// Parse a scenario from JSON
pub fn scenario_from_json(json: &str) -> Result<Scenario> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a scenario from YAML
pub fn scenario_from_yaml(yaml: &str) -> Result<Scenario> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a scenario file, choosing the format by extension
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    load_scenario_file(path).map(|file| file.scenario)
}

/// Load a scenario file along with its name and size
pub fn load_scenario_file(path: &Path) -> Result<ScenarioFile> {
    let content = std::fs::read_to_string(path)?;
    let scenario = ScenarioFormat::from_path(path)
        .parse(&content)
        .map_err(|e| match e {
            MargaError::Parse(msg) => MargaError::Parse(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ScenarioFile {
        name,
        size: content.len() as u64,
        scenario,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{NodeRef, Space};

    const YAML: &str = r#"
space:
  type: grid
  movement: four
  rows:
    - "...."
    - ".##."
    - "...."
start: { x: 0, y: 0 }
goal: [3, 2]
grouping:
  radius: "0.5"
options:
  line_of_sight: false
"#;

    #[test]
    fn test_yaml_scenario() {
        let scenario = scenario_from_yaml(YAML).unwrap();
        assert_eq!(scenario.goal, NodeRef::cell(3, 2));
        assert_eq!(scenario.effective_radius(), Some(0.5));
        assert_eq!(scenario.options.line_of_sight, Some(false));
        assert!(matches!(scenario.space, Space::Grid { rows: Some(ref r), .. } if r.len() == 3));
    }

    #[test]
    fn test_json_parse_error() {
        let err = scenario_from_json(r#"{"space": {"type": "hex"}}"#).unwrap_err();
        assert!(matches!(err, MargaError::Parse(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ScenarioFormat::from_path(Path::new("a.yml")), ScenarioFormat::Yaml);
        assert_eq!(ScenarioFormat::from_path(Path::new("a.YAML")), ScenarioFormat::Yaml);
        assert_eq!(ScenarioFormat::from_path(Path::new("a.json")), ScenarioFormat::Json);
        assert_eq!(ScenarioFormat::from_path(Path::new("a")), ScenarioFormat::Json);
    }

    #[test]
    fn test_load_scenario_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.yaml");
        std::fs::write(&path, YAML).unwrap();

        let file = load_scenario_file(&path).unwrap();
        assert_eq!(file.name, "room.yaml");
        assert_eq!(file.size, YAML.len() as u64);
        assert_eq!(file.scenario.start, NodeRef::cell(0, 0));

        let missing = load_scenario(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(MargaError::Io(_))));
    }
}
