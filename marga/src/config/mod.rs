//! Configuration loading for Marga.
//!
//! Every field is optional and falls back to its default. Scenario options
//! override the configured values.
//!
//! ```toml
//! [search]
//! movement = "four"
//! diagonal_cost = 1.4142135
//!
//! [refine]
//! line_of_sight = false
//! ```

mod defaults;
mod sections;

pub use sections::{RefineSection, SearchSection};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MargaError, Result};

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/marga.toml";

/// Full Marga configuration loaded from TOML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub search: SearchSection,

    #[serde(default)]
    pub refine: RefineSection,
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MargaError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load from the default path, or defaults if no file exists
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: MargaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// The octile heuristic is only admissible for diagonal costs in [1, 2].
    pub fn validate(&self) -> Result<()> {
        let diagonal = self.search.diagonal_cost;
        if !(1.0..=2.0).contains(&diagonal) {
            return Err(MargaError::Config(format!(
                "search.diagonal_cost must be within [1, 2], got {}",
                diagonal
            )));
        }
        let tolerance = self.refine.colinear_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(MargaError::Config(format!(
                "refine.colinear_tolerance must be finite and non-negative, got {}",
                tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Movement;

    #[test]
    fn test_default_config() {
        let config = MargaConfig::default();
        assert_eq!(config.search.movement, Movement::Eight);
        assert_eq!(config.search.diagonal_cost, std::f32::consts::SQRT_2);
        assert!(config.refine.line_of_sight);
        assert_eq!(config.refine.colinear_tolerance, 1e-4);
    }

    #[test]
    fn test_partial_toml() {
        let config = MargaConfig::from_toml("[search]\nmovement = \"four\"\n").unwrap();
        assert_eq!(config.search.movement, Movement::Four);
        assert_eq!(config.search.diagonal_cost, std::f32::consts::SQRT_2);
        assert_eq!(config.refine, RefineSection::default());

        let empty = MargaConfig::from_toml("").unwrap();
        assert_eq!(empty, MargaConfig::default());
    }

    #[test]
    fn test_diagonal_cost_range() {
        let err = MargaConfig::from_toml("[search]\ndiagonal_cost = 2.5\n").unwrap_err();
        assert!(matches!(err, MargaError::Config(_)));
        assert!(MargaConfig::from_toml("[search]\ndiagonal_cost = 1.0\n").is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let err = MargaConfig::from_toml("[search\n").unwrap_err();
        assert!(matches!(err, MargaError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marga.toml");
        std::fs::write(&path, "[refine]\nline_of_sight = false\n").unwrap();

        let config = MargaConfig::load(&path).unwrap();
        assert!(!config.refine.line_of_sight);
        assert!(!config.refine.to_refine_config().line_of_sight);

        let missing = MargaConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(MargaError::Config(_))));
    }
}
