//! Search and refinement configuration sections.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::core::Movement;
use crate::pathfinding::RefineConfig;

/// A* search settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchSection {
    /// Grid movement model when neither the scenario nor its space sets one
    #[serde(default = "defaults::movement")]
    pub movement: Movement,

    /// Cost multiplier for diagonal grid steps, within [1, 2]
    #[serde(default = "defaults::diagonal_cost")]
    pub diagonal_cost: f32,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            movement: defaults::movement(),
            diagonal_cost: defaults::diagonal_cost(),
        }
    }
}

impl SearchSection {
    /// Diagonal step cost kept within [1, 2].
    ///
    /// Loaded configs are range-checked by `validate`; sections built in code
    /// are clamped here instead, and NaN falls back to the default.
    pub fn admissible_diagonal_cost(&self) -> f32 {
        if self.diagonal_cost.is_nan() {
            defaults::diagonal_cost()
        } else {
            self.diagonal_cost.clamp(1.0, 2.0)
        }
    }
}

/// Path refinement settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefineSection {
    /// Shortcut along clear lines of sight
    #[serde(default = "defaults::enabled")]
    pub line_of_sight: bool,

    /// Colinearity tolerance for graph waypoints
    #[serde(default = "defaults::colinear_tolerance")]
    pub colinear_tolerance: f32,
}

impl Default for RefineSection {
    fn default() -> Self {
        Self {
            line_of_sight: defaults::enabled(),
            colinear_tolerance: defaults::colinear_tolerance(),
        }
    }
}

impl RefineSection {
    /// Convert to RefineConfig
    pub fn to_refine_config(&self) -> RefineConfig {
        RefineConfig {
            line_of_sight: self.line_of_sight,
            colinear_tolerance: self.colinear_tolerance,
        }
    }
}
