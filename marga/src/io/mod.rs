//! Scenario input.
//!
//! Scenarios are read from JSON or YAML, picked by file extension:
//!
//! ```rust,ignore
//! use marga::io::load_scenario;
//! use std::path::Path;
//!
//! let scenario = load_scenario(Path::new("scenarios/corridor.yaml"))?;
//! let report = marga::solve(&scenario, &marga::MargaConfig::default());
//! ```

pub mod scenario;

pub use scenario::{
    load_scenario, load_scenario_file, scenario_from_json, scenario_from_yaml, ScenarioFile,
    ScenarioFormat,
};
