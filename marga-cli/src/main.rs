//! marga-cli - solve scenario files with the Marga pathfinding engine
//!
//! Each scenario file is loaded and solved on its own scoped thread. One JSON
//! response envelope per file is written to stdout in argument order; logs go
//! to stderr.
//!
//! ```text
//! marga-cli --pretty scenarios/open_grid.json scenarios/corridor.yaml
//! RUST_LOG=marga=debug marga-cli --movement four scenarios/open_grid.json
//! ```

mod error;
mod response;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use marga::io::load_scenario_file;
use marga::{solve, MargaConfig, Movement};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use error::{CliError, Result};
use response::Response;

const DEFAULT_LOG_FILTER: &str = "marga_cli=info,marga=info";

#[derive(Parser, Debug)]
#[command(name = "marga-cli", version, about = "Solve A* pathfinding scenarios")]
struct Args {
    /// TOML config file (defaults to configs/marga.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grid movement model: four or eight
    #[arg(long, value_name = "MOVEMENT")]
    movement: Option<Movement>,

    /// Refine paths by colinear collapse only
    #[arg(long)]
    no_line_of_sight: bool,

    /// Pretty-print each response
    #[arg(long)]
    pretty: bool,

    /// Scenario files (.json, .yaml or .yml)
    #[arg(required = true, value_name = "SCENARIO")]
    scenarios: Vec<PathBuf>,
}

impl Args {
    fn load_config(&self) -> Result<MargaConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from {:?}", path);
                MargaConfig::load(path)?
            }
            None => MargaConfig::load_default()?,
        };

        // Scenario options still take precedence over these
        if let Some(movement) = self.movement {
            config.search.movement = movement;
        }
        if self.no_line_of_sight {
            config.refine.line_of_sight = false;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.load_config()?;
    info!(
        "Solving {} scenario file(s), movement {}, line of sight {}",
        args.scenarios.len(),
        config.search.movement,
        config.refine.line_of_sight
    );

    let responses = solve_files(&args.scenarios, &config);
    for response in &responses {
        println!("{}", response.to_json(args.pretty)?);
    }

    let failed = responses.iter().filter(|r| !r.status).count();
    if failed > 0 {
        return Err(CliError::ScenarioFiles {
            failed,
            total: responses.len(),
        });
    }
    Ok(())
}

/// Solve every file on its own scoped thread, keeping argument order
fn solve_files(paths: &[PathBuf], config: &MargaConfig) -> Vec<Response> {
    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || solve_file(path, config)))
            .collect();

        handles
            .into_iter()
            .zip(paths)
            .map(|(handle, path)| {
                handle.join().unwrap_or_else(|_| {
                    Response::failed(format!("{}: solver thread panicked", path.display()))
                })
            })
            .collect()
    })
}

fn solve_file(path: &Path, config: &MargaConfig) -> Response {
    match load_scenario_file(path) {
        Ok(file) => {
            let report = solve(&file.scenario, config);
            info!(
                "{}: {} ({} raw, {} refined, {:.3}ms)",
                file.name,
                report.status,
                report.path.len(),
                report.refined_path.len(),
                report.elapsed_ms
            );
            Response::solved(&file, &report)
        }
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            Response::failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_arguments() {
        let args = Args::try_parse_from([
            "marga-cli",
            "--movement",
            "four",
            "--no-line-of-sight",
            "a.json",
            "b.yaml",
        ])
        .unwrap();
        assert_eq!(args.movement, Some(Movement::Four));
        assert!(args.no_line_of_sight);
        assert!(!args.pretty);
        assert_eq!(args.scenarios.len(), 2);

        assert!(Args::try_parse_from(["marga-cli"]).is_err());
        assert!(Args::try_parse_from(["marga-cli", "--movement", "six", "a.json"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = write_file(&dir, "marga.toml", "[search]\nmovement = \"eight\"\n");
        let config_arg = config_path.to_string_lossy().into_owned();
        let args = Args::try_parse_from([
            "marga-cli",
            "--config",
            config_arg.as_str(),
            "--movement",
            "four",
            "--no-line-of-sight",
            "a.json",
        ])
        .unwrap();

        let config = args.load_config().unwrap();
        assert_eq!(config.search.movement, Movement::Four);
        assert!(!config.refine.line_of_sight);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args =
            Args::try_parse_from(["marga-cli", "--config", "/nonexistent/marga.toml", "a.json"])
                .unwrap();
        assert!(matches!(args.load_config(), Err(CliError::Marga(_))));
    }

    #[test]
    fn test_bad_file_does_not_abort_others() {
        let dir = TempDir::new().unwrap();
        let good = write_file(
            &dir,
            "good.json",
            r#"{"space": {"type": "grid", "rows": ["...", "..."]}, "start": [0, 0], "goal": [2, 1]}"#,
        );
        let bad = write_file(&dir, "bad.json", "{ not json");
        let missing = dir.path().join("missing.yaml");

        let responses = solve_files(&[good, bad, missing], &MargaConfig::default());
        assert_eq!(responses.len(), 3);

        assert!(responses[0].status);
        assert_eq!(responses[0].message, "Path found");
        let data = responses[0].data.as_ref().unwrap();
        assert_eq!(data.name, "good.json");
        assert!(data.size > 0);

        assert!(!responses[1].status);
        assert!(responses[1].message.contains("bad.json"));
        assert!(responses[1].data.is_none());

        assert!(!responses[2].status);
        assert!(responses[2].message.starts_with("I/O error"));
    }

    #[test]
    fn test_invalid_scenario_is_reported_not_failed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "blocked.yaml",
            "space:\n  type: grid\n  rows: [\"#..\"]\nstart: [0, 0]\ngoal: [2, 0]\n",
        );

        let responses = solve_files(&[path], &MargaConfig::default());
        assert!(responses[0].status);
        assert!(responses[0].message.starts_with("Invalid scenario:"));
    }
}
