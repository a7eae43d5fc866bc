//! End-to-end computation: validate, inflate, search, refine, assemble.

use std::time::Instant;

use log::{debug, warn};

use crate::clearance;
use crate::config::MargaConfig;
use crate::error::ScenarioError;
use crate::nav::{self, NavModel};
use crate::pathfinding::{find_path, refine};
use crate::report::{assemble, PathReport};
use crate::scenario::{NodeRef, Scenario};

/// Solve a scenario, folding structural problems into the report.
///
/// Never fails: invalid scenarios produce an `InvalidScenario` report whose
/// elapsed time is the validation time.
pub fn solve(scenario: &Scenario, config: &MargaConfig) -> PathReport {
    let timer = Instant::now();
    match prepare(scenario, config) {
        Ok(model) => run(&model, scenario, config),
        Err(e) => {
            warn!("[Pipeline] Rejected scenario: {}", e);
            PathReport::invalid(&e, elapsed_ms(timer)).with_grouping(scenario.grouping_enabled())
        }
    }
}

/// Solve a scenario, returning structural problems as errors
pub fn try_solve(scenario: &Scenario, config: &MargaConfig) -> Result<PathReport, ScenarioError> {
    let model = prepare(scenario, config)?;
    Ok(run(&model, scenario, config))
}

/// Build the model and apply clearance inflation.
///
/// An out-of-range diagonal cost in an unvalidated config is clamped into
/// [1, 2] so the octile heuristic never overestimates.
pub fn prepare(scenario: &Scenario, config: &MargaConfig) -> Result<NavModel, ScenarioError> {
    let movement = scenario
        .options
        .movement
        .unwrap_or(config.search.movement);
    let diagonal_cost = config.search.admissible_diagonal_cost();
    if diagonal_cost != config.search.diagonal_cost {
        warn!(
            "[Pipeline] diagonal_cost {} outside [1, 2], using {}",
            config.search.diagonal_cost, diagonal_cost
        );
    }
    let model = nav::build(scenario, movement, diagonal_cost)?;
    clearance::apply(model, scenario.effective_radius())
}

fn run(model: &NavModel, scenario: &Scenario, config: &MargaConfig) -> PathReport {
    let outcome = find_path(model, model.start(), model.goal());

    let mut refine_config = config.refine.to_refine_config();
    if let Some(line_of_sight) = scenario.options.line_of_sight {
        refine_config.line_of_sight = line_of_sight;
    }
    let refined = refine(&outcome.path, model, &refine_config);

    debug!(
        "[Pipeline] {} raw nodes, {} waypoints, {} expanded in {:.3} ms",
        outcome.path.len(),
        refined.len(),
        outcome.nodes_expanded,
        outcome.elapsed_ms
    );

    let to_refs = |path: &[nav::NodeIndex]| -> Vec<NodeRef> {
        path.iter().map(|&i| model.node_ref(i)).collect()
    };
    assemble(to_refs(&outcome.path), to_refs(&refined), outcome.elapsed_ms)
        .with_search_stats(outcome.cost, outcome.nodes_expanded)
        .with_grouping(scenario.grouping_enabled())
}

fn elapsed_ms(timer: Instant) -> f64 {
    timer.elapsed().as_secs_f64() * 1000.0
}
