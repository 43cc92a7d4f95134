#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scripted scenario runner that replays command lists against fresh games.
//!
//! Each scenario gets its own coordinator and command session. The final
//! `REPORT` output, or the message of the first rejected command, is compared
//! with the expected text.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;
use toy_robot_core::GameSettings;
use toy_robot_system_commands::{split_input, CommandError, CommandProcessor};
use toy_robot_world::{initialize_game, RobotCoordinator};
use tracing::info;

/// Ordered command lines paired with the text the game should finish on.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Scenario {
    /// Raw command lines, tokenized the same way as console input.
    pub actions: Vec<String>,
    /// Final report line or error message the scenario should produce.
    pub expected_result: String,
}

/// Failures while loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("failed to read scenarios: {0}")]
    Io(#[from] io::Error),
    /// The scenario file is not a JSON array of scenarios.
    #[error("failed to parse scenarios: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result of replaying one scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// One-based position of the scenario in its file.
    pub index: usize,
    /// Text the scenario expected.
    pub expected: String,
    /// Text the game produced.
    pub received: String,
    /// Whether `received` matched `expected` exactly.
    pub passed: bool,
}

/// Outcomes of a whole scenario file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScenarioSummary {
    /// Per-scenario outcomes in file order.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl ScenarioSummary {
    /// Number of scenarios that matched their expectation.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed).count()
    }

    /// Number of scenarios that did not.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Reports whether every scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }
}

/// Reads and parses a scenario file.
pub fn load_scenarios(path: impl AsRef<Path>) -> Result<Vec<Scenario>, ScenarioError> {
    let contents = fs::read_to_string(path)?;
    parse_scenarios(&contents)
}

/// Parses a JSON array of scenarios.
pub fn parse_scenarios(json: &str) -> Result<Vec<Scenario>, ScenarioError> {
    Ok(serde_json::from_str(json)?)
}

/// Replays one scenario against a game built from `settings`.
///
/// `index` is carried into the outcome unchanged.
#[must_use]
pub fn run_scenario(index: usize, scenario: &Scenario, settings: &GameSettings) -> ScenarioOutcome {
    let received = match replay(scenario, settings) {
        Ok(report) => report,
        Err(message) => message,
    };
    let passed = received == scenario.expected_result;
    info!(index, passed, "scenario finished");

    ScenarioOutcome {
        index,
        expected: scenario.expected_result.clone(),
        received,
        passed,
    }
}

/// Replays every scenario in order, numbering them from one.
#[must_use]
pub fn run_scenarios(scenarios: &[Scenario], settings: &GameSettings) -> ScenarioSummary {
    let outcomes = scenarios
        .iter()
        .enumerate()
        .map(|(offset, scenario)| run_scenario(offset + 1, scenario, settings))
        .collect();
    ScenarioSummary { outcomes }
}

fn replay(scenario: &Scenario, settings: &GameSettings) -> Result<String, String> {
    let coordinator = initialize_game(settings).map_err(|error| error.to_string())?;
    let mut processor = CommandProcessor::new(coordinator);
    drive(&mut processor, &scenario.actions).map_err(|error| error.to_string())
}

fn drive<C: RobotCoordinator>(
    processor: &mut CommandProcessor<C>,
    actions: &[String],
) -> Result<String, CommandError> {
    for action in actions {
        let _ = processor.process_command(&split_input(action))?;
    }
    Ok(processor.process_command(&["report"])?.report)
}
