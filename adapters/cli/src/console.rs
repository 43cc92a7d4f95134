//! Interactive prompt loop and scenario report printing.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use toy_robot_core::{Direction, GameSettings};
use toy_robot_system_commands::{split_input, CommandProcessor};
use toy_robot_system_scenarios::{
    load_scenarios, parse_scenarios, run_scenarios, Scenario, ScenarioSummary,
};
use toy_robot_world::initialize_game;
use tracing::debug;

const BUNDLED_SCENARIOS: &str =
    include_str!("../../../systems/scenarios/fixtures/scenarios.json");

/// Where the `test` command reads its scenarios from.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ScenarioSource<'a> {
    /// Scenarios compiled into the binary.
    Bundled,
    /// Scenarios read from a JSON file at run time.
    File(&'a Path),
}

impl ScenarioSource<'_> {
    fn load(self) -> Result<Vec<Scenario>> {
        match self {
            Self::Bundled => parse_scenarios(BUNDLED_SCENARIOS).context("bundled scenarios"),
            Self::File(path) => load_scenarios(path)
                .with_context(|| format!("scenario file {}", path.display())),
        }
    }
}

/// Console session bound to one input stream and one output stream.
#[derive(Debug)]
pub(crate) struct Console<'a, W> {
    output: W,
    settings: GameSettings,
    scenarios: ScenarioSource<'a>,
    color: bool,
}

impl<'a, W: Write> Console<'a, W> {
    pub(crate) fn new(
        output: W,
        settings: GameSettings,
        scenarios: ScenarioSource<'a>,
        color: bool,
    ) -> Self {
        Self {
            output,
            settings,
            scenarios,
            color,
        }
    }

    /// Runs the prompt loop until `exit` or end of input.
    pub(crate) fn play<R: BufRead>(&mut self, input: R) -> Result<()> {
        let mut processor = CommandProcessor::new(initialize_game(&self.settings)?);
        let mut robot_placed = false;
        writeln!(self.output, "{}", banner(&self.settings))?;

        let mut lines = input.lines();
        loop {
            write!(self.output, "{}", if robot_placed { "Robot>" } else { "Game>" })?;
            self.output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(self.output)?;
                break;
            };
            let line = line.context("failed to read console input")?;
            let command = line.trim();

            if command.eq_ignore_ascii_case("exit") {
                break;
            }
            if command.eq_ignore_ascii_case("test") {
                if let Err(error) = self.run_tests() {
                    writeln!(self.output, "{error:#}")?;
                }
                continue;
            }

            match processor.process_command(&split_input(command)) {
                Ok(outcome) => {
                    robot_placed = outcome.robot_placed;
                    if !outcome.report.is_empty() {
                        writeln!(self.output, "{}", outcome.report)?;
                    }
                }
                Err(error) => {
                    debug!(%error, command, "command rejected");
                    writeln!(self.output, "{error}")?;
                }
            }
        }
        Ok(())
    }

    /// Replays the configured scenarios and prints one verdict per scenario.
    pub(crate) fn run_tests(&mut self) -> Result<ScenarioSummary> {
        writeln!(self.output, "Running tests..")?;
        let scenarios = self.scenarios.load()?;
        if scenarios.is_empty() {
            writeln!(self.output, "No tests found")?;
            return Ok(ScenarioSummary::default());
        }
        writeln!(self.output, "Found {} tests", scenarios.len())?;

        let summary = run_scenarios(&scenarios, &self.settings);
        for outcome in &summary.outcomes {
            writeln!(
                self.output,
                "Test {}: {}",
                outcome.index,
                self.verdict(outcome.passed)
            )?;
            if !outcome.passed {
                writeln!(
                    self.output,
                    "expected {}, received: {}",
                    outcome.expected, outcome.received
                )?;
            }
        }
        writeln!(
            self.output,
            "{} passed, {} failed",
            summary.passed(),
            summary.failed()
        )?;
        Ok(summary)
    }

    fn verdict(&self, passed: bool) -> String {
        match (passed, self.color) {
            (true, true) => "PASS".green().bold().to_string(),
            (false, true) => "FAIL".red().bold().to_string(),
            (true, false) => "PASS".to_string(),
            (false, false) => "FAIL".to_string(),
        }
    }
}

/// Launch text describing the board and the command set.
pub(crate) fn banner(settings: &GameSettings) -> String {
    let facings: Vec<String> = Direction::ALL
        .iter()
        .map(|direction| direction.name().to_ascii_uppercase())
        .collect();
    let (last, rest) = facings
        .split_last()
        .map_or((String::new(), &[][..]), |(last, rest)| (last.clone(), rest));

    format!(
        "\
**************************************
**                                  **
**          TOY ROBOT GAME          **
**                                  **
**************************************

Place the toy robot (using the command below)
on the {width} x {height} grid to begin the game:

   PLACE X,Y,F
   (X must be between 0 - {max_x}, Y between 0 - {max_y})
   (F is either {rest} or {last})

Once the Robot is placed the following Commands
can be issued to operate the game:

   REPORT - Shows the current status of the toy.
   LEFT   - turns the toy 90 degrees left.
   RIGHT  - turns the toy 90 degrees right.
   MOVE   - Moves the toy 1 unit in the facing direction.
   TEST   - Perform tests based on the test cases provided
   EXIT   - Exits the game.
",
        width = settings.board_width,
        height = settings.board_height,
        max_x = i64::from(settings.board_width) - 1,
        max_y = i64::from(settings.board_height) - 1,
        rest = rest.join(", "),
    )
}
