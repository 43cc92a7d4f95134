#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the toy robot console.

mod cli;
mod config;
mod console;
mod telemetry;

use std::io::{self, IsTerminal};

use anyhow::{bail, Result};
use clap::Parser;

use crate::{
    cli::{Cli, Command},
    config::resolve_settings,
    console::{Console, ScenarioSource},
};

/// Entry point for the toy robot command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log.as_deref());

    let settings = resolve_settings(cli.config.as_deref(), cli.overrides())?;
    tracing::debug!(?settings, "settings resolved");

    let scenarios = cli
        .scenarios
        .as_deref()
        .map_or(ScenarioSource::Bundled, ScenarioSource::File);
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut console = Console::new(stdout.lock(), settings, scenarios, color);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => console.play(io::stdin().lock()),
        Command::Test => {
            let summary = console.run_tests()?;
            if !summary.all_passed() {
                bail!(
                    "{} of {} scenarios failed",
                    summary.failed(),
                    summary.outcomes.len()
                );
            }
            Ok(())
        }
    }
}
