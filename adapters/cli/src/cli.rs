//! Command-line surface parsed with clap's derive API.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::SettingsOverrides;

/// Toy robot simulator
///
/// Places a robot on a square table top and drives it with PLACE, MOVE,
/// LEFT, RIGHT and REPORT commands.
#[derive(Parser, Debug)]
#[command(name = "toy-robot")]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Set log level written to stderr
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub(crate) log: Option<String>,

    /// Read game settings from a TOML file
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long, global = true)]
    pub(crate) width: Option<i32>,

    /// Board height in cells
    #[arg(long, global = true)]
    pub(crate) height: Option<i32>,

    /// Maximum number of robots on the board
    #[arg(long, global = true)]
    pub(crate) robots: Option<usize>,

    /// Scenario file replayed by `test` (defaults to the bundled scenarios)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) scenarios: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

impl Cli {
    /// Settings given directly on the command line.
    pub(crate) fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            board_width: self.width,
            board_height: self.height,
            robot_limit: self.robots,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Play interactively on stdin and stdout (default)
    Play,

    /// Replay the scenario file and exit non-zero if any scenario fails
    Test,
}
