//! Game settings resolution: command-line flags over TOML file over defaults.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use toy_robot_core::GameSettings;

/// Settings supplied as individual command-line flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SettingsOverrides {
    pub(crate) board_width: Option<i32>,
    pub(crate) board_height: Option<i32>,
    pub(crate) robot_limit: Option<usize>,
}

impl SettingsOverrides {
    fn apply(self, mut settings: GameSettings) -> GameSettings {
        if let Some(width) = self.board_width {
            settings.board_width = width;
        }
        if let Some(height) = self.board_height {
            settings.board_height = height;
        }
        if let Some(limit) = self.robot_limit {
            settings.robot_limit = limit;
        }
        settings
    }
}

/// Loads the optional settings file and layers the flag overrides on top.
pub(crate) fn resolve_settings(
    config: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<GameSettings> {
    let base = match config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file {}", path.display()))?;
            parse_settings(&contents)
                .with_context(|| format!("invalid settings file {}", path.display()))?
        }
        None => GameSettings::default(),
    };
    Ok(overrides.apply(base))
}

/// Parses a TOML settings document; absent keys keep their defaults.
pub(crate) fn parse_settings(contents: &str) -> Result<GameSettings> {
    toml::from_str(contents).context("failed to parse settings toml contents")
}
