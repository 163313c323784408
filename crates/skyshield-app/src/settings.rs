//! Loading tuning config from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use skyshield_core::config::GameConfig;

/// Load and validate a JSON config file, or the built-in defaults when no
/// path is given. Fields missing from the file keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    GameConfig::from_json(&contents)
        .with_context(|| format!("invalid config at {}", path.display()))
}
