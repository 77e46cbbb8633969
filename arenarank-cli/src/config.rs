/// Config file loading and creation for the arenarank CLI.
///
/// Config lives at ~/.config/arenarank/config.toml.
/// All fields are optional — CLI args override config values.
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ArenarankConfig {
    pub max_iterations: Option<usize>,
    pub convergence_threshold: Option<f64>,
    pub limit: Option<usize>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# arenarank configuration
# All values here can be overridden by CLI flags.

# Maximum Bradley-Terry sweeps before giving up on convergence
# max_iterations = 200

# Stop once no strength moves by more than this in one sweep
# convergence_threshold = 0.0001

# Leaderboard rows to print (omit for all)
# limit = 20
";

/// Returns the default config path: ~/.config/arenarank/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("arenarank").join("config.toml"))
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> Result<ArenarankConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ArenarankConfig::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read config at {}", path.display())),
    }
}

fn parse_config(content: &str) -> Result<ArenarankConfig> {
    Ok(toml::from_str(content)?)
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config to {}", path.display()))
}
