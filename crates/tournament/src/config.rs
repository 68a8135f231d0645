//! Config file loading for the `pods` driver.
//!
//! Config lives at ~/.config/pods/config.toml.
//! All fields are optional; CLI flags override config values.

use anyhow::{bail, Context, Result};
use pod_core::{RunnerConfig, SelectionMode, DEFAULT_INCREASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Coverage target used when neither the CLI nor the config names one
pub const DEFAULT_TARGET: f64 = 0.9;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PodsConfig {
    /// Target coverage grade, as a fraction (0.9) or percentage (90)
    pub target: Option<f64>,
    /// Accept the first "good enough" round instead of the best one
    pub good_enough: Option<bool>,
    /// Grade multiplier a good-enough round has to beat
    pub increase: Option<f64>,
    pub max_rounds: Option<u32>,
    pub max_configurations: Option<u64>,
}

/// Settings given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub target: Option<f64>,
    pub good_enough: bool,
    pub increase: Option<f64>,
    pub max_rounds: Option<u32>,
    pub max_configurations: Option<u64>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# pods configuration
# All values here can be overridden by CLI flags.

# Target average coverage: 0.9 or 90 both mean every player should have
# met 90% of the field on average
# target = 0.9

# Take the first round that raises the grade by `increase` instead of the
# best round
# good_enough = false
# increase = 1.3

# Give up after this many rounds
# max_rounds = 64

# Refuse player counts with more candidate rounds than this
# max_configurations = 2000000
";

impl PodsConfig {
    /// Target grade as a fraction in (0, 1]
    pub fn target_grade(&self, overrides: &RunOverrides) -> Result<f64> {
        match overrides.target.or(self.target) {
            Some(raw) => normalize_target(raw),
            None => Ok(DEFAULT_TARGET),
        }
    }

    /// Runner settings after applying the CLI overrides
    pub fn runner_config(&self, overrides: &RunOverrides) -> Result<RunnerConfig> {
        let defaults = RunnerConfig::default();

        let mode = if overrides.good_enough || self.good_enough.unwrap_or(false) {
            let increase = overrides
                .increase
                .or(self.increase)
                .unwrap_or(DEFAULT_INCREASE);
            if !(increase.is_finite() && increase > 0.0) {
                bail!("increase must be a positive number, got {increase}");
            }
            SelectionMode::GoodEnough { increase }
        } else {
            SelectionMode::Best
        };

        Ok(RunnerConfig {
            mode,
            max_rounds: overrides
                .max_rounds
                .or(self.max_rounds)
                .unwrap_or(defaults.max_rounds),
            max_configurations: overrides
                .max_configurations
                .or(self.max_configurations)
                .unwrap_or(defaults.max_configurations),
        })
    }
}

/// Accept a fraction in (0, 1] or a percentage in (1, 100].
pub fn normalize_target(raw: f64) -> Result<f64> {
    let target = if raw > 1.0 { raw / 100.0 } else { raw };
    if !(target > 0.0 && target <= 1.0) {
        bail!("target grade must be a fraction in (0, 1] or a percentage in (1, 100], got {raw}");
    }
    Ok(target)
}

/// Returns the default config path: ~/.config/pods/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("pods").join("config.toml"))
}

/// Load config from a file path. Returns the default (all None) if the file
/// doesn't exist.
pub fn load_config(path: &Path) -> Result<PodsConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PodsConfig::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read config at {}", path.display())),
    }
}

/// Write the commented default config to `path`. Errors if it already exists.
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

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
