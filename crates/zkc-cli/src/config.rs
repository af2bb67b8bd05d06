use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use zkc_merkle::TreeConfig;

/// Tree depth used when neither `--depth` nor the config file sets one.
/// The production depth of 32 needs 2^32 - 1 nodes in memory, far more than
/// a command-line demo should allocate.
pub const DEFAULT_CLI_DEPTH: usize = 16;

/// Settings read from `--config`. Every section is optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub tree: TreeConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig::with_depth(DEFAULT_CLI_DEPTH),
        }
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("parse configuration")
    }

    /// Load from `path`, or fall back to defaults when no file was given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&text)
    }
}
