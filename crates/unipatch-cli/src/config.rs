use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use unipatch_diff::{DiffConfig, PatchResult};

use crate::cli::{ColorChoice, DiffArgs, OutputFormat};

/// Settings read from the `--config` TOML file.
///
/// ```toml
/// [diff]
/// context_lines = 5
/// interhunk_lines = 1
///
/// [output]
/// color = "never"
/// format = "json"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub diff: DiffSettings,
    pub output: OutputSettings,
}

/// Signed so that a negative count in the file fails validation instead of
/// failing to parse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSettings {
    pub context_lines: Option<i64>,
    pub interhunk_lines: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub color: ColorChoice,
    pub format: OutputFormat,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Engine options for one invocation. Command-line flags win over the file.
    pub fn diff_config(&self, args: &DiffArgs) -> PatchResult<DiffConfig> {
        let context = args
            .context
            .or(self.diff.context_lines)
            .unwrap_or(i64::from(DiffConfig::DEFAULT_CONTEXT_LINES));
        let interhunk = args
            .inter_hunk_context
            .or(self.diff.interhunk_lines)
            .unwrap_or(0);
        DiffConfig::with_context_lines(context)?.with_interhunk_lines(interhunk)
    }
}
