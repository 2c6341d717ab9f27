//! Generator configuration
//!
//! Precedence (lowest first): built-in defaults, JSON config file, CLI flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::config::CONFIG_FILE;
use crate::dialect::LineEnding;
use crate::error::{FixtureError, Result};

/// Where the world-time frame is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WorldTimeTarget {
    /// Overwrite `changing_type.csv` with `timestamp,count`
    #[default]
    ChangingType,
    /// Keep the spliced `changing_type.csv` and write `world_time.csv`
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory the fixtures are written to
    pub out_dir: PathBuf,
    pub line_ending: LineEnding,
    pub world_time_target: WorldTimeTarget,
    /// Restrict the run to these fixture ids or file names; empty means all
    pub only: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            line_ending: LineEnding::default(),
            world_time_target: WorldTimeTarget::default(),
            only: Vec::new(),
        }
    }
}

/// CLI-level overrides; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub out_dir: Option<PathBuf>,
    pub line_ending: Option<LineEnding>,
    pub world_time_target: Option<WorldTimeTarget>,
    pub only: Vec<String>,
}

impl GeneratorConfig {
    /// Parse a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| {
            FixtureError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Explicit file if given, else `csv-fixtures.json` in `cwd` when present, else defaults
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config file");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(out_dir) = overrides.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(line_ending) = overrides.line_ending {
            self.line_ending = line_ending;
        }
        if let Some(target) = overrides.world_time_target {
            self.world_time_target = target;
        }
        if !overrides.only.is_empty() {
            self.only = overrides.only;
        }
        self
    }
}
