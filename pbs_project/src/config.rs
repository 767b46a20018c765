//! Project configuration (`pbs.toml`).
//!
//! Every field is optional. A missing file means defaults; a file that cannot
//! be read or parsed is reported with `warn!` and defaults are used instead.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "pbs.toml";
pub const DEFAULT_INPUT_DIR: &str = "PBS";
pub const DEFAULT_OUTPUT_DIR: &str = "PBS_export";

/// Where a project keeps its PBS sources and where exports go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory holding the PBS text files, relative to the project root.
    pub input_dir: PathBuf,
    /// Directory exports are written to, relative to the project root.
    pub output_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ProjectConfig {
    pub fn input_path(&self, root: &Path) -> PathBuf {
        root.join(&self.input_dir)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

/// Load `pbs.toml` from `root`, falling back to defaults. Never fails.
pub fn load_config(root: &Path) -> ProjectConfig {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return ProjectConfig::default();
    }
    match try_load_config(&path) {
        Ok(config) => {
            info!("project config loaded from '{}'", path.display());
            config
        },
        Err(e) => {
            warn!("Could not load project config from '{}': {e:#}. Using defaults.", path.display());
            ProjectConfig::default()
        },
    }
}

fn try_load_config(path: &Path) -> Result<ProjectConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing '{}'", path.display()))
}
