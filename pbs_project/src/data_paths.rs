//! Resolving a project's input/output directories and finding schema files.

use anyhow::{Context, Result, bail};
use log::debug;
use pbs_format::Schema;
use pbs_format::multi_file::{belongs_to, order_source_names};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;

/// Input and output directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ProjectPaths {
    /// Resolve directories from `config`, with `output` overriding the
    /// configured export directory.
    ///
    /// # Errors
    /// Fails when the output directory is the input directory.
    pub fn resolve(root: &Path, config: &ProjectConfig, output: Option<&Path>) -> Result<Self> {
        let input = config.input_path(root);
        let output = match output {
            Some(dir) => dir.to_path_buf(),
            None => config.output_path(root),
        };
        if same_dir(&input, &output) {
            bail!("refusing to export into the input directory '{}'", input.display());
        }
        Ok(Self { input, output })
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    let norm = |p: &Path| fs::canonicalize(p).or_else(|_| std::path::absolute(p)).unwrap_or_else(|_| p.to_path_buf());
    norm(a) == norm(b)
}

/// File names directly inside `dir`, skipping anything that is not a file.
fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing '{}'", dir.display()))? {
        let entry = entry.with_context(|| format!("listing '{}'", dir.display()))?;
        if entry.file_type().is_ok_and(|t| t.is_file())
            && let Some(name) = entry.file_name().to_str()
        {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Paths of every file of `schema` in `dir`, primary first. A missing
/// directory yields no files.
pub fn schema_files(dir: &Path, schema: Schema) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        debug!("'{}' does not exist; no {schema} files", dir.display());
        return Ok(Vec::new());
    }
    let names = file_names(dir)?;
    Ok(order_source_names(schema, &names).into_iter().map(|name| dir.join(name)).collect())
}

/// Schemas with at least one file in `dir`.
pub fn discover_schemas(dir: &Path) -> Result<Vec<Schema>> {
    let names = file_names(dir)?;
    Ok(Schema::ALL
        .into_iter()
        .filter(|schema| names.iter().any(|name| belongs_to(*schema, name)))
        .collect())
}
