//! Reading and writing record sets on disk.
//!
//! [`RecordSetReader`] and [`RecordSetWriter`] are the seams the rest of the
//! crate talks to; [`FsStore`] implements both over a project's input and
//! output directories.

use anyhow::{Context, Result};
use log::info;
use pbs_data::RecordSet;
use pbs_format::{OutputFile, Schema, SourceFile, merge_sources};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::data_paths::{ProjectPaths, schema_files};

/// Source of merged record sets.
pub trait RecordSetReader {
    /// Load every file of `schema`, merged and tagged with its source file.
    fn read(&self, schema: Schema) -> Result<RecordSet>;
}

/// Destination for exported files.
pub trait RecordSetWriter {
    /// Write `files` in order, returning the paths written.
    fn write(&self, schema: Schema, files: &[OutputFile]) -> Result<Vec<PathBuf>, PartialWriteError>;
}

/// A multi-file write that stopped partway. Files already written stay on disk.
#[derive(Debug, Error)]
#[error("wrote {} file(s) before failing on '{}'", .written.len(), .failed.display())]
pub struct PartialWriteError {
    pub written: Vec<PathBuf>,
    pub failed: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Plain-directory store: reads from the input directory, writes to the
/// output directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    paths: ProjectPaths,
}

impl FsStore {
    pub fn new(paths: ProjectPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }
}

impl RecordSetReader for FsStore {
    fn read(&self, schema: Schema) -> Result<RecordSet> {
        let mut sources = Vec::new();
        for path in schema_files(&self.paths.input, schema)? {
            let text = fs::read_to_string(&path).with_context(|| format!("reading '{}'", path.display()))?;
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();
            sources.push(SourceFile { name, text });
        }
        if sources.is_empty() {
            info!("no {schema} files under '{}'", self.paths.input.display());
        }
        Ok(merge_sources(schema, &sources))
    }
}

impl RecordSetWriter for FsStore {
    fn write(&self, schema: Schema, files: &[OutputFile]) -> Result<Vec<PathBuf>, PartialWriteError> {
        let dir = &self.paths.output;
        let mut written = Vec::with_capacity(files.len());
        if let Err(source) = fs::create_dir_all(dir) {
            return Err(PartialWriteError {
                written,
                failed: dir.clone(),
                source,
            });
        }
        for file in files {
            let path = dir.join(&file.name);
            if !is_bare_file_name(&file.name) {
                return Err(PartialWriteError {
                    written,
                    failed: path,
                    source: io::Error::new(io::ErrorKind::InvalidInput, "output name must be a bare file name"),
                });
            }
            if let Err(source) = fs::write(&path, &file.contents) {
                return Err(PartialWriteError {
                    written,
                    failed: path,
                    source,
                });
            }
            written.push(path);
        }
        info!("{schema}: wrote {} file(s) to '{}'", written.len(), dir.display());
        Ok(written)
    }
}

/// A single plain path component, so joining it stays inside the directory.
fn is_bare_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bare_names_are_writable() {
        assert!(is_bare_file_name("abilities.txt"));
        assert!(!is_bare_file_name("../PBS/abilities.txt"));
        assert!(!is_bare_file_name("/etc/abilities.txt"));
        assert!(!is_bare_file_name("sub/abilities.txt"));
        assert!(!is_bare_file_name(".."));
        assert!(!is_bare_file_name(""));
    }

    #[test]
    fn escaping_name_is_refused_before_writing() {
        let root = tempfile::tempdir().unwrap();
        let store = FsStore::new(ProjectPaths {
            input: root.path().join("PBS"),
            output: root.path().join("out"),
        });
        let files = vec![
            OutputFile {
                name: "abilities.txt".into(),
                contents: "a".into(),
            },
            OutputFile {
                name: "../PBS/abilities.txt".into(),
                contents: "b".into(),
            },
        ];
        let err = store.write(Schema::Abilities, &files).unwrap_err();
        assert_eq!(err.written, vec![root.path().join("out/abilities.txt")]);
        assert_eq!(err.source.kind(), io::ErrorKind::InvalidInput);
        assert!(!root.path().join("PBS/abilities.txt").exists());
    }
}
