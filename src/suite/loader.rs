//! Suite discovery and loading.

use super::definition::ScenarioDefinition;
use crate::scenario::Scenario;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SCENARIO_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("Suite directory not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario file {path}: {message}")]
    Parse { path: String, message: String },
}

/// Lists scenario files under `root`, depth first.
///
/// Entries are ordered by file name at each level, so numbered directories
/// and files (`01 Setup/00 Invites/07 Login.yaml`) run in their numeric
/// order. Hidden entries and files named in `ignore` are skipped.
pub fn discover_scenario_files(root: &Path, ignore: &[&str]) -> Result<Vec<PathBuf>, SuiteError> {
    if !root.is_dir() {
        return Err(SuiteError::NotFound(root.display().to_string()));
    }

    let mut files = Vec::new();
    walk(root, ignore, &mut files)?;
    Ok(files)
}

fn walk(dir: &Path, ignore: &[&str], files: &mut Vec<PathBuf>) -> Result<(), SuiteError> {
    let io_err = |source: std::io::Error| SuiteError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.starts_with('.') || ignore.iter().any(|name| *name == file_name) {
            continue;
        }

        if path.is_dir() {
            walk(&path, ignore, files)?;
        } else if is_scenario_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_scenario_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCENARIO_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Parses one scenario file. JSON files go through the YAML parser, which
/// accepts them unchanged.
pub fn load_scenario_file(path: &Path) -> Result<Scenario, SuiteError> {
    let content = fs::read_to_string(path).map_err(|source| SuiteError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let definition: ScenarioDefinition =
        serde_yaml::from_str(&content).map_err(|e| SuiteError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let fallback = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(definition.into_scenario(&fallback))
}

/// Discovers and parses every scenario under `root`, in run order.
pub fn load_suite(root: &Path, ignore: &[&str]) -> Result<Vec<Scenario>, SuiteError> {
    let files = discover_scenario_files(root, ignore)?;
    log::debug!("found {} scenario file(s) under {}", files.len(), root.display());

    files.iter().map(|path| load_scenario_file(path)).collect()
}
