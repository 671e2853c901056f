// src/config/env.rs

//! Child-process environment construction.
//!
//! The child environment is built exactly once per engine construction:
//! inherited process environment, then the project-local executable
//! directory (`<cwd>/node_modules/.bin`) prepended to the search path, then
//! the caller's overrides on top. Overrides win on every collision,
//! including the search-path entry itself.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Name of the executable search-path variable on this platform.
pub fn search_path_var() -> &'static str {
    if cfg!(windows) { "Path" } else { "PATH" }
}

fn search_path_delimiter() -> char {
    if cfg!(windows) { ';' } else { ':' }
}

/// Project-local executable directory prepended to the search path, relative
/// to the process working directory (not the per-command `cwd` template).
pub fn local_bin_dir(project_root: &Path) -> PathBuf {
    project_root.join("node_modules").join(".bin")
}

/// Snapshot of the ambient process state the engine depends on.
///
/// Captured once when options are resolved and never re-read mid-sequence,
/// so every command of every item sees the same working directory and
/// environment regardless of what the host process does meanwhile.
#[derive(Debug, Clone)]
pub struct AmbientEnv {
    pub cwd: PathBuf,
    pub vars: BTreeMap<String, String>,
}

impl AmbientEnv {
    /// Capture the current working directory and environment.
    ///
    /// Variables with non-UTF-8 names or values are skipped; they cannot be
    /// merged into the string-keyed environment map or templated.
    pub fn capture() -> Result<Self> {
        let cwd = std::env::current_dir()?;

        let vars = std::env::vars_os()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                let value = value.into_string().ok()?;
                Some((name, value))
            })
            .collect();

        Ok(Self { cwd, vars })
    }
}

/// Build the complete child environment.
///
/// Pure function of its inputs: ambient variables, the project root used for
/// the local-bin prepend, and the caller's overrides. If the ambient
/// environment has no search-path variable the entry becomes just the
/// local-bin directory.
pub fn build_env(
    ambient: &BTreeMap<String, String>,
    project_root: &Path,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut env = ambient.clone();

    let var = search_path_var();
    let bin = local_bin_dir(project_root).to_string_lossy().into_owned();
    let search_path = match ambient.get(var) {
        Some(existing) => format!("{bin}{}{existing}", search_path_delimiter()),
        None => bin,
    };
    env.insert(var.to_string(), search_path);

    for (name, value) in overrides {
        env.insert(name.clone(), value.clone());
    }

    env
}
