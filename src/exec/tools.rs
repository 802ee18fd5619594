// src/exec/tools.rs

//! `PATH` lookup for the executables a phase needs.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::Environment;
use crate::errors::{PipelineError, Result};
use crate::fs::FileSystem;

const DEFAULT_PATHEXT: &str = ".EXE;.CMD;.BAT;.COM";

/// Resolve `name` the way a shell would, returning the first match.
///
/// Names containing a path separator are checked as-is.
pub fn resolve_executable(
    name: &str,
    env: &dyn Environment,
    fs: &dyn FileSystem,
) -> Option<PathBuf> {
    let extensions = candidate_extensions(env);

    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        return first_executable(Path::new(name), &extensions, fs);
    }

    let path_var = env.var("PATH")?;
    std::env::split_paths(&OsString::from(path_var))
        .filter(|dir| !dir.as_os_str().is_empty())
        .find_map(|dir| first_executable(&dir.join(name), &extensions, fs))
}

/// Names from `tools` that cannot be resolved, in the order given.
pub fn find_missing(tools: &[&str], env: &dyn Environment, fs: &dyn FileSystem) -> Vec<String> {
    tools
        .iter()
        .filter(|tool| resolve_executable(tool, env, fs).is_none())
        .map(|tool| tool.to_string())
        .collect()
}

/// Fail with a single error naming every missing tool.
pub fn ensure_tools(tools: &[&str], env: &dyn Environment, fs: &dyn FileSystem) -> Result<()> {
    let missing = find_missing(tools, env, fs);
    if missing.is_empty() {
        debug!(?tools, "all required executables found");
        Ok(())
    } else {
        Err(PipelineError::MissingTools(missing))
    }
}

fn first_executable(base: &Path, extensions: &[String], fs: &dyn FileSystem) -> Option<PathBuf> {
    if fs.is_executable(base) {
        return Some(base.to_path_buf());
    }
    extensions.iter().find_map(|ext| {
        let mut candidate = base.as_os_str().to_os_string();
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        fs.is_executable(&candidate).then_some(candidate)
    })
}

fn candidate_extensions(env: &dyn Environment) -> Vec<String> {
    if !cfg!(windows) {
        return Vec::new();
    }
    env.non_empty_var("PATHEXT")
        .unwrap_or_else(|| DEFAULT_PATHEXT.to_string())
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_string())
        .collect()
}
