// src/env/mod.rs

//! Environment variable access.
//!
//! Configuration and tool lookup read variables through [`Environment`]
//! rather than `std::env`, so tests can supply a [`MapEnvironment`] and the
//! CLI can layer a dotenv file under the real process environment.

use std::fmt::Debug;
use std::path::Path;

use tracing::debug;

use crate::errors::{PipelineError, Result};
use crate::fs::FileSystem;

pub mod mock;

pub use mock::MapEnvironment;

/// Name of the dotenv file picked up from the repository root.
pub const DEFAULT_ENV_FILE: &str = ".env";

pub trait Environment: Send + Sync + Debug {
    /// Raw lookup. `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Lookup that treats an empty value the same as an unset one.
    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Variables only ever read from the process, never from a dotenv file.
/// Tool lookup must see the same `PATH` the spawned children inherit.
pub const PROCESS_ONLY_VARS: [&str; 2] = ["PATH", "PATHEXT"];

/// Process environment with values from a dotenv file underneath.
///
/// A variable set in the process always wins over the file, and
/// [`PROCESS_ONLY_VARS`] are never taken from the file.
#[derive(Debug)]
pub struct LayeredEnvironment<P: Environment> {
    primary: P,
    fallback: MapEnvironment,
}

impl<P: Environment> LayeredEnvironment<P> {
    pub fn new(primary: P, fallback: MapEnvironment) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Environment> Environment for LayeredEnvironment<P> {
    fn var(&self, key: &str) -> Option<String> {
        let value = self.primary.var(key);
        if PROCESS_ONLY_VARS.contains(&key) {
            return value;
        }
        value.or_else(|| self.fallback.var(key))
    }
}

/// Parse a dotenv file into a [`MapEnvironment`] without touching the
/// process environment.
pub fn load_env_file(fs: &dyn FileSystem, path: &Path) -> Result<MapEnvironment> {
    let reader = fs.open_read(path)?;
    let mut vars = MapEnvironment::new();
    for item in dotenvy::from_read_iter(reader) {
        let (key, value) = item.map_err(|source| PipelineError::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        vars.set(key, value);
    }
    debug!(path = %path.display(), count = vars.len(), "loaded env file");
    Ok(vars)
}

/// Build the environment used for a run.
///
/// - An explicit `env_file` must exist.
/// - Otherwise `<repo_root>/.env` is used if present, and silently skipped
///   if not.
pub fn build_environment(
    fs: &dyn FileSystem,
    repo_root: &Path,
    env_file: Option<&Path>,
) -> Result<LayeredEnvironment<ProcessEnvironment>> {
    let file_vars = match env_file {
        Some(path) => load_env_file(fs, path)?,
        None => {
            let default_path = repo_root.join(DEFAULT_ENV_FILE);
            if fs.is_file(&default_path) {
                load_env_file(fs, &default_path)?
            } else {
                MapEnvironment::new()
            }
        }
    };
    Ok(LayeredEnvironment::new(ProcessEnvironment, file_vars))
}
