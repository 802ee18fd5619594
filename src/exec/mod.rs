// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`step`] defines the `Step` value describing one command line.
//! - [`backend`] provides the `CommandRunner` trait and the dry-run runner.
//! - [`process`] is the production runner built on `tokio::process::Command`.
//! - [`tools`] checks that required executables are on `PATH`.

pub mod backend;
pub mod process;
pub mod step;
pub mod tools;

pub use backend::{CommandRunner, DryRunRunner, RunFuture, DRY_RUN_CAPTURE};
pub use process::ProcessRunner;
pub use step::Step;
pub use tools::{ensure_tools, find_missing, resolve_executable};
