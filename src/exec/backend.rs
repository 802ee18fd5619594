// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The pipeline talks to a `CommandRunner` instead of spawning processes
//! itself. This makes it easy to swap in a fake runner in tests while keeping
//! the production implementation in [`super::process`].
//!
//! - `ProcessRunner` spawns real processes.
//! - `DryRunRunner` only prints what would run.
//! - Tests provide their own runner that records steps and can be told to
//!   fail a particular one.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::errors::Result;

use super::Step;

/// Boxed future returned by [`CommandRunner`] methods.
pub type RunFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Placeholder substituted for captured output in dry runs.
pub const DRY_RUN_CAPTURE: &str = "<git-sha>";

/// Trait abstracting how pipeline steps are executed.
pub trait CommandRunner: Send + Sync {
    /// Run the step with output streamed to the terminal.
    ///
    /// A non-zero exit must be reported as
    /// [`crate::errors::PipelineError::CommandFailed`].
    fn run<'a>(&'a self, step: &'a Step) -> RunFuture<'a, ()>;

    /// Run the step and return its trimmed stdout.
    fn capture<'a>(&'a self, step: &'a Step) -> RunFuture<'a, String>;
}

/// Runner used by `--dry-run`: prints each step and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    fn run<'a>(&'a self, step: &'a Step) -> RunFuture<'a, ()> {
        Box::pin(async move {
            println!("[dry-run] {step}");
            Ok(())
        })
    }

    fn capture<'a>(&'a self, step: &'a Step) -> RunFuture<'a, String> {
        Box::pin(async move {
            println!("[dry-run] {step}");
            debug!(command = %step, "dry-run capture returns placeholder");
            Ok(DRY_RUN_CAPTURE.to_string())
        })
    }
}
