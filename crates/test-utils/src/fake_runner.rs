use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fluxci::errors::PipelineError;
use fluxci::exec::{CommandRunner, RunFuture, Step};

/// Exit status reported for a capture nobody configured, matching what `git`
/// returns outside a repository.
pub const UNCONFIGURED_CAPTURE_CODE: i32 = 128;

/// A fake runner that:
/// - records every step passed to `run` and `capture`, in order
/// - fails `run` for steps registered with [`FakeRunner::fail_on`]
/// - answers `capture` from [`FakeRunner::with_capture`]
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<Step>>>,
    captured: Arc<Mutex<Vec<Step>>>,
    failures: HashMap<String, i32>,
    captures: HashMap<String, String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the step whose command line renders as `command` exit with `code`.
    pub fn fail_on(mut self, command: &str, code: i32) -> Self {
        self.failures.insert(command.to_string(), code);
        self
    }

    /// Answer `capture` of `command` with `stdout`.
    pub fn with_capture(mut self, command: &str, stdout: &str) -> Self {
        self.captures.insert(command.to_string(), stdout.to_string());
        self
    }

    /// Command lines passed to `run`, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Command lines passed to `capture`, in order.
    pub fn captured(&self) -> Vec<String> {
        self.captured
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(&'a self, step: &'a Step) -> RunFuture<'a, ()> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(step.clone());

            let command = step.to_string();
            match self.failures.get(&command) {
                Some(&code) => Err(PipelineError::CommandFailed { command, code }),
                None => Ok(()),
            }
        })
    }

    fn capture<'a>(&'a self, step: &'a Step) -> RunFuture<'a, String> {
        Box::pin(async move {
            self.captured.lock().unwrap().push(step.clone());

            let command = step.to_string();
            match self.captures.get(&command) {
                Some(stdout) => Ok(stdout.trim().to_string()),
                None => Err(PipelineError::CommandFailed {
                    command,
                    code: UNCONFIGURED_CAPTURE_CODE,
                }),
            }
        })
    }
}
