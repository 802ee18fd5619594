// src/exec/process.rs

//! Real process runner over `tokio::process`.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::errors::{PipelineError, Result};

use super::backend::{CommandRunner, RunFuture};
use super::Step;

/// Runs steps as child processes, one at a time.
///
/// `interrupt` flips to `true` when Ctrl-C is received. A running child is
/// killed and the step fails with [`PipelineError::Interrupted`]; once set,
/// no further step is started.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    repo_root: PathBuf,
    interrupt: watch::Receiver<bool>,
}

impl ProcessRunner {
    pub fn new(repo_root: impl Into<PathBuf>, interrupt: watch::Receiver<bool>) -> Self {
        Self {
            repo_root: repo_root.into(),
            interrupt,
        }
    }

    fn ensure_not_interrupted(&self) -> Result<()> {
        if *self.interrupt.borrow() {
            return Err(PipelineError::Interrupted);
        }
        Ok(())
    }

    fn command_for(&self, step: &Step) -> Command {
        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args)
            .current_dir(step.working_dir(&self.repo_root))
            .kill_on_drop(true);
        cmd
    }

    async fn run_inner(&self, step: &Step) -> Result<()> {
        self.ensure_not_interrupted()?;

        println!("\n[cmd] {step}");
        info!(command = %step, "starting process");

        let mut child = self
            .command_for(step)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| PipelineError::Spawn {
                command: step.to_string(),
                source,
            })?;

        let mut interrupt = self.interrupt.clone();

        tokio::select! {
            biased;

            _ = wait_for_interrupt(&mut interrupt) => {
                warn!(command = %step, "interrupt received; killing process");
                if let Err(e) = child.kill().await {
                    warn!(command = %step, error = %e, "failed to kill child process");
                }
                Err(PipelineError::Interrupted)
            }

            status = child.wait() => {
                let status = status?;
                check_status(step, status)
            }
        }
    }

    async fn capture_inner(&self, step: &Step) -> Result<String> {
        self.ensure_not_interrupted()?;
        debug!(command = %step, "capturing process output");

        let child = self
            .command_for(step)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PipelineError::Spawn {
                command: step.to_string(),
                source,
            })?;

        let mut interrupt = self.interrupt.clone();

        let output = tokio::select! {
            biased;

            _ = wait_for_interrupt(&mut interrupt) => None,
            output = child.wait_with_output() => Some(output?),
        };
        let Some(output) = output else {
            return Err(PipelineError::Interrupted);
        };

        check_status(step, output.status)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(&'a self, step: &'a Step) -> RunFuture<'a, ()> {
        Box::pin(self.run_inner(step))
    }

    fn capture<'a>(&'a self, step: &'a Step) -> RunFuture<'a, String> {
        Box::pin(self.capture_inner(step))
    }
}

/// Resolve once the interrupt flag is set. Never resolves if the sender is
/// gone without having set it.
async fn wait_for_interrupt(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

fn check_status(step: &Step, status: ExitStatus) -> Result<()> {
    if killed_by_sigint(&status) {
        return Err(PipelineError::Interrupted);
    }

    let code = status.code().unwrap_or(-1);
    info!(
        command = %step,
        exit_code = code,
        success = status.success(),
        "process exited"
    );

    if status.success() {
        Ok(())
    } else {
        Err(PipelineError::CommandFailed {
            command: step.to_string(),
            code,
        })
    }
}

// The terminal delivers SIGINT to the whole foreground group, so the child
// can die from it before our own listener fires.
#[cfg(unix)]
fn killed_by_sigint(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(2)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: &ExitStatus) -> bool {
    false
}
