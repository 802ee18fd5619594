use std::fmt;

/// A named block of steps inside a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Local,
    Submit,
    Deploy,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Local => "local",
            Phase::Submit => "submit",
            Phase::Deploy => "deploy",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `gcloud builds submit` waits for the remote build.
///
/// - `Wait`: stream the build log and return when the build finishes (default).
/// - `Async`: queue the build and return immediately (`--async`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    #[default]
    Wait,
    Async,
}

impl From<bool> for SubmitMode {
    fn from(async_mode: bool) -> Self {
        if async_mode {
            SubmitMode::Async
        } else {
            SubmitMode::Wait
        }
    }
}

/// What to do when a required executable is not on `PATH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolPolicy {
    /// Abort before any command runs.
    #[default]
    Enforce,
    /// Log a warning and continue; used by `--dry-run`.
    WarnOnly,
}
