#![allow(dead_code, unused_imports)]

pub use fluxci_test_utils::{
    fs_with_all_tools, fs_with_tools, init_tracing, with_timeout, EnvBuilder, FakeRunner, BIN_DIR,
};

/// Short hash the fake `git rev-parse` reports.
pub const FAKE_SHA: &str = "3f9c2ab";

pub const REVISION_LOOKUP: &str = "git rev-parse --short HEAD";

/// Runner whose revision lookup succeeds.
pub fn runner_with_git() -> FakeRunner {
    FakeRunner::new().with_capture(REVISION_LOOKUP, FAKE_SHA)
}
