// tests/tool_check.rs

mod common;
use crate::common::{fs_with_tools, EnvBuilder, BIN_DIR};

use std::path::PathBuf;

use fluxci::errors::PipelineError;
use fluxci::exec::{ensure_tools, find_missing, resolve_executable};
use fluxci::fs::mock::MockFileSystem;

#[test]
fn all_tools_present_passes() {
    let env = EnvBuilder::new().path(BIN_DIR).build();
    let fs = fs_with_tools(&["gcloud", "kubectl"]);

    ensure_tools(&["gcloud", "kubectl"], &env, &fs).unwrap();
}

#[test]
fn one_missing_tool_is_reported_alone() {
    let env = EnvBuilder::new().path(BIN_DIR).build();
    let fs = fs_with_tools(&["gcloud"]);

    let err = ensure_tools(&["gcloud", "kubectl"], &env, &fs).unwrap_err();

    match err {
        PipelineError::MissingTools(names) => assert_eq!(names, vec!["kubectl".to_string()]),
        other => panic!("Expected MissingTools, got: {:?}", other),
    }
}

#[test]
fn every_missing_tool_is_listed_in_request_order() {
    let env = EnvBuilder::new().path(BIN_DIR).build();
    let fs = fs_with_tools(&["npx"]);

    let err = ensure_tools(&["npm", "npx", "kubectl"], &env, &fs).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Missing required executables: npm, kubectl. Install them and retry."
    );
}

#[test]
fn unset_path_means_nothing_resolves() {
    let env = EnvBuilder::new().build();
    let fs = fs_with_tools(&["npm"]);

    assert_eq!(find_missing(&["npm"], &env, &fs), vec!["npm".to_string()]);
}

#[cfg(unix)]
#[test]
fn later_path_entries_are_searched() {
    let env = EnvBuilder::new().path("/opt/empty:/usr/bin").build();
    let fs = MockFileSystem::new();
    fs.add_executable("/usr/bin/kubectl");

    assert_eq!(
        resolve_executable("kubectl", &env, &fs),
        Some(PathBuf::from("/usr/bin/kubectl"))
    );
}

#[cfg(unix)]
#[test]
fn non_executable_file_does_not_count() {
    let env = EnvBuilder::new().path("/usr/bin").build();
    let fs = MockFileSystem::new();
    fs.add_file("/usr/bin/gcloud", b"#!/bin/sh\n".to_vec());

    assert_eq!(find_missing(&["gcloud"], &env, &fs), vec!["gcloud".to_string()]);
}

#[cfg(unix)]
#[test]
fn names_with_a_separator_are_checked_directly() {
    let env = EnvBuilder::new().build();
    let fs = MockFileSystem::new();
    fs.add_executable("/home/ci/bin/npm");

    assert!(find_missing(&["/home/ci/bin/npm"], &env, &fs).is_empty());
}
