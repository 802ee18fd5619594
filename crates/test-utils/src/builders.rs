#![allow(dead_code)]

use fluxci::config::model::{
    ARTIFACT_REPOSITORY_VAR, CLUSTER_VAR, DEPLOYMENT_NAME_VAR, IMAGE_TAG_VAR, NAMESPACE_VAR,
    PROJECT_ID_VAR, REGION_VAR,
};
use fluxci::env::MapEnvironment;
use fluxci::fs::mock::MockFileSystem;

/// Directory the fake `PATH` points at.
pub const BIN_DIR: &str = "/usr/local/bin";

/// Builder for `MapEnvironment` to simplify test setup.
pub struct EnvBuilder {
    env: MapEnvironment,
}

impl EnvBuilder {
    /// Empty environment; not even `PATH` is set.
    pub fn new() -> Self {
        Self {
            env: MapEnvironment::new(),
        }
    }

    /// Every required variable set to a recognisable value, and `PATH`
    /// pointing at [`BIN_DIR`].
    pub fn complete() -> Self {
        Self::new()
            .var(PROJECT_ID_VAR, "flux-prod")
            .var(REGION_VAR, "europe-west1")
            .var(CLUSTER_VAR, "flux-gke")
            .var(NAMESPACE_VAR, "web")
            .var(
                ARTIFACT_REPOSITORY_VAR,
                "europe-west1-docker.pkg.dev/flux-prod/apps/flux",
            )
            .path(BIN_DIR)
    }

    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.env.set(key, value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.env.remove(key);
        self
    }

    pub fn path(self, dirs: &str) -> Self {
        self.var("PATH", dirs)
    }

    pub fn deployment(self, name: &str) -> Self {
        self.var(DEPLOYMENT_NAME_VAR, name)
    }

    pub fn image_tag(self, tag: &str) -> Self {
        self.var(IMAGE_TAG_VAR, tag)
    }

    pub fn build(self) -> MapEnvironment {
        self.env
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock filesystem with the given executables installed in [`BIN_DIR`].
pub fn fs_with_tools(tools: &[&str]) -> MockFileSystem {
    let fs = MockFileSystem::new();
    for tool in tools {
        fs.add_executable(format!("{BIN_DIR}/{tool}"));
    }
    fs
}

/// Mock filesystem with every tool the pipeline uses.
pub fn fs_with_all_tools() -> MockFileSystem {
    fs_with_tools(&["npm", "npx", "gcloud", "kubectl"])
}
