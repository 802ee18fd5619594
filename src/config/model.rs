// src/config/model.rs

use crate::env::Environment;

pub const PROJECT_ID_VAR: &str = "GCP_PROJECT_ID";
pub const REGION_VAR: &str = "GCP_REGION";
pub const CLUSTER_VAR: &str = "GKE_CLUSTER";
pub const NAMESPACE_VAR: &str = "GKE_NAMESPACE";
pub const ARTIFACT_REPOSITORY_VAR: &str = "ARTIFACT_REPOSITORY";
pub const DEPLOYMENT_NAME_VAR: &str = "DEPLOYMENT_NAME";
pub const IMAGE_TAG_VAR: &str = "IMAGE_TAG";

/// Variables that must be set and non-empty, in reporting order.
pub const REQUIRED_VARS: [&str; 5] = [
    PROJECT_ID_VAR,
    REGION_VAR,
    CLUSTER_VAR,
    NAMESPACE_VAR,
    ARTIFACT_REPOSITORY_VAR,
];

pub const DEFAULT_DEPLOYMENT: &str = "flux-electrique";

/// Settings as read from the environment, before validation.
///
/// Empty values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPipelineConfig {
    pub project_id: Option<String>,
    pub region: Option<String>,
    pub cluster: Option<String>,
    pub namespace: Option<String>,
    pub artifact_repo: Option<String>,
    pub deployment: Option<String>,
    pub image_tag: Option<String>,
}

impl RawPipelineConfig {
    pub fn from_env(env: &dyn Environment) -> Self {
        Self {
            project_id: env.non_empty_var(PROJECT_ID_VAR),
            region: env.non_empty_var(REGION_VAR),
            cluster: env.non_empty_var(CLUSTER_VAR),
            namespace: env.non_empty_var(NAMESPACE_VAR),
            artifact_repo: env.non_empty_var(ARTIFACT_REPOSITORY_VAR),
            deployment: env.non_empty_var(DEPLOYMENT_NAME_VAR),
            image_tag: env.non_empty_var(IMAGE_TAG_VAR),
        }
    }

    /// Required values paired with their variable names, in reporting order.
    pub(crate) fn required_fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (PROJECT_ID_VAR, self.project_id.as_deref()),
            (REGION_VAR, self.region.as_deref()),
            (CLUSTER_VAR, self.cluster.as_deref()),
            (NAMESPACE_VAR, self.namespace.as_deref()),
            (ARTIFACT_REPOSITORY_VAR, self.artifact_repo.as_deref()),
        ]
    }
}

/// Validated, immutable configuration for one phase of a run.
///
/// Built via `PipelineConfig::try_from(RawPipelineConfig)` or, with tag
/// resolution, [`crate::config::load_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    project_id: String,
    region: String,
    cluster: String,
    namespace: String,
    artifact_repo: String,
    deployment: String,
    image_tag: String,
}

impl PipelineConfig {
    pub(crate) fn new_unchecked(
        project_id: String,
        region: String,
        cluster: String,
        namespace: String,
        artifact_repo: String,
        deployment: String,
        image_tag: String,
    ) -> Self {
        Self {
            project_id,
            region,
            cluster,
            namespace,
            artifact_repo,
            deployment,
            image_tag,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn artifact_repo(&self) -> &str {
        &self.artifact_repo
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn image_tag(&self) -> &str {
        &self.image_tag
    }

    /// Fully qualified image reference, `<artifact_repo>:<image_tag>`.
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.artifact_repo, self.image_tag)
    }
}
