// src/pipeline/plan.rs

//! Step lists for each phase.
//!
//! Pure functions: nothing here runs a process, so the plans can be printed
//! and asserted on directly.

use crate::config::PipelineConfig;
use crate::exec::Step;
use crate::types::SubmitMode;

pub const LOCAL_TOOLS: &[&str] = &["npm", "npx"];
pub const SUBMIT_TOOLS: &[&str] = &["gcloud"];
pub const DEPLOY_TOOLS: &[&str] = &["gcloud", "kubectl"];

pub const CLOUD_BUILD_CONFIG: &str = "cloudbuild.yaml";
pub const MANIFEST_DIR: &str = "k8s/";
pub const CONTAINER_NAME: &str = "web";
pub const ROLLOUT_TIMEOUT: &str = "180s";

/// Install, lint, build, then validate the Prisma schema.
pub fn local_steps() -> Vec<Step> {
    vec![
        Step::new("npm").arg("install"),
        Step::new("npm").args(["run", "lint"]),
        Step::new("npm").args(["run", "build"]),
        Step::new("npx").args(["prisma", "validate"]),
    ]
}

/// Cloud Build `--substitutions` value.
pub fn substitutions(cfg: &PipelineConfig) -> String {
    [
        format!("_IMAGE={}", cfg.artifact_repo()),
        format!("_GKE_CLUSTER={}", cfg.cluster()),
        format!("_GKE_REGION={}", cfg.region()),
        format!("_GKE_NAMESPACE={}", cfg.namespace()),
        format!("_DEPLOYMENT={}", cfg.deployment()),
    ]
    .join(",")
}

pub fn submit_steps(cfg: &PipelineConfig, mode: SubmitMode) -> Vec<Step> {
    let mut submit = Step::new("gcloud").args([
        "builds",
        "submit",
        "--config",
        CLOUD_BUILD_CONFIG,
        "--project",
        cfg.project_id(),
        "--substitutions",
    ]);
    submit = submit.arg(substitutions(cfg));
    if mode == SubmitMode::Async {
        submit = submit.arg("--async");
    }
    vec![submit]
}

/// Credentials, manifests, image update, rollout wait. Order matters: the
/// image update needs the deployment the manifests create.
pub fn deploy_steps(cfg: &PipelineConfig) -> Vec<Step> {
    let deployment = format!("deployment/{}", cfg.deployment());
    vec![
        Step::new("gcloud").args([
            "container",
            "clusters",
            "get-credentials",
            cfg.cluster(),
            "--region",
            cfg.region(),
            "--project",
            cfg.project_id(),
        ]),
        Step::new("kubectl").args(["apply", "-k", MANIFEST_DIR]),
        Step::new("kubectl")
            .args(["set", "image"])
            .arg(deployment.as_str())
            .arg(format!("{CONTAINER_NAME}={}", cfg.image_ref()))
            .args(["-n", cfg.namespace()]),
        Step::new("kubectl")
            .args(["rollout", "status"])
            .arg(deployment.as_str())
            .args(["-n", cfg.namespace(), "--timeout", ROLLOUT_TIMEOUT]),
    ]
}
