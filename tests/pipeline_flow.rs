// tests/pipeline_flow.rs

mod common;
use crate::common::{
    fs_with_all_tools, fs_with_tools, init_tracing, runner_with_git, EnvBuilder, FakeRunner,
    FAKE_SHA, REVISION_LOOKUP,
};

use fluxci::cli::Command;
use fluxci::errors::PipelineError;
use fluxci::pipeline::Pipeline;
use fluxci::types::SubmitMode;

const IMAGE: &str = "europe-west1-docker.pkg.dev/flux-prod/apps/flux";

fn expected_local() -> Vec<String> {
    vec![
        "npm install".to_string(),
        "npm run lint".to_string(),
        "npm run build".to_string(),
        "npx prisma validate".to_string(),
    ]
}

fn expected_submit(async_flag: bool) -> String {
    let mut cmd = format!(
        "gcloud builds submit --config cloudbuild.yaml --project flux-prod --substitutions \
         _IMAGE={IMAGE},_GKE_CLUSTER=flux-gke,_GKE_REGION=europe-west1,_GKE_NAMESPACE=web,_DEPLOYMENT=flux-electrique"
    );
    if async_flag {
        cmd.push_str(" --async");
    }
    cmd
}

fn expected_deploy(tag: &str) -> Vec<String> {
    vec![
        "gcloud container clusters get-credentials flux-gke --region europe-west1 --project flux-prod"
            .to_string(),
        "kubectl apply -k k8s/".to_string(),
        format!("kubectl set image deployment/flux-electrique web={IMAGE}:{tag} -n web"),
        "kubectl rollout status deployment/flux-electrique -n web --timeout 180s".to_string(),
    ]
}

#[tokio::test]
async fn local_runs_checks_in_order() {
    init_tracing();
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs).local().await.unwrap();

    assert_eq!(runner.executed(), expected_local());
}

#[tokio::test]
async fn local_does_not_need_cluster_config() {
    let env = EnvBuilder::new().path(common::BIN_DIR).build();
    let fs = fs_with_tools(&["npm", "npx"]);
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs).local().await.unwrap();

    assert_eq!(runner.executed().len(), 4);
}

#[tokio::test]
async fn submit_passes_substitutions() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs)
        .submit(SubmitMode::Wait)
        .await
        .unwrap();

    assert_eq!(runner.executed(), vec![expected_submit(false)]);
}

#[tokio::test]
async fn submit_async_appends_flag() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs)
        .execute(&Command::Submit { async_mode: true })
        .await
        .unwrap();

    assert_eq!(runner.executed(), vec![expected_submit(true)]);
}

#[tokio::test]
async fn deploy_issues_steps_in_literal_order() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs).deploy(None).await.unwrap();

    assert_eq!(runner.executed(), expected_deploy(FAKE_SHA));
}

#[tokio::test]
async fn deploy_uses_image_tag_override() {
    let env = EnvBuilder::complete().image_tag("from-env").build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs)
        .execute(&Command::Deploy {
            image_tag: Some("v1.4.2".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(runner.executed(), expected_deploy("v1.4.2"));
}

#[tokio::test]
async fn deploy_stops_at_first_failing_step() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git().fail_on("kubectl apply -k k8s/", 1);

    let err = Pipeline::new(&runner, &env, &fs).deploy(None).await.unwrap_err();

    match err {
        PipelineError::CommandFailed { command, code } => {
            assert_eq!(command, "kubectl apply -k k8s/");
            assert_eq!(code, 1);
        }
        other => panic!("Expected CommandFailed, got: {:?}", other),
    }
    assert_eq!(runner.executed(), expected_deploy(FAKE_SHA)[..2].to_vec());
}

#[tokio::test]
async fn missing_tool_aborts_before_any_command() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_tools(&["gcloud"]);
    let runner = runner_with_git();

    let err = Pipeline::new(&runner, &env, &fs).deploy(None).await.unwrap_err();

    assert!(matches!(err, PipelineError::MissingTools(ref names) if names == &["kubectl"]));
    assert!(runner.executed().is_empty());
    assert!(runner.captured().is_empty());
}

#[tokio::test]
async fn missing_config_aborts_deploy_before_any_command() {
    let env = EnvBuilder::complete().without("GKE_CLUSTER").build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    let err = Pipeline::new(&runner, &env, &fs).deploy(None).await.unwrap_err();

    assert!(matches!(err, PipelineError::MissingConfig(_)));
    assert!(runner.executed().is_empty());
}

#[tokio::test]
async fn full_runs_all_phases_in_order() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs)
        .full(SubmitMode::Wait, None)
        .await
        .unwrap();

    let mut expected = expected_local();
    expected.push(expected_submit(false));
    expected.extend(expected_deploy(FAKE_SHA));
    assert_eq!(runner.executed(), expected);
}

#[tokio::test]
async fn full_with_failing_lint_never_reaches_submit_or_deploy() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git().fail_on("npm run lint", 2);

    let err = Pipeline::new(&runner, &env, &fs)
        .execute(&Command::Full {
            async_mode: false,
            image_tag: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::CommandFailed { code: 2, .. }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(
        runner.executed(),
        vec!["npm install".to_string(), "npm run lint".to_string()]
    );
    assert!(
        runner.captured().is_empty(),
        "config for submit/deploy must not be loaded"
    );
}

#[tokio::test]
async fn full_async_still_deploys_with_override_tag() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = runner_with_git();

    Pipeline::new(&runner, &env, &fs)
        .full(SubmitMode::Async, Some("release-7"))
        .await
        .unwrap();

    let executed = runner.executed();
    assert_eq!(executed[4], expected_submit(true));
    assert_eq!(executed[5..].to_vec(), expected_deploy("release-7"));
    // Only submit resolves the tag itself; deploy takes the override.
    assert_eq!(runner.captured(), vec![REVISION_LOOKUP.to_string()]);
}

#[tokio::test]
async fn full_override_tag_does_not_reach_submit() {
    let env = EnvBuilder::complete().build();
    let fs = fs_with_all_tools();
    let runner = FakeRunner::new();

    let err = Pipeline::new(&runner, &env, &fs)
        .full(SubmitMode::Wait, Some("v1"))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::RevisionLookup { .. }));
    assert_eq!(runner.executed(), expected_local());
    assert_eq!(runner.captured(), vec![REVISION_LOOKUP.to_string()]);
}

#[tokio::test]
async fn full_submit_resolves_env_tag_while_deploy_uses_override() {
    let env = EnvBuilder::complete().image_tag("from-env").build();
    let fs = fs_with_all_tools();
    let runner = FakeRunner::new();

    Pipeline::new(&runner, &env, &fs)
        .full(SubmitMode::Wait, Some("v2"))
        .await
        .unwrap();

    let executed = runner.executed();
    assert_eq!(executed[4], expected_submit(false));
    assert_eq!(executed[5..].to_vec(), expected_deploy("v2"));
    assert!(runner.captured().is_empty());
}
