// src/pipeline/runner.rs

use tracing::{info, warn};

use crate::cli::Command;
use crate::config::{load_config, PipelineConfig};
use crate::env::Environment;
use crate::errors::Result;
use crate::exec::{ensure_tools, find_missing, CommandRunner, Step};
use crate::fs::FileSystem;
use crate::pipeline::plan::{
    deploy_steps, local_steps, submit_steps, DEPLOY_TOOLS, LOCAL_TOOLS, SUBMIT_TOOLS,
};
use crate::types::{Phase, SubmitMode, ToolPolicy};

/// Drives the phases of a run against a [`CommandRunner`].
///
/// Holds no state between phases; each phase checks its own tools and, where
/// needed, builds a fresh [`PipelineConfig`].
pub struct Pipeline<'a> {
    runner: &'a dyn CommandRunner,
    env: &'a dyn Environment,
    fs: &'a dyn FileSystem,
    tool_policy: ToolPolicy,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        env: &'a dyn Environment,
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            runner,
            env,
            fs,
            tool_policy: ToolPolicy::Enforce,
        }
    }

    pub fn with_tool_policy(mut self, policy: ToolPolicy) -> Self {
        self.tool_policy = policy;
        self
    }

    /// Run whatever the CLI asked for.
    pub async fn execute(&self, command: &Command) -> Result<()> {
        match command {
            Command::Local => self.local().await,
            Command::Submit { async_mode } => self.submit((*async_mode).into()).await,
            Command::Deploy { image_tag } => self.deploy(image_tag.as_deref()).await,
            Command::Full {
                async_mode,
                image_tag,
            } => self.full((*async_mode).into(), image_tag.as_deref()).await,
        }
    }

    pub async fn local(&self) -> Result<()> {
        self.check_tools(Phase::Local, LOCAL_TOOLS)?;
        self.run_steps(Phase::Local, &local_steps()).await
    }

    /// The tag is never overridable here; it comes from `IMAGE_TAG` or git.
    pub async fn submit(&self, mode: SubmitMode) -> Result<()> {
        self.check_tools(Phase::Submit, SUBMIT_TOOLS)?;
        let cfg = self.load_config(None).await?;
        self.run_steps(Phase::Submit, &submit_steps(&cfg, mode)).await
    }

    pub async fn deploy(&self, image_tag: Option<&str>) -> Result<()> {
        self.check_tools(Phase::Deploy, DEPLOY_TOOLS)?;
        let cfg = self.load_config(image_tag).await?;
        info!(image = %cfg.image_ref(), deployment = cfg.deployment(), "deploying");
        self.run_steps(Phase::Deploy, &deploy_steps(&cfg)).await
    }

    /// local -> submit -> deploy; the first failure stops the chain.
    /// `image_tag` only applies to the deploy phase.
    pub async fn full(&self, mode: SubmitMode, image_tag: Option<&str>) -> Result<()> {
        self.local().await?;
        self.submit(mode).await?;
        if mode == SubmitMode::Async {
            warn!("build was submitted with --async; deploy may run before the image exists");
        }
        self.deploy(image_tag).await
    }

    async fn load_config(&self, image_tag: Option<&str>) -> Result<PipelineConfig> {
        load_config(self.env, self.runner, image_tag).await
    }

    fn check_tools(&self, phase: Phase, tools: &[&str]) -> Result<()> {
        match self.tool_policy {
            ToolPolicy::Enforce => ensure_tools(tools, self.env, self.fs),
            ToolPolicy::WarnOnly => {
                let missing = find_missing(tools, self.env, self.fs);
                if !missing.is_empty() {
                    warn!(%phase, ?missing, "required executables not found on PATH");
                }
                Ok(())
            }
        }
    }

    async fn run_steps(&self, phase: Phase, steps: &[Step]) -> Result<()> {
        info!(%phase, steps = steps.len(), "phase started");
        for step in steps {
            self.runner.run(step).await?;
        }
        info!(%phase, "phase finished");
        Ok(())
    }
}
