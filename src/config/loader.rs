// src/config/loader.rs

use tracing::{debug, warn};

use crate::config::model::{PipelineConfig, RawPipelineConfig};
use crate::config::validate::ensure_required;
use crate::env::Environment;
use crate::errors::{PipelineError, Result};
use crate::exec::{CommandRunner, Step};

/// Command used to derive the default image tag.
pub fn revision_lookup_step() -> Step {
    Step::new("git").args(["rev-parse", "--short", "HEAD"])
}

/// Build a [`PipelineConfig`] from the environment.
///
/// This is the entry point used by every phase that needs cluster settings:
///
/// - Reads every variable through `env`.
/// - Reports all missing required variables in one error, before any
///   command runs.
/// - Resolves the image tag: `image_tag_override`, then `IMAGE_TAG`, then
///   the short revision hash from `git`.
pub async fn load_config(
    env: &dyn Environment,
    runner: &dyn CommandRunner,
    image_tag_override: Option<&str>,
) -> Result<PipelineConfig> {
    let mut raw = RawPipelineConfig::from_env(env);
    ensure_required(&raw)?;

    let tag = resolve_image_tag(image_tag_override, raw.image_tag.as_deref(), runner).await?;
    raw.image_tag = Some(tag);

    PipelineConfig::try_from(raw)
}

/// Pick the image tag by precedence. The revision lookup only runs when
/// neither an override nor an env value is set; empty strings count as
/// unset.
pub async fn resolve_image_tag(
    image_tag_override: Option<&str>,
    env_tag: Option<&str>,
    runner: &dyn CommandRunner,
) -> Result<String> {
    if let Some(tag) = image_tag_override.filter(|t| !t.is_empty()) {
        debug!(tag, "image tag from --image-tag");
        return Ok(tag.to_string());
    }
    if let Some(tag) = env_tag.filter(|t| !t.is_empty()) {
        debug!(tag, "image tag from IMAGE_TAG");
        return Ok(tag.to_string());
    }
    detect_revision(runner).await
}

async fn detect_revision(runner: &dyn CommandRunner) -> Result<String> {
    let step = revision_lookup_step();
    let reason = match runner.capture(&step).await {
        Ok(sha) if !sha.is_empty() => {
            debug!(sha = %sha, "image tag from git revision");
            return Ok(sha);
        }
        Ok(_) => "empty output".to_string(),
        Err(PipelineError::Interrupted) => return Err(PipelineError::Interrupted),
        Err(e) => e.to_string(),
    };

    warn!(command = %step, reason = %reason, "revision lookup failed");
    Err(PipelineError::RevisionLookup { reason })
}
