// src/config/validate.rs

use crate::config::model::{DEFAULT_DEPLOYMENT, IMAGE_TAG_VAR, PipelineConfig, RawPipelineConfig};
use crate::errors::{PipelineError, Result};

impl TryFrom<RawPipelineConfig> for PipelineConfig {
    type Error = PipelineError;

    /// Requires every required variable and an image tag. The deployment
    /// name falls back to [`DEFAULT_DEPLOYMENT`].
    fn try_from(raw: RawPipelineConfig) -> std::result::Result<Self, Self::Error> {
        ensure_required(&raw)?;

        let project_id = raw.project_id.unwrap_or_default();
        let region = raw.region.unwrap_or_default();
        let cluster = raw.cluster.unwrap_or_default();
        let namespace = raw.namespace.unwrap_or_default();
        let artifact_repo = raw.artifact_repo.unwrap_or_default();

        let image_tag = raw
            .image_tag
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PipelineError::MissingConfig(vec![IMAGE_TAG_VAR.to_string()]))?;

        let deployment = raw
            .deployment
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string());

        Ok(PipelineConfig::new_unchecked(
            project_id,
            region,
            cluster,
            namespace,
            artifact_repo,
            deployment,
            image_tag,
        ))
    }
}

/// Names of required variables that are missing or empty, in order.
pub fn missing_required(raw: &RawPipelineConfig) -> Vec<String> {
    raw.required_fields()
        .into_iter()
        .filter(|(_, value)| value.is_none_or(str::is_empty))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Fail with every missing name at once rather than the first one.
pub fn ensure_required(raw: &RawPipelineConfig) -> Result<()> {
    let missing = missing_required(raw);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingConfig(missing))
    }
}
