// src/config/mod.rs

//! Pipeline configuration read from environment variables.
//!
//! - [`model`]: variable names, `RawPipelineConfig`, `PipelineConfig`.
//! - [`validate`]: required-variable checks and `TryFrom` conversion.
//! - [`loader`]: the async entry point that also resolves the image tag.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_config, resolve_image_tag, revision_lookup_step};
pub use model::{
    PipelineConfig, RawPipelineConfig, DEFAULT_DEPLOYMENT, IMAGE_TAG_VAR, REQUIRED_VARS,
};
pub use validate::{ensure_required, missing_required};
