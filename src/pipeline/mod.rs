// src/pipeline/mod.rs

//! The four subcommand flows.
//!
//! [`plan`] turns a configuration into the literal command lines for each
//! phase; [`runner`] checks tools, loads configuration and executes those
//! command lines in order, stopping at the first failure.

pub mod plan;
pub mod runner;

pub use plan::{deploy_steps, local_steps, submit_steps, substitutions};
pub use runner::Pipeline;
