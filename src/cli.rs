// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `fluxci`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fluxci",
    version,
    about = "Flux Electrique CI/CD orchestrator (Cloud Build + GKE).",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Repository root; every command runs from here.
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    pub repo_root: PathBuf,

    /// Extra `KEY=value` file layered under the process environment.
    ///
    /// If omitted, `.env` in the repository root is used when present.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FLUXCI_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the commands that would run, without running them.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run local checks (lint/build/prisma).
    Local,

    /// Submit Cloud Build job.
    Submit {
        /// Return immediately after queuing Cloud Build.
        #[arg(long = "async")]
        async_mode: bool,
    },

    /// Deploy a tagged image to GKE.
    Deploy {
        /// Override IMAGE_TAG/commit for rollbacks.
        #[arg(long, value_name = "TAG")]
        image_tag: Option<String>,
    },

    /// local -> submit -> deploy chain.
    Full {
        /// Submit Cloud Build asynchronously (deploy waits for manual trigger).
        #[arg(long = "async")]
        async_mode: bool,

        /// Image tag to deploy (defaults to latest commit).
        #[arg(long, value_name = "TAG")]
        image_tag: Option<String>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Local => "local",
            Command::Submit { .. } => "submit",
            Command::Deploy { .. } => "deploy",
            Command::Full { .. } => "full",
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
