// src/lib.rs

pub mod cli;
pub mod config;
pub mod env;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod types;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::env::build_environment;
use crate::errors::Result;
use crate::exec::{DryRunRunner, ProcessRunner};
use crate::fs::RealFileSystem;
use crate::pipeline::Pipeline;
use crate::types::ToolPolicy;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - environment (process env + optional dotenv file)
/// - command runner (real processes, or printing only with `--dry-run`)
/// - Ctrl-C handling
/// - the pipeline for the chosen subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    let fs = RealFileSystem;
    let env = build_environment(&fs, &args.repo_root, args.env_file.as_deref())?;

    if args.dry_run {
        println!("fluxci dry-run: {}", args.command.name());
        let runner = DryRunRunner;
        let pipeline = Pipeline::new(&runner, &env, &fs).with_tool_policy(ToolPolicy::WarnOnly);
        pipeline.execute(&args.command).await?;
        debug!("dry-run complete (no execution)");
        return Ok(());
    }

    // Ctrl-C → kill the running step and refuse to start another.
    let (interrupt_tx, interrupt_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = interrupt_tx.send(true);
    });

    let runner = ProcessRunner::new(args.repo_root.clone(), interrupt_rx);
    let pipeline = Pipeline::new(&runner, &env, &fs);

    info!(
        command = args.command.name(),
        repo_root = %args.repo_root.display(),
        "pipeline starting"
    );
    pipeline.execute(&args.command).await
}
