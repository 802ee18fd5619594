// src/main.rs

use fluxci::errors::EXIT_FAILURE;
use fluxci::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("error: {err}");
        std::process::exit(EXIT_FAILURE);
    }

    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}
