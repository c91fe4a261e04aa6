//! r2frida CLI entry point

use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "R2FRIDA_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let args = match r2frida::cli::utf8_args(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(e) => process::exit(r2frida::output::report(&e.to_string(), 1)),
    };

    let exit_code = r2frida::cli::run(&args).await;

    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
