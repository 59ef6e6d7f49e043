//! cli
//!
//! Command-line interface layer for forgegit.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Load configuration and build the git service
//! - Run one command under a cancellation token tied to Ctrl-C
//!
//! Results are printed to stdout as pretty JSON. Logs go to stderr.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::{Context as _, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::forge::create_git_service;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects `debug` for this
/// crate and everything else stays at `warn`.
fn init_tracing(debug: bool) {
    let default = if debug { "warn,forgegit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when run() is called twice in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve configuration from the file, environment and CLI flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = match &cli.api_base {
        Some(api_base) => config.with_api_base(api_base.clone())?,
        None => config,
    };
    Ok(config)
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let config = load_config(&cli)?;
    debug!(config = ?config, "resolved configuration");
    let git = create_git_service(&config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let output = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received, cancelling");
                on_interrupt.cancel();
            }
        });

        commands::dispatch(cli.command, git.as_ref(), &cancel).await
    })?;

    let rendered = serde_json::to_string_pretty(&output).context("failed to render output")?;
    println!("{}", rendered);
    Ok(())
}
