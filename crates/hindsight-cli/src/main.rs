//! Hindsight CLI - decision tracker client
//!
//! Record decisions, log how they turned out and ask the backend for an
//! AI comparison between expectation and reality.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod output;
mod prompt;

use commands::Cli;

/// Initialize tracing.
///
/// Console output goes to stderr so it never mixes with rendered views. A log
/// file, when given, receives the same events without ANSI colors.
fn init_tracing(
    log_file: Option<&std::path::Path>,
    verbose: bool,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = if verbose { "debug" } else { "error" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "hindsight={level},hindsight_client={level},hindsight_views={level},hindsight_core={level}"
        )
        .into()
    });

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let _ = std::fs::create_dir_all(dir);
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "hindsight.log".into());
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file.as_deref(), cli.verbose);

    cli.execute().await
}
