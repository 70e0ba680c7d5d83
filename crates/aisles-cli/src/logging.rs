//! Tracing subscriber setup.
//!
//! The interactive UI owns the terminal, so session logs go to the configured
//! log file or nowhere. Scripted commands log to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use aisles_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget {
    Stderr,
    Session,
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or the log file
/// cannot be opened.
pub(crate) fn init(config: &AppConfig, target: LogTarget) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    match (target, config.log_path.as_deref()) {
        (LogTarget::Stderr, _) => builder.with_writer(std::io::stderr).init(),
        (LogTarget::Session, Some(path)) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (LogTarget::Session, None) => builder.with_writer(std::io::sink).init(),
    }

    tracing::info!(env = %config.env, ?target, "aisles starting");
    Ok(())
}
