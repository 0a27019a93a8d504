//! Tracing subscriber setup for the front ends

use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogSettings;

/// Log file prefix inside the configured log directory
pub const LOG_FILE_PREFIX: &str = "travelmate.log";

/// Install the global subscriber.
///
/// With a log directory configured, JSON records go to a daily-rolling file
/// and the returned guard must be kept alive to flush them. Otherwise records
/// go to stderr, as JSON or plain text depending on `settings.json`.
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.filter))?;

    let guard = match &settings.directory {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .json(),
                )
                .try_init()?;

            info!(directory = %log_dir.display(), "Logging initialized - writing to {}.*", LOG_FILE_PREFIX);
            Some(guard)
        }
        None if settings.json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).json())
                .try_init()?;
            None
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
                .try_init()?;
            None
        }
    };

    debug!("Debug logging is enabled and working");
    Ok(guard)
}
