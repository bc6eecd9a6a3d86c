use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

/// The logging options resolved from the layered configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub debug: bool,
    pub json: bool,
    pub dir: Option<PathBuf>,
}

impl LogSettings {
    /// Takes the JSON and file options from the resolved config so values
    /// from `config.toml` apply as well as flags and env vars
    pub fn new(config: &Config, debug: bool) -> Self {
        Self {
            debug,
            json: config.log_json,
            dir: config.log_dir.clone(),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` in debug mode
/// and `info` elsewhere. With a log dir a daily rolling file is written
/// next to stdout, and the returned guard must be held until shutdown so
/// buffered lines are flushed.
pub fn init_logging(settings: &LogSettings) -> Option<WorkerGuard> {
    let default_level = if settings.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_writer, guard) = match settings.dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "hyperflow.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter);

    if settings.json {
        let file_layer = file_writer.map(|w| fmt::layer().json().with_writer(w).with_ansi(false));
        registry.with(fmt::layer().json()).with(file_layer).init();
    } else {
        let file_layer = file_writer.map(|w| fmt::layer().with_writer(w).with_ansi(false));
        registry.with(fmt::layer()).with(file_layer).init();
    }

    guard
}
