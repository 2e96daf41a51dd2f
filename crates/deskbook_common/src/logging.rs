//! Logging utilities for the desk booking service.
//!
//! All crates log through `tracing`; this module installs the subscriber once
//! at startup. Besides stdout it can write daily-rolling files and, on Linux,
//! forward to journald.

use deskbook_config::LoggingConfig;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber from the logging section of the config.
///
/// `RUST_LOG` directives take precedence over `config.level`. The returned
/// guard flushes the file writer when dropped, so the caller must keep it
/// alive for the lifetime of the process. Calling this more than once is a
/// no-op apart from the returned guard.
pub fn init_with_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = build_filter(&config.level);

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "deskbook.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    #[cfg(target_os = "linux")]
    let journald_layer = if config.journald {
        match tracing_journald::layer() {
            Ok(layer) => Some(layer),
            Err(e) => {
                eprintln!("journald unavailable, continuing without it: {}", e);
                None
            }
        }
    } else {
        None
    };
    #[cfg(not(target_os = "linux"))]
    let journald_layer: Option<tracing_subscriber::layer::Identity> = None;

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .with(journald_layer)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", config.level);
    }
    guard
}

fn build_filter(level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::try_new(format!("deskbook={0},tower_http={0}", level)).unwrap_or_else(|e| {
        eprintln!("invalid log level {:?} ({}), falling back to info", level, e);
        EnvFilter::new("deskbook=info,tower_http=info")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        let config = LoggingConfig::default();
        assert!(init_with_config(&config).is_none());
        let debug = LoggingConfig {
            level: "debug".to_string(),
            ..LoggingConfig::default()
        };
        assert!(init_with_config(&debug).is_none());
    }
}
