//! Logging setup for the schemastat binary
//!
//! Library crates only emit `tracing` events; this module decides where
//! they go:
//! - Console output on stderr, so stdout stays clean for listings
//! - Optional daily-rolled JSON files for bug reports
//! - `RUST_LOG` overrides the configured filter

use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where JSON log files are written
    pub log_dir: PathBuf,

    /// Whether to write JSON logs to files
    pub enable_json_logs: bool,

    /// Whether to log to stderr
    pub enable_console_logs: bool,

    /// Whether to include file/line information in console logs
    pub include_location: bool,

    /// Whether console output is colored
    pub enable_ansi: bool,

    /// Whether to log span open/close (covers the collector's instrumented calls)
    pub enable_spans: bool,

    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Warnings only, console output, no files
    pub fn production() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: false,
            enable_console_logs: true,
            include_location: false,
            enable_ansi: stderr_is_terminal(),
            enable_spans: false,
            default_filter: "warn".to_string(),
        }
    }

    /// Verbose console output plus JSON files
    pub fn development() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: true,
            enable_console_logs: true,
            include_location: true,
            enable_ansi: stderr_is_terminal(),
            enable_spans: true,
            default_filter:
                "info,schemastat_cli=debug,schemastat_core=debug,schemastat_stats=debug"
                    .to_string(),
        }
    }

    /// Console only, no files
    #[allow(dead_code)]
    pub fn testing() -> Self {
        Self {
            log_dir: std::env::temp_dir().join("schemastat-tests"),
            enable_json_logs: false,
            enable_console_logs: true,
            include_location: true,
            enable_ansi: false,
            enable_spans: true,
            default_filter: "debug".to_string(),
        }
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    // NEW rather than ENTER: ENTER fires on every re-poll of an awaited future.
    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let mut layers = Vec::new();

    if config.enable_console_logs {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_location)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(span_events.clone())
            .with_ansi(config.enable_ansi)
            .compact()
            .with_filter(env_filter.clone())
            .boxed();

        layers.push(console_layer);
    }

    if config.enable_json_logs {
        std::fs::create_dir_all(&config.log_dir)?;

        let file_appender = tracing_appender::rolling::daily(&config.log_dir, "schemastat.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes on drop and must outlive every log call.
        std::mem::forget(guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(span_events)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(non_blocking)
            .with_filter(env_filter)
            .boxed();

        layers.push(json_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(
        log_dir = %config.log_dir.display(),
        json_enabled = config.enable_json_logs,
        console_enabled = config.enable_console_logs,
        "Logging initialized"
    );

    Ok(())
}

/// Escape codes only make sense when stderr is not redirected
fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Default directory for JSON log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("schemastat")
        .join("logs")
}
