// file: src/logging/logger.rs
// version: 1.0.0
// guid: c41d7a90-6e2f-4b38-8d15-93a0e5b7f2c6

//! Logger initialization and configuration

use crate::{error::FedCtlError, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Instrument;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Options collected from the global flags
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// glog-style verbosity level
    pub verbosity: u8,
    pub quiet: bool,
    pub format: LogFormat,
    /// Also write logs to a timestamped file in this directory
    pub log_dir: Option<PathBuf>,
}

/// Map the verbosity flags onto a filter directive
pub fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1..=3 => "info",
        4..=5 => "debug",
        _ => "trace",
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the logging system.
///
/// Log lines go to stderr so that manifests printed on stdout stay parseable.
pub fn init_logger(options: &LogOptions) -> Result<Option<PathBuf>> {
    let level = level_for(options.verbosity, options.quiet);
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    match options.format {
        LogFormat::Text => layers.push(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(env_filter(level))
                .boxed(),
        ),
        LogFormat::Json => layers.push(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(level))
                .boxed(),
        ),
    }

    let mut log_file = None;
    if let Some(ref dir) = options.log_dir {
        fs::create_dir_all(dir)?;
        let now = chrono::Utc::now();
        let path = dir.join(format!("kubefedctl-{}.log", now.format("%Y%m%d_%H%M%S")));
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        layers.push(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(env_filter(level))
                .boxed(),
        );
        log_file = Some(path);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| FedCtlError::logging(format!("Failed to initialize logger: {}", e)))?;

    if let Some(ref path) = log_file {
        tracing::debug!("Logging to {}", path.display());
    }

    Ok(log_file)
}

/// Run a future inside a named operation span
pub async fn with_async_operation_span<F, Fut, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = R>,
{
    let span = tracing::info_span!("operation", name = operation);
    async move { f().await }.instrument(span).await
}
