//! Tracing subscriber setup for the `vrs` binary.
//!
//! Levels as used across the workspace:
//!
//! - `warn`: header conflicts, rows without a voter name, oversized uploads
//! - `info`: one summary event per pipeline stage, with counts and `duration_ms`
//! - `debug`: per-file and per-column decisions
//! - `trace`: row-level values (names stay redacted unless `--log-data`)

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events follow the configured level. Everything else stays at
/// `warn`.
const WORKSPACE_CRATES: [&str; 8] = [
    "vrs_cli",
    "vrs_classify",
    "vrs_ingest",
    "vrs_map",
    "vrs_model",
    "vrs_normalization",
    "vrs_report",
    "vrs_standards",
];

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for the workspace crates.
    pub level: LevelFilter,
    /// Let `RUST_LOG` replace `level` when it is set.
    pub honor_rust_log: bool,
    pub ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr. File output is
    /// timestamped.
    pub file: Option<PathBuf>,
    /// Allow voter names and other row values in log output.
    pub log_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per line.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            honor_rust_log: true,
            ansi: true,
            format: LogFormat::default(),
            file: None,
            log_data: false,
        }
    }
}

/// Installs the global subscriber. Call once, before any pipeline work.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already
/// installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            install(config, Mutex::new(file), true)
        }
        None => install(config, io::stderr, false),
    }
}

fn install<W>(config: &LogConfig, writer: W, timestamps: bool) -> io::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    vrs_model::redact::set_log_data_enabled(config.log_data);
    tracing_subscriber::registry()
        .with(build_env_filter(config.level, config.honor_rust_log))
        .with(output_layer(config, writer, timestamps))
        .try_init()
        .map_err(io::Error::other)
}

fn output_layer<S, W>(
    config: &LogConfig,
    writer: W,
    timestamps: bool,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_target(false);
    match (config.format, timestamps) {
        (LogFormat::Json, _) => layer.json().boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.ansi).without_time().boxed(),
    }
}

fn build_env_filter(level: LevelFilter, honor_rust_log: bool) -> EnvFilter {
    if honor_rust_log && let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(default_directives(level))
}

/// `warn` for dependencies, the chosen level for our own crates.
fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_workspace_crate() {
        let directives = default_directives(LevelFilter::DEBUG);
        assert!(directives.starts_with("warn,"));
        for krate in WORKSPACE_CRATES {
            assert!(directives.contains(&format!("{krate}=debug")), "{krate}");
        }
    }

    #[test]
    fn off_level_is_lowercase() {
        assert!(default_directives(LevelFilter::OFF).ends_with("vrs_standards=off"));
    }

    #[test]
    fn json_events_are_appended_to_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vrs.log");
        let config = LogConfig {
            level: LevelFilter::INFO,
            honor_rust_log: false,
            format: LogFormat::Json,
            file: Some(path.clone()),
            ..LogConfig::default()
        };
        init_logging(&config).unwrap();
        tracing::info!(records = 3, "Ingested voter roll");
        tracing::debug!("below the configured level");

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1, "{text}");
        assert!(text.contains("\"level\":\"INFO\""));
        assert!(text.contains("\"records\":3"));
        assert!(text.contains("Ingested voter roll"));
        assert!(!vrs_model::redact::log_data_enabled());
    }
}
