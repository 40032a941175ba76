use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::config::LoggingConfig;

/// Owns the tracing dispatcher for a run.
///
/// Nothing is installed globally: callers run their work under
/// [`LogHandle::dispatch`] (see `tracing::instrument::WithSubscriber`), so
/// tests can substitute their own subscriber.
#[derive(Clone)]
pub struct LogHandle {
    dispatch: Dispatch,
}

impl LogHandle {
    /// Console output plus an optional append-only log file.
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| level_filter(&config.level));

        let file_layer = match &config.file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?;
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(Mutex::new(file)),
                )
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .with(file_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
        })
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

/// Unknown level names fall back to `info`.
fn level_filter(level: &str) -> EnvFilter {
    let level = level.trim().to_ascii_lowercase();
    let level = match level.as_str() {
        "warning" => "warn",
        "critical" | "fatal" => "error",
        other => other,
    };
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    EnvFilter::new(level.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_accepts_uppercase() {
        assert_eq!(level_filter("INFO").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(level_filter("WARNING").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(level_filter("verbose").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_init_without_file() {
        let config = LoggingConfig {
            file: None,
            level: "debug".into(),
        };
        assert!(LogHandle::init(&config).is_ok());
    }

    #[test]
    fn test_init_with_unwritable_file_fails() {
        let config = LoggingConfig {
            file: Some("/nonexistent-dir/summarize-html/app.log".into()),
            level: "info".into(),
        };
        assert!(LogHandle::init(&config).is_err());
    }

    #[test]
    fn test_events_are_appended_to_log_file() {
        let path = std::env::temp_dir().join(format!(
            "summarize-html-logging-{}.log",
            std::process::id()
        ));
        std::fs::write(&path, "earlier run\n").unwrap();

        let config = LoggingConfig {
            file: Some(path.clone()),
            level: "info".into(),
        };
        let handle = LogHandle::init(&config).unwrap();
        tracing::dispatcher::with_default(handle.dispatch(), || {
            tracing::info!(file = "page.html", "Summary written");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(contents.starts_with("earlier run\n"), "file was truncated: {contents}");
        assert!(contents.contains("INFO"));
        assert!(contents.contains("Summary written"));
        assert!(contents.contains("page.html"));
        assert!(!contents.contains("\u{1b}["), "file output must not contain ANSI codes");
    }
}
