///! Logging configuration
///!
///! Console output goes to stderr so it never mixes with command output.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io;
use std::str::FromStr;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_NAME: &str = "quotaboard.log";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl FromStr for LogRotation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hourly" => Ok(LogRotation::Hourly),
            "daily" => Ok(LogRotation::Daily),
            "never" => Ok(LogRotation::Never),
            other => anyhow::bail!("unknown log rotation '{}' (expected hourly, daily or never)", other),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_path: None,
            rotation: LogRotation::default(),
        }
    }
}

impl LoggingConfig {
    /// Level for a `-v` count: warn, info, debug, then trace
    pub fn level_for_verbosity(verbose: u8) -> &'static str {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Install the global subscriber
    ///
    /// The returned guard flushes the file writer on drop and must be held
    /// until the process exits.
    pub fn init(&self) -> Result<Option<WorkerGuard>> {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let console_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(io::stderr);

        match self.file_writer() {
            Some((writer, guard)) => {
                let file_layer = fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .json()
                    .with_writer(writer);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(console_layer)
                    .with(file_layer)
                    .try_init()?;

                tracing::debug!(level = %self.level, rotation = ?self.rotation, "logging initialized");
                Ok(Some(guard))
            }
            None => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(console_layer)
                    .try_init()?;

                tracing::debug!(level = %self.level, "logging initialized");
                Ok(None)
            }
        }
    }

    /// Non-blocking writer over the rolling log file, if one is configured
    ///
    /// Lines are only guaranteed on disk once the guard is dropped.
    fn file_writer(&self) -> Option<(NonBlocking, WorkerGuard)> {
        let path = self.file_path.as_ref()?;
        let file_appender = match self.rotation {
            LogRotation::Hourly => rolling::hourly(path, LOG_FILE_NAME),
            LogRotation::Daily => rolling::daily(path, LOG_FILE_NAME),
            LogRotation::Never => rolling::never(path, LOG_FILE_NAME),
        };
        Some(non_blocking(file_appender))
    }
}
