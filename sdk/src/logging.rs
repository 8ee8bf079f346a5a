//! Logging capability threaded through client configuration
//!
//! The SDK never touches a global logger. Each `ClientConfig` carries a
//! `Logger`; the default forwards to `tracing`, so applications that install
//! a subscriber see SDK events under the `mintme_sdk` target.

use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogFn = dyn Fn(LogLevel, &str) + Send + Sync;

#[derive(Clone)]
pub struct Logger {
    sink: Arc<LogFn>,
}

impl Logger {
    /// Forward every message to `tracing`
    pub fn tracing() -> Self {
        Self::from_fn(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "mintme_sdk", "{}", message),
            LogLevel::Info => tracing::info!(target: "mintme_sdk", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "mintme_sdk", "{}", message),
            LogLevel::Error => tracing::error!(target: "mintme_sdk", "{}", message),
        })
    }

    /// Discard everything
    pub fn noop() -> Self {
        Self::from_fn(|_, _| {})
    }

    pub fn from_fn<F>(sink: F) -> Self
    where
        F: Fn(LogLevel, &str) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        (self.sink)(level, message)
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger")
    }
}
