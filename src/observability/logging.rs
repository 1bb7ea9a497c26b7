//! Logging sinks used by the client.

use std::collections::HashMap;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Trace level.
    Trace = 0,
    /// Debug level.
    Debug = 1,
    /// Info level.
    #[default]
    Info = 2,
    /// Warning level.
    Warn = 3,
    /// Error level.
    Error = 4,
    /// Off (no logging).
    Off = 5,
}

impl LogLevel {
    fn label(self) -> Option<&'static str> {
        match self {
            LogLevel::Trace => Some("TRACE"),
            LogLevel::Debug => Some("DEBUG"),
            LogLevel::Info => Some("INFO"),
            LogLevel::Warn => Some("WARN"),
            LogLevel::Error => Some("ERROR"),
            LogLevel::Off => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Include timestamps.
    pub include_timestamps: bool,
    /// Redact API keys from messages.
    pub redact_sensitive: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            include_timestamps: true,
            redact_sensitive: true,
        }
    }
}

impl LogConfig {
    /// Creates a new log configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Disables timestamps.
    pub fn without_timestamps(mut self) -> Self {
        self.include_timestamps = false;
        self
    }

    /// Disables sensitive data redaction.
    pub fn no_redact(mut self) -> Self {
        self.redact_sensitive = false;
        self
    }
}

/// Logger interface.
///
/// The client writes ignored statuses as warnings and propagated failures as
/// errors to the logger it was built with.
pub trait Logger: Send + Sync {
    /// Logs a message at the specified level.
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>);

    /// Logs at debug level.
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// Logs at info level.
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Logs at warning level.
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    /// Logs at error level.
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, None);
    }
}

/// Logger that forwards to `tracing` events.
///
/// This is the default sink; install a subscriber (for example with
/// [`init_tracing`](super::init_tracing)) to see the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        let context = context.map(|ctx| format!("{:?}", ctx)).unwrap_or_default();
        match level {
            LogLevel::Trace => tracing::trace!(target: "multiviz_client", %context, "{}", message),
            LogLevel::Debug => tracing::debug!(target: "multiviz_client", %context, "{}", message),
            LogLevel::Info => tracing::info!(target: "multiviz_client", %context, "{}", message),
            LogLevel::Warn => tracing::warn!(target: "multiviz_client", %context, "{}", message),
            LogLevel::Error => tracing::error!(target: "multiviz_client", %context, "{}", message),
            LogLevel::Off => {}
        }
    }
}

/// Console logger writing timestamped lines to stdout/stderr.
pub struct ConsoleLogger {
    config: LogConfig,
    secrets: Option<regex::Regex>,
}

impl ConsoleLogger {
    /// Creates a new console logger.
    pub fn new(config: LogConfig) -> Self {
        let secrets = regex::Regex::new(r"(?i)(x-vibium-api-key|api[_-]?key)([=:]\s*)[^\s,}]+").ok();
        Self { config, secrets }
    }

    /// Creates with default configuration.
    pub fn default_config() -> Self {
        Self::new(LogConfig::default())
    }

    /// Redacts API keys from text.
    fn redact(&self, text: &str) -> String {
        match &self.secrets {
            Some(re) if self.config.redact_sensitive => re.replace_all(text, "$1$2***").into_owned(),
            _ => text.to_string(),
        }
    }

    /// Renders a log line, or `None` when the level is filtered out.
    fn render(
        &self,
        level: LogLevel,
        message: &str,
        context: Option<&HashMap<String, String>>,
    ) -> Option<String> {
        if level < self.config.level {
            return None;
        }
        let label = level.label()?;

        let mut parts = Vec::new();

        if self.config.include_timestamps {
            parts.push(format!("[{}]", chrono::Utc::now().to_rfc3339()));
        }
        parts.push(format!("[{}]", label));
        parts.push(self.redact(message));

        if let Some(ctx) = context {
            let redacted: HashMap<&String, String> = ctx
                .iter()
                .map(|(k, v)| {
                    let lower = k.to_lowercase();
                    let v = if self.config.redact_sensitive && lower.contains("key") {
                        "***".to_string()
                    } else {
                        v.clone()
                    };
                    (k, v)
                })
                .collect();

            if let Ok(json) = serde_json::to_string(&redacted) {
                parts.push(json);
            }
        }

        Some(parts.join(" "))
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        let Some(output) = self.render(level, message, context) else {
            return;
        };

        match level {
            LogLevel::Error | LogLevel::Warn => eprintln!("{}", output),
            _ => println!("{}", output),
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::default_config()
    }
}

impl std::fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("config", &self.config)
            .finish()
    }
}

/// No-op logger that discards all messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str, _context: Option<&HashMap<String, String>>) {}
}
