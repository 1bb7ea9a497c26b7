//! Observability module for the MultiViz client.
//!
//! Service calls are wrapped in `tracing` spans; log lines about ignored and
//! failed requests go through the injected [`Logger`].

mod logging;

pub use logging::{ConsoleLogger, LogConfig, LogLevel, Logger, NoopLogger, TracingLogger};

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber printing to stderr.
///
/// `filter` uses the `EnvFilter` directive syntax (e.g. `"multiviz_client=debug"`);
/// `RUST_LOG` takes precedence when set. Returns `false` if a global
/// subscriber was already installed.
pub fn init_tracing(filter: &str, json: bool) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
