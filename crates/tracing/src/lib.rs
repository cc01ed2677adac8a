//! Utilities for turning on tracing in executables, tests and benchmarks that use `vector`.
//!
//! Tracing is controlled with the VECTOR_LOG environment variable.
//! If VECTOR_LOG is specified, logs are written to stderr. If VECTOR_LOGTO=<filepath> is also
//! specified, logs are instead written to <filepath>.
//!
//! See [directive-syntax] for the filtering directive syntax.
//!
//! Library code should use the exposed members of `vector_tracing` rather than the `tracing`
//! crate directly, so the tracing infrastructure can change in one place.
//!
//! Tracing is only turned on in debug builds. Use the provided [setup_tracing] macro to turn on
//! tracing at an executable's entry point.
//!
//! [directive-syntax]: https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives

/// Sets up tracing. The value of this macro must be bound to a variable that
/// is not dropped until tracing has completed.
///
/// This macro should only be invoked at an executable's (or benchmark's) entry point.
/// Tracing will only be enabled in debug builds.
#[macro_export]
macro_rules! setup_tracing {
    () => {
        if cfg!(debug_assertions) {
            $crate::setup_tracing()
        } else {
            $crate::TracingGuards::NONE
        }
    };
}

pub use tracing::debug;
pub use tracing::info;

const ENV_FILTER: &str = "VECTOR_LOG";
const LOGTO_VAR: &str = "VECTOR_LOGTO";

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

/// Guards issued by the underlying library used for tracing.
/// Must not be dropped until all tracing is complete.
pub struct TracingGuards {
    _file_appender_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl TracingGuards {
    pub const NONE: TracingGuards = TracingGuards {
        _file_appender_guard: None,
    };
}

/// Installs a global subscriber. Does nothing if one is already installed,
/// so several test binaries (or several tests in one binary) may call this.
#[must_use]
pub fn setup_tracing() -> TracingGuards {
    if let Ok(file) = std::env::var(LOGTO_VAR) {
        let _ = std::fs::remove_file(&file);
        let file_appender = tracing_appender::rolling::never(".", file);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = fmt::Layer::default()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_filter(EnvFilter::from_env(ENV_FILTER));

        let _ = Registry::default().with(file_layer).try_init();

        TracingGuards {
            _file_appender_guard: Some(guard),
        }
    } else {
        let stderr_layer = fmt::Layer::default()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_env(ENV_FILTER));

        let _ = Registry::default().with(stderr_layer).try_init();

        TracingGuards::NONE
    }
}
