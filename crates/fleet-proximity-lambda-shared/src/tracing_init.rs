//! Tracing initialization for Lambda functions.
//!
//! Configures JSON-formatted tracing output suitable for CloudWatch Logs.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Legacy level variable honoured when `RUST_LOG` is unset.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Initialize tracing with JSON formatting for CloudWatch Logs.
///
/// Call once at the start of the Lambda entry point, before
/// `lambda_runtime::run()`.
///
/// The filter comes from `RUST_LOG`, then `LOG_LEVEL` (`DEBUG`, `info`, ...),
/// and defaults to `info`.
///
/// # Example
///
/// ```no_run
/// use fleet_proximity_lambda_shared::init_tracing;
///
/// #[tokio::main]
/// async fn main() -> Result<(), lambda_runtime::Error> {
///     init_tracing();
///     // ... rest of Lambda setup
///     Ok(())
/// }
/// ```
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(filter_directive(std::env::var(LOG_LEVEL_VAR).ok().as_deref()))
    });

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Map a `LOG_LEVEL` value onto a filter directive.
///
/// Accepts the level names used by other runtimes (`WARNING`, `CRITICAL`)
/// and falls back to `info` for anything unrecognised.
fn filter_directive(level: Option<&str>) -> &'static str {
    match level.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("warn") | Some("warning") => "warn",
        Some("error") | Some("critical") | Some("fatal") => "error",
        Some("off") => "off",
        _ => "info",
    }
}
