//! Tracing subscriber bootstrap.

use bookhub_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the built-in filter. Calling this more than
/// once is harmless: later calls leave the first subscriber in place.
pub fn init(settings: &TelemetrySettings) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = match settings.log_format {
        LogFormat::Pretty => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .try_init(),
        LogFormat::Json => fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            target: "bookhub-telemetry",
            format = ?settings.log_format,
            "tracing subscriber initialized"
        );
    }
}
