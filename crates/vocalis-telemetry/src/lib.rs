use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vocalis_config::{LogFormat, TelemetryConfig};

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured filter. An invalid filter
/// falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.log_filter);

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .with_target(true);

            registry.with(fmt_layer).try_init()?;
        }
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);

            registry.with(fmt_layer).try_init()?;
        }
    }

    tracing::debug!(format = ?config.format, "telemetry initialized");

    Ok(())
}

fn build_filter(env_override: Option<&str>, configured: &str) -> EnvFilter {
    let directive = env_override.filter(|d| !d.trim().is_empty()).unwrap_or(configured);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}
