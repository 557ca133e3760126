use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use super::config::TelemetryConfig;

/// Installs the console subscriber. `RUST_LOG` takes precedence over the
/// configured filter.
pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let filter = EnvFilter::builder()
        .with_default_directive(config.max_level.into())
        .parse_lossy(config.level_filter.as_str());
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => EnvFilter::builder()
            .with_default_directive(config.max_level.into())
            .parse_lossy(directives),
        _ => filter,
    };
    let debug = config.enable_debug_logging;
    let console = tracing_subscriber::fmt::layer()
        .with_file(debug)
        .with_line_number(debug)
        .with_thread_ids(debug)
        .with_target(debug)
        .with_filter(filter);
    Registry::default().with(console).try_init()?;
    Ok(())
}
