//! Subscriber setup for the plugin.

use super::{tracer, SERVICE_NAME, TRACE_FILE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber that exports spans to the trace file.
///
/// Traces land in `~/.local/share/zellij/mealdeck/mealdeck-otlp.json` on the
/// host. When the data directory cannot be created tracing stays disabled
/// and the plugin keeps working. Calling this twice is harmless; only the
/// first subscriber is installed.
///
/// # Example
///
/// ```rust
/// use mealdeck::observability::init_tracing;
/// use mealdeck::Config;
///
/// let config = Config {
///     trace_level: Some("mealdeck=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(otel_layer)
        .try_init();
}

/// Builds the filter from `trace_level`, falling back to `info` when the
/// directive does not parse.
fn env_filter(config: &Config) -> EnvFilter {
    let directive = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn missing_level_defaults_to_info() {
        let filter = env_filter(&Config::default());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn configured_level_is_used() {
        let config = Config {
            trace_level: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(env_filter(&config).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
