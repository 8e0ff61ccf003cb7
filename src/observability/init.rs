//! Tracing subscriber setup.

use super::exporter;
use crate::infrastructure::expand_tilde;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "HealthConnect";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when it is set and parses, otherwise from
/// `config.trace_level`. Events are formatted to stderr. When `config.trace_file`
/// is set, spans are additionally exported as OTLP/JSON to that file.
///
/// Calling this more than once is harmless; only the first call installs anything.
///
/// # Example
///
/// ```rust
/// use healthconnect::observability::init_tracing;
/// use healthconnect::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.trace_level));

    let otel_layer = config.trace_file.as_deref().and_then(|raw| {
        let path = expand_tilde(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("trace export disabled: cannot create {}: {e}", parent.display());
                return None;
            }
        }

        let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
        let provider = exporter::file_tracer_provider(path, resource);
        Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
