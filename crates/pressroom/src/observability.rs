//! Optional OpenTelemetry metrics export for publish attempts.

#[cfg(feature = "metrics")]
use opentelemetry::{KeyValue, global};
#[cfg(feature = "metrics")]
use opentelemetry_otlp::{MetricExporter as OtlpExporter, WithExportConfig};
#[cfg(feature = "metrics")]
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
#[cfg(feature = "metrics")]
use opentelemetry_stdout::MetricExporter as StdoutExporter;
#[cfg(feature = "metrics")]
use std::sync::OnceLock;
#[cfg(feature = "metrics")]
use std::time::Duration;
use tracing::{debug, instrument};
#[cfg(feature = "metrics")]
use tracing::{info, warn};

#[cfg(feature = "metrics")]
static METER_PROVIDER: OnceLock<SdkMeterProvider> = OnceLock::new();

/// Install a global meter provider so the audit sink's
/// `pressroom_publish_attempts` counter is exported.
///
/// `OTEL_EXPORTER=otlp` sends to `OTEL_EXPORTER_OTLP_ENDPOINT`
/// (default `http://localhost:4318`); anything else prints to stdout.
///
/// Without the `metrics` feature this only logs and returns `Ok(())`.
///
/// # Errors
///
/// Returns error if the OTLP exporter cannot be built.
#[instrument(skip_all, fields(service_name))]
pub fn init_observability(
    service_name: &'static str,
    export_interval_secs: u64,
) -> Result<(), String> {
    #[cfg(not(feature = "metrics"))]
    {
        let _ = export_interval_secs;
        debug!(service_name, "Metrics feature disabled, publish counters are not exported");
        Ok(())
    }

    #[cfg(feature = "metrics")]
    {
        if METER_PROVIDER.get().is_some() {
            debug!("Meter provider already installed");
            return Ok(());
        }

        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name)])
            .build();
        let interval = Duration::from_secs(export_interval_secs.max(1));
        let exporter_type = std::env::var("OTEL_EXPORTER").unwrap_or_else(|_| "stdout".to_string());

        let provider = match exporter_type.as_str() {
            "otlp" => {
                let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .unwrap_or_else(|_| "http://localhost:4318".to_string());
                info!(%endpoint, "Exporting publish metrics over OTLP");
                let exporter = OtlpExporter::builder()
                    .with_http()
                    .with_endpoint(&endpoint)
                    .with_timeout(Duration::from_secs(10))
                    .build()
                    .map_err(|e| format!("Failed to create OTLP exporter: {}", e))?;
                SdkMeterProvider::builder()
                    .with_resource(resource)
                    .with_reader(PeriodicReader::builder(exporter).with_interval(interval).build())
                    .build()
            }
            _ => {
                info!("Exporting publish metrics to stdout");
                SdkMeterProvider::builder()
                    .with_resource(resource)
                    .with_reader(
                        PeriodicReader::builder(StdoutExporter::default())
                            .with_interval(interval)
                            .build(),
                    )
                    .build()
            }
        };

        global::set_meter_provider(provider.clone());
        let _ = METER_PROVIDER.set(provider);
        info!(service_name, export_interval_secs, "Metrics initialized");
        Ok(())
    }
}

/// Flush and stop the meter provider installed by [`init_observability`].
#[instrument]
pub fn shutdown_observability() {
    #[cfg(feature = "metrics")]
    if let Some(provider) = METER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            warn!(error = %e, "Meter provider shutdown failed");
        }
    }
    debug!("Metrics shutdown complete");
}
