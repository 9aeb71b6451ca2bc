use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;


// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Authentication metrics
    pub auth_requests: IntCounterVec,
    pub auth_failures: IntCounterVec,
    pub auth_duration: HistogramVec,

    // Token state metrics
    pub token_refreshes: IntCounter,
    pub token_expiry_unix: IntGauge,

    // Config
    pub config_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("keystoneauth".into()), None).expect("valid registry prefix");

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Authentication
            auth_requests: IntCounterVec::new(Opts::new("auth_requests_total", "Authentication exchanges by protocol and method"), &["protocol", "method"]).expect("valid metric"),
            auth_failures: IntCounterVec::new(Opts::new("auth_failures_total", "Authentication failures by reason"), &["protocol", "reason"]).expect("valid metric"),
            auth_duration: HistogramVec::new(HistogramOpts::new("auth_duration_seconds", "Authentication exchange duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["protocol"]).expect("valid metric"),

            // Token state
            token_refreshes: IntCounter::new("token_refreshes_total", "Cached tokens discarded at half-life").expect("valid metric"),
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Expiry of the most recently issued token").expect("valid metric"),

            config_errors: IntCounter::new("config_errors_total", "Config parse and validation failures").expect("valid metric"),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.auth_requests.clone())).expect("unique metric");
        reg.register(Box::new(metrics.auth_failures.clone())).expect("unique metric");
        reg.register(Box::new(metrics.auth_duration.clone())).expect("unique metric");
        reg.register(Box::new(metrics.token_refreshes.clone())).expect("unique metric");
        reg.register(Box::new(metrics.token_expiry_unix.clone())).expect("unique metric");
        reg.register(Box::new(metrics.config_errors.clone())).expect("unique metric");

        metrics
    }

    /// Prometheus text exposition of every registered metric.
    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
