use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::{Arc, OnceLock};
use tracing::info;

// Declare the static OnceLock to hold the Metrics.
static METRICS_INSTANCE: OnceLock<Arc<Metrics>> = OnceLock::new();

/// Initializes on first use and returns the process-wide `Metrics`.
pub fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| {
        info!("Initializing Metrics ...");
        Metrics::new()
    })
}

pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_FAILURE: &str = "failure";

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub token_issuances: IntCounterVec,
    pub token_reuses: IntCounter,
    pub auth_retries: IntCounter,

    // API metrics
    pub api_requests: IntCounterVec,
    pub api_request_duration: HistogramVec,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("bbaccountability".into()), None)
            .expect("metrics registry");

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Token
            token_issuances: IntCounterVec::new(Opts::new("token_issuances_total", "Token issuance calls by outcome"), &["outcome"]).expect("metric definition"),
            token_reuses: IntCounter::new("token_reuses_total", "Requests served with a cached token").expect("metric definition"),
            auth_retries: IntCounter::new("auth_retries_total", "Requests retried after an authentication failure").expect("metric definition"),

            // API
            api_requests: IntCounterVec::new(Opts::new("api_requests_total", "API requests by method and status"), &["method", "status"]).expect("metric definition"),
            api_request_duration: HistogramVec::new(HistogramOpts::new("api_request_duration_seconds", "API request duration seconds").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]), &["method"]).expect("metric definition"),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        for collector in [
            Box::new(metrics.token_issuances.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(metrics.token_reuses.clone()),
            Box::new(metrics.auth_retries.clone()),
            Box::new(metrics.api_requests.clone()),
            Box::new(metrics.api_request_duration.clone()),
        ] {
            reg.register(collector).expect("metric registration");
        }

        metrics
    }
}

/// Text exposition of every registered metric.
pub fn render() -> String {
    let metric_families = get_metrics().registry.gather();
    let mut buffer = Vec::new();
    if TextEncoder::new().encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
