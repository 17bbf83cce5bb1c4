use lazy_static::lazy_static;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGaugeVec, Opts, Registry,
};
use std::sync::Once;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Admission metrics
    pub static ref ADMISSIONS_GRANTED: IntCounterVec = IntCounterVec::new(
        Opts::new("admissions_granted_total", "Requests admitted by a rate limiter"),
        &["limiter"]
    ).expect("metric can be created");

    pub static ref ADMISSIONS_THROTTLED: IntCounterVec = IntCounterVec::new(
        Opts::new("admissions_throttled_total", "Requests rejected by a rate limiter"),
        &["limiter"]
    ).expect("metric can be created");

    pub static ref LOGIN_FAILURES: IntCounter = IntCounter::new(
        "login_failures_total",
        "Failed login attempts recorded against a client"
    ).expect("metric can be created");

    pub static ref TRACKED_KEYS: IntGaugeVec = IntGaugeVec::new(
        Opts::new("rate_limiter_tracked_keys", "Keys currently holding a window"),
        &["limiter"]
    ).expect("metric can be created");

    // Scheduling metrics
    pub static ref SCHEDULING_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "scheduling_latency_seconds",
            "Time to compute a priority order"
        ).buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1])
    ).expect("metric can be created");
}

static REGISTER: Once = Once::new();

/// Register every metric with [`REGISTRY`]. Safe to call more than once.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(ADMISSIONS_GRANTED.clone()),
            Box::new(ADMISSIONS_THROTTLED.clone()),
            Box::new(LOGIN_FAILURES.clone()),
            Box::new(TRACKED_KEYS.clone()),
            Box::new(SCHEDULING_LATENCY.clone()),
        ];
        for collector in collectors {
            if let Err(e) = REGISTRY.register(collector) {
                tracing::warn!("Failed to register metric: {}", e);
            }
        }
    });
}
