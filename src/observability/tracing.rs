use tracing::Span;
use tracing_subscriber::EnvFilter;

pub fn trace_admission(limiter: &str, key: &str) -> Span {
    tracing::info_span!(
        "admission_check",
        limiter = %limiter,
        key = %key,
    )
}

pub fn trace_scheduling(items: usize) -> Span {
    tracing::info_span!(
        "scheduling",
        items,
    )
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
/// Returns false if a subscriber was already installed.
pub fn init_tracing(json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}
