use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref SUBMISSIONS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "ingestor_submissions_total",
        "Total reading submissions received"
    ))
    .unwrap();
    pub static ref READINGS_STORED_TOTAL: Counter = Counter::with_opts(Opts::new(
        "ingestor_readings_stored_total",
        "Total readings appended to the store"
    ))
    .unwrap();
    pub static ref INVALID_PAYLOADS_TOTAL: Counter = Counter::with_opts(Opts::new(
        "ingestor_invalid_payloads_total",
        "Total submissions rejected as malformed"
    ))
    .unwrap();
    pub static ref DB_FAILURES_TOTAL: Counter = Counter::with_opts(Opts::new(
        "ingestor_db_failures_total",
        "Total store operations that failed"
    ))
    .unwrap();
    pub static ref INGEST_LATENCY_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "ingestor_ingest_latency_seconds",
            "Time taken to append one reading to the store"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0])
    )
    .unwrap();
}

pub fn init_metrics() {
    REGISTRY
        .register(Box::new(SUBMISSIONS_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(READINGS_STORED_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(INVALID_PAYLOADS_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(DB_FAILURES_TOTAL.clone()))
        .unwrap();
    REGISTRY
        .register(Box::new(INGEST_LATENCY_SECONDS.clone()))
        .unwrap();
}

pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
