//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the job queue and HTTP metrics.

pub mod metrics_middleware;
use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    // Global Prometheus registry.
    pub static ref REGISTRY: Registry = Registry::new();

    // Counter: Total HTTP requests.
    pub static ref REQUEST_COUNTER: CounterVec = {
        let opts = Opts::new("requests_total", "Total number of HTTP requests");
        let counter_vec = CounterVec::new(opts, &["endpoint", "status"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Histogram: HTTP request latency in seconds. For `/addJob` this includes queue wait.
    pub static ref REQUEST_LATENCY: HistogramVec = {
        let histogram_opts = HistogramOpts::new("request_latency_seconds", "Request latency in seconds")
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]);
        let histogram_vec = HistogramVec::new(histogram_opts, &["endpoint", "status"]).unwrap();
        REGISTRY.register(Box::new(histogram_vec.clone())).unwrap();
        histogram_vec
    };

    // Counter: Jobs accepted into the queue.
    pub static ref JOBS_ENQUEUED: Counter = {
        let counter = Counter::new("jobs_enqueued_total", "Total number of jobs added to the queue").unwrap();
        REGISTRY.register(Box::new(counter.clone())).unwrap();
        counter
    };

    // Counter: Jobs refused because the queue was full or closed.
    pub static ref JOBS_REJECTED: Counter = {
        let counter = Counter::new("jobs_rejected_total", "Total number of jobs refused by the queue").unwrap();
        REGISTRY.register(Box::new(counter.clone())).unwrap();
        counter
    };

    // Counter: Jobs run by a worker, by final status.
    pub static ref JOBS_PROCESSED: CounterVec = {
        let opts = Opts::new("jobs_processed_total", "Total number of jobs processed by workers");
        let counter_vec = CounterVec::new(opts, &["status"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Gauge: Jobs waiting in the queue.
    pub static ref QUEUE_DEPTH: Gauge = {
        let gauge = Gauge::new("queue_depth", "Number of jobs waiting in the queue").unwrap();
        REGISTRY.register(Box::new(gauge.clone())).unwrap();
        gauge
    };

    // Gauge: Workers currently running a job.
    pub static ref WORKERS_BUSY: Gauge = {
        let gauge = Gauge::new("workers_busy", "Number of workers currently running a job").unwrap();
        REGISTRY.register(Box::new(gauge.clone())).unwrap();
        gauge
    };
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(buffer)
}
