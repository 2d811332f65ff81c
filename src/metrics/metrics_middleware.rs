//! Request metrics recorded around every HTTP request.
//!
//! The status label is taken from the response head, so `/addJob` requests are
//! counted with the status the worker committed (200, 400, 500) or with the 503
//! returned when the queue refused the job. Latency for `/addJob` therefore
//! includes the time the job spent waiting in the queue.

use std::time::Instant;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    Error,
};

use crate::metrics::{REQUEST_COUNTER, REQUEST_LATENCY};

/// Label used for requests that matched no route.
const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Counts the request and observes its latency, labelled by route pattern and status.
///
/// Install with `App::wrap(actix_web::middleware::from_fn(track_request_metrics))`.
pub async fn track_request_metrics(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    // unmatched paths share one label
    let endpoint = req
        .match_pattern()
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());
    let started = Instant::now();

    let result = next.call(req).await;

    let status = match &result {
        Ok(res) => res.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    let labels = [endpoint.as_str(), status.as_str()];
    REQUEST_COUNTER.with_label_values(&labels).inc();
    REQUEST_LATENCY
        .with_label_values(&labels)
        .observe(started.elapsed().as_secs_f64());

    result
}
