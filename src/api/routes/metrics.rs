//! This module provides the HTTP endpoint for scraping metrics.
//!
//! # Endpoints
//!
//! - `/metrics`: Returns every registered metric in Prometheus text format.

use crate::metrics::gather_metrics;
use actix_web::{get, web, HttpResponse, Responder};
use prometheus::{Encoder, TextEncoder};

/// Returns all metrics in Prometheus exposition format.
#[get("/metrics")]
async fn scrape_metrics() -> impl Responder {
    match gather_metrics() {
        Ok(body) => HttpResponse::Ok()
            .content_type(TextEncoder::new().format_type())
            .body(body),
        Err(e) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
    }
}

/// Initializes the HTTP services for the metrics module.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(scrape_metrics);
}
