//! This module provides health check and readiness endpoints for the API.
//!
//! The `/health` endpoint can be used to verify that the service is running and responsive.
//! The `/ready` endpoint reports whether the job queue is accepting work.
use actix_web::{get, web, HttpResponse};
use log::warn;

use crate::models::{DefaultAppState, ReadinessResponse};

/// Handles the `/health` endpoint.
///
/// Returns an `HttpResponse` with a status of `200 OK` and a body of `"OK"`.
#[get("/health")]
async fn health() -> Result<HttpResponse, actix_web::Error> {
    Ok(HttpResponse::Ok().body("OK"))
}

/// Readiness endpoint that checks the job queue
///
/// Returns 200 OK if the queue accepts new jobs, or 503 Service Unavailable if it
/// is full or shutting down.
#[get("/ready")]
async fn readiness(data: web::ThinData<DefaultAppState>) -> Result<HttpResponse, actix_web::Error> {
    let readiness = ReadinessResponse::from_queue(data.queue.as_ref());

    if let Some(reason) = &readiness.reason {
        warn!("Not ready: {}", reason);
        return Ok(HttpResponse::ServiceUnavailable().json(readiness));
    }
    Ok(HttpResponse::Ok().json(readiness))
}

/// Initializes the health check service.
///
/// Registers the `health` and `ready` endpoints with the provided service configuration.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
    cfg.service(readiness);
}
