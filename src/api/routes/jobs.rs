//! This module defines the HTTP route for submitting jobs.
//!
//! `GET /addJob?Name=<name>` queues a greeting job; the worker that picks it
//! up writes the response.

use crate::{api::controllers::jobs, jobs::JobPayload, models::DefaultAppState};
use actix_web::{get, web, Responder};

/// Submits a job built from the query parameters.
///
/// Pairs are extracted in request order so that a repeated name resolves to its
/// first value.
#[get("/addJob")]
async fn add_job(
    query: web::Query<Vec<(String, String)>>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    let payload: JobPayload = query.into_inner().into_iter().collect();
    jobs::add_job(payload, data).await
}

/// Configures the job routes.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(add_job);
}
