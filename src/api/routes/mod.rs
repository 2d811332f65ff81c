//! # API Routes Module
//!
//! Configures HTTP routes for the job queue service API.
//!
//! ## Routes
//!
//! * `/addJob` - Job submission
//! * `/health`, `/ready` - Health check endpoints
//! * `/metrics` - Prometheus metrics

pub mod health;
pub mod jobs;
pub mod metrics;

use actix_web::web;
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init)
        .configure(jobs::init)
        .configure(metrics::init);
}
