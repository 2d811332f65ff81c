//! Job queue server
//!
//! An HTTP front end that turns each request into a job, queues it, and lets a
//! fixed pool of worker threads produce the response.
//!
//! ## Modules
//!
//! * `api` - HTTP routes and controllers
//! * `bootstrap` - Startup of the application state and the worker pool
//! * `config` - Server configuration
//! * `jobs` - Jobs, the shared queue, producers, sinks, and workers
//! * `logging` - Logger setup
//! * `metrics` - Prometheus metrics
//! * `models` - Application state and API errors

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
