//! Job queue server entry point.
//!
//! Starts the worker pool, then serves `GET /addJob` until the process is
//! signalled to stop, then drains the queue before exiting.
use std::time::Instant;

use actix_web::{
    middleware::{from_fn, Logger},
    App, HttpServer,
};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::{error, info};

use job_queue_server::{
    api::routes::configure_routes,
    bootstrap::{initialize_app_state, initialize_workers},
    config::ServerConfig,
    logging::setup_logging,
    metrics::metrics_middleware::track_request_metrics,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    color_eyre::install()?;
    setup_logging()?;

    let config = ServerConfig::from_env();
    config.validate().wrap_err("Invalid server configuration")?;

    let app_state = initialize_app_state(&config)?;
    let worker_pool = initialize_workers(&config, &app_state)?;

    let address = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", address);

    let server = HttpServer::new({
        let app_state = app_state.clone();
        move || {
            App::new()
                .wrap(from_fn(track_request_metrics))
                .wrap(Logger::default())
                .app_data(app_state.clone())
                .configure(configure_routes)
        }
    })
    .bind(&address)
    .map_err(|e| {
        error!("Failed to bind {}: {}", address, e);
        e
    })
    .wrap_err_with(|| format!("Failed to listen on {}", address))?
    .shutdown_timeout(config.shutdown_timeout_seconds);

    info!("Server running at http://{}", address);
    let result = server.run().await;

    let started = Instant::now();
    worker_pool.shutdown();
    info!("Drained job queue in {:?}", started.elapsed());

    result.wrap_err("Server terminated with an error")
}
