//! Worker initialization
//!
//! Starts the fixed pool of workers that drain the shared job queue. The pool
//! is started before the HTTP listener so no accepted job waits on a missing
//! worker.

use std::sync::Arc;

use actix_web::web::ThinData;
use color_eyre::{eyre::WrapErr, Result};
use log::info;

use crate::{
    config::ServerConfig,
    jobs::{GreetingHandler, WorkerPool},
    models::DefaultAppState,
};

/// Starts `server_config.worker_count` greeting workers on the state's queue.
pub fn initialize_workers(
    server_config: &ServerConfig,
    app_state: &ThinData<DefaultAppState>,
) -> Result<WorkerPool> {
    let pool = WorkerPool::start(
        server_config.worker_count,
        app_state.queue.clone(),
        Arc::new(GreetingHandler),
    )
    .wrap_err("Failed to start worker pool")?;

    info!("Initialized {} workers", pool.size());
    Ok(pool)
}
