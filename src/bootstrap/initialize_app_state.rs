//! Application state initialization
//!
//! Creates the job queue from the server configuration and wraps it, together
//! with a producer, into the state shared by every request handler.
use crate::{
    config::ServerConfig,
    jobs::Queue,
    models::DefaultAppState,
};
use actix_web::web;
use color_eyre::{eyre::WrapErr, Result};
use log::info;
use std::sync::Arc;

/// Initializes application state
///
/// # Errors
///
/// Returns error if the configured overflow policy is not recognized.
pub fn initialize_app_state(server_config: &ServerConfig) -> Result<web::ThinData<DefaultAppState>> {
    let queue_config = server_config
        .queue_config()
        .wrap_err("Failed to build queue configuration")?;

    match queue_config.capacity {
        Some(capacity) => info!(
            "Job queue bounded at {} jobs (overflow: {})",
            capacity,
            queue_config.overflow.as_str()
        ),
        None => info!("Job queue is unbounded"),
    }

    let queue = Arc::new(Queue::new(queue_config));
    Ok(web::ThinData(DefaultAppState::new(queue)))
}
