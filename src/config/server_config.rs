//! Server configuration read from environment variables.
//!
//! - HOST, PORT: listening address (default `0.0.0.0:8080`)
//! - WORKER_COUNT: number of worker threads (default 4)
//! - QUEUE_CAPACITY: maximum queued jobs; unset or 0 for an unbounded queue
//! - QUEUE_OVERFLOW_POLICY: "reject" (default) or "block", for a bounded queue
//! - SHUTDOWN_TIMEOUT_SECONDS: grace period for in-flight requests (default 5)
use std::env;

use crate::{
    constants::{
        DEFAULT_HOST, DEFAULT_PORT, DEFAULT_QUEUE_OVERFLOW_POLICY,
        DEFAULT_SHUTDOWN_TIMEOUT_SECONDS, DEFAULT_WORKER_COUNT, UNBOUNDED_QUEUE_CAPACITY,
    },
    jobs::{OverflowPolicy, QueueConfig},
};

use super::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_count: usize,
    pub queue_capacity: Option<usize>,
    pub queue_overflow_policy: String,
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: None,
            queue_overflow_policy: DEFAULT_QUEUE_OVERFLOW_POLICY.to_string(),
            shutdown_timeout_seconds: DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration, falling back to defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            worker_count: env::var("WORKER_COUNT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_WORKER_COUNT),
            queue_capacity: env::var("QUEUE_CAPACITY")
                .ok()
                .and_then(|value| value.parse::<usize>().ok())
                .filter(|capacity| *capacity != UNBOUNDED_QUEUE_CAPACITY),
            queue_overflow_policy: env::var("QUEUE_OVERFLOW_POLICY")
                .unwrap_or_else(|_| DEFAULT_QUEUE_OVERFLOW_POLICY.to_string()),
            shutdown_timeout_seconds: env::var("SHUTDOWN_TIMEOUT_SECONDS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECONDS),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.worker_count));
        }
        parse_overflow_policy(&self.queue_overflow_policy)?;
        Ok(())
    }

    pub fn queue_config(&self) -> Result<QueueConfig, ConfigError> {
        Ok(QueueConfig {
            capacity: self.queue_capacity,
            overflow: parse_overflow_policy(&self.queue_overflow_policy)?,
        })
    }
}

pub fn parse_overflow_policy(value: &str) -> Result<OverflowPolicy, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "reject" => Ok(OverflowPolicy::Reject),
        "block" => Ok(OverflowPolicy::Block),
        _ => Err(ConfigError::InvalidOverflowPolicy(value.to_string())),
    }
}
