//! Configuration for the job queue server.

use thiserror::Error;

mod server_config;
pub use server_config::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),
    #[error("Invalid queue overflow policy: {0} (expected \"reject\" or \"block\")")]
    InvalidOverflowPolicy(String),
}
