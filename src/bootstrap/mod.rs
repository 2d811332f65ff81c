//! Initialization routines for the job queue server
//!
//! # Submodules
//!
//! - `initialize_app_state`: Builds the shared queue and application state
//! - `initialize_workers`: Starts the worker pool draining the queue
mod initialize_app_state;
pub use initialize_app_state::*;

mod initialize_workers;
pub use initialize_workers::*;
