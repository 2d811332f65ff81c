//! Work functions executed by the worker pool.
//!
//! A work function receives the job payload and the job's result sink, and
//! answers the original caller through that sink. Failures are final: the
//! producer has already returned, so nothing is retried or propagated.
use log::{debug, error, warn};
use thiserror::Error;

use crate::{
    jobs::{JobPayload, JobStatus, ResultSink, SinkError},
    metrics::JOBS_PROCESSED,
};

mod greeting_handler;
pub use greeting_handler::*;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Error writing response: {0}")]
    TransportWrite(#[from] SinkError),
    #[error("Work function panicked: {0}")]
    Panicked(String),
}

/// The business logic run for every job.
pub trait WorkFunction: Send + Sync {
    /// Name used in logs and metrics.
    fn name(&self) -> &str;

    fn execute(&self, payload: &JobPayload, sink: &mut dyn ResultSink) -> Result<(), JobError>;
}

/// Maps the outcome of a work function to the job's final status.
///
/// - `Ok` → `Completed`
/// - any error → `Failed`, logged, never retried
pub fn handle_result(job_id: &str, job_type: &str, result: Result<(), JobError>) -> JobStatus {
    let status = match result {
        Ok(()) => {
            debug!("Job {} ({}) handled successfully", job_id, job_type);
            JobStatus::Completed
        }
        Err(JobError::Validation(msg)) => {
            warn!("Job {} ({}) rejected: {}", job_id, job_type, msg);
            JobStatus::Failed
        }
        Err(err) => {
            error!("Job {} ({}) failed: {}", job_id, job_type, err);
            JobStatus::Failed
        }
    };

    JOBS_PROCESSED.with_label_values(&[status.as_str()]).inc();
    status
}
