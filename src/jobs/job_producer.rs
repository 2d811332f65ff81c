//! Producer side of the job queue.
//!
//! The HTTP layer wraps each request into a [`Job`] and hands it to a
//! [`JobProducerTrait`]. Submission returns as soon as the job is queued; the
//! producer never learns how the job ends.
use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    jobs::{Job, JobStatus, OverflowPolicy, Queue, QueueError},
    metrics::{JOBS_ENQUEUED, JOBS_REJECTED, QUEUE_DEPTH},
};

#[cfg(test)]
use mockall::automock;

/// Submission failures. The job is handed back so the caller can still answer it.
#[derive(Debug, Error)]
pub enum JobProducerError {
    #[error("Job queue is full (capacity {capacity})")]
    QueueFull { capacity: usize, job: Job },
    #[error("Job queue is closed")]
    QueueClosed { job: Job },
}

impl JobProducerError {
    pub fn into_job(self) -> Job {
        match self {
            JobProducerError::QueueFull { job, .. } | JobProducerError::QueueClosed { job } => job,
        }
    }
}

impl From<QueueError<Job>> for JobProducerError {
    fn from(error: QueueError<Job>) -> Self {
        match error {
            QueueError::Full { capacity, item } => JobProducerError::QueueFull {
                capacity,
                job: item,
            },
            QueueError::Closed { item } => JobProducerError::QueueClosed { job: item },
        }
    }
}

#[cfg_attr(test, automock)]
pub trait JobProducerTrait: Send + Sync {
    /// Queues `job` for execution.
    fn submit(&self, job: Job) -> Result<(), JobProducerError>;

    /// Whether `submit` may wait for room in the queue.
    fn may_block(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct JobProducer {
    queue: Arc<Queue>,
}

impl JobProducer {
    pub fn new(queue: Arc<Queue>) -> Self {
        Self { queue }
    }

    pub fn queue(&self) -> &Arc<Queue> {
        &self.queue
    }
}

impl JobProducerTrait for JobProducer {
    fn submit(&self, job: Job) -> Result<(), JobProducerError> {
        let job_id = job.id().to_string();

        match self.queue.push(job) {
            Ok(()) => {
                let depth = self.queue.len();
                JOBS_ENQUEUED.inc();
                QUEUE_DEPTH.set(depth as f64);
                info!("Job {} added to queue (depth: {})", job_id, depth);
                debug!("Job {} is {}", job_id, JobStatus::Queued);
                Ok(())
            }
            Err(e) => {
                JOBS_REJECTED.inc();
                warn!("Job {} not queued: {}", job_id, e);
                Err(e.into())
            }
        }
    }

    fn may_block(&self) -> bool {
        self.queue.capacity().is_some() && self.queue.config().overflow == OverflowPolicy::Block
    }
}
