//! # Workers Module
//! Fixed-size pool of worker threads draining the job queue.
//!
//! Each worker loops `pop` → execute → deliver until the queue is closed and
//! empty. A failing or panicking job never stops the worker running it.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread::{self, JoinHandle},
};

use actix_web::http::StatusCode;
use log::{debug, error, info, warn};
use thiserror::Error;

use crate::{
    constants::{JOB_PANICKED_MESSAGE, WORKER_THREAD_NAME_PREFIX},
    metrics::{QUEUE_DEPTH, WORKERS_BUSY},
};

use super::{handle_result, Job, JobError, JobStatus, Queue, WorkFunction};

#[derive(Debug, Error)]
pub enum WorkerPoolError {
    #[error("Worker count must be at least 1")]
    NoWorkers,
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle to the running workers.
///
/// Dropping the pool leaves the workers running; call [`WorkerPool::shutdown`]
/// to stop them.
#[derive(Debug)]
pub struct WorkerPool {
    queue: Arc<Queue>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Launches `worker_count` workers consuming `queue`.
    pub fn start(
        worker_count: usize,
        queue: Arc<Queue>,
        work: Arc<dyn WorkFunction>,
    ) -> Result<Self, WorkerPoolError> {
        if worker_count == 0 {
            return Err(WorkerPoolError::NoWorkers);
        }

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let worker_queue = queue.clone();
            let worker_work = work.clone();
            let spawned = thread::Builder::new()
                .name(format!("{WORKER_THREAD_NAME_PREFIX}-{worker_id}"))
                .spawn(move || run_worker(worker_id, &worker_queue, worker_work.as_ref()));

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    error!("Failed to spawn worker [{worker_id}]: {e}");
                    queue.close();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(e.into());
                }
            }
        }

        info!(
            "Started {} workers running '{}'",
            worker_count,
            work.name()
        );
        Ok(Self { queue, workers })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn queue(&self) -> &Arc<Queue> {
        &self.queue
    }

    /// Closes the queue, lets the workers drain it, and waits for them to exit.
    pub fn shutdown(self) {
        info!(
            "Shutting down worker pool, {} jobs left in queue",
            self.queue.len()
        );
        self.queue.close();

        for (worker_id, handle) in self.workers.into_iter().enumerate() {
            if handle.join().is_err() {
                error!("Worker [{worker_id}] terminated abnormally");
            }
        }
        info!("Worker pool shutdown complete");
    }
}

fn run_worker(worker_id: usize, queue: &Queue, work: &dyn WorkFunction) {
    info!("Worker [{worker_id}] started");

    while let Some(job) = queue.pop() {
        QUEUE_DEPTH.set(queue.len() as f64);
        process_job(worker_id, job, work);
    }

    info!("Worker [{worker_id}] exited");
}

/// Runs one job to completion and returns its final status.
///
/// The job, and with it its sink, is dropped on return, which ends a
/// streamed response.
pub fn process_job(worker_id: usize, mut job: Job, work: &dyn WorkFunction) -> JobStatus {
    info!("Worker [{worker_id}] got a job with id: {}", job.id());
    debug!("Job {} is {}", job.id(), JobStatus::Running);
    WORKERS_BUSY.inc();

    let (payload, sink) = job.parts_mut();
    let result = panic::catch_unwind(AssertUnwindSafe(|| work.execute(payload, sink)))
        .unwrap_or_else(|panic| Err(JobError::Panicked(panic_message(panic.as_ref()))));

    if matches!(result, Err(JobError::Panicked(_))) {
        if let Err(e) = job
            .sink_mut()
            .write_error(StatusCode::INTERNAL_SERVER_ERROR, JOB_PANICKED_MESSAGE)
        {
            warn!("Could not report panic for job {}: {}", job.id(), e);
        }
    }

    let status = handle_result(job.id(), work.name(), result);
    WORKERS_BUSY.dec();
    debug!("Job {} is {}", job.id(), status);
    status
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
