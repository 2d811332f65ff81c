//! # Jobs Controller
//!
//! Producer side of the job queue: wraps an incoming request into a job,
//! queues it, and hands the connection to the job's result sink.

use actix_web::{web, HttpResponse, ResponseError};
use log::{debug, info};

use crate::{
    jobs::{http_sink_channel, Job, JobPayload, JobProducerTrait, JobStatus},
    models::{ApiError, ThinDataAppState},
};

/// Queues a job for `payload` and waits for its response on the connection.
///
/// The producer only learns whether the job was queued. Success, validation
/// errors, and write failures all travel through the job's sink.
///
/// # Returns
///
/// * The streamed response written by the worker.
/// * `503 Service Unavailable` if the queue is full or shutting down.
pub async fn add_job<J>(
    payload: JobPayload,
    state: ThinDataAppState<J>,
) -> Result<HttpResponse, ApiError>
where
    J: JobProducerTrait + 'static,
{
    let (sink, pending) = http_sink_channel();
    let job = Job::new(payload, Box::new(sink));
    let job_id = job.id().to_string();
    debug!("Job {} is {}", job_id, JobStatus::Created);

    let submitted = if state.job_producer.may_block() {
        let producer = state.job_producer.clone();
        web::block(move || producer.submit(job))
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))?
    } else {
        state.job_producer.submit(job)
    };

    if let Err(e) = submitted {
        let error = ApiError::from(&e);
        info!(
            "Request for job {} refused with {}: {}",
            job_id,
            error.status_code(),
            e
        );
        return Err(error);
    }

    info!("Received request and added job {} to queue", job_id);
    Ok(pending.into_response().await)
}
