use actix_web::web::ThinData;
use std::sync::Arc;

use crate::jobs::{JobProducer, JobProducerTrait, Queue};

/// Shared state handed to every request handler.
pub struct AppState<J: JobProducerTrait = JobProducer> {
    pub job_producer: Arc<J>,
    pub queue: Arc<Queue>,
}

pub type DefaultAppState = AppState<JobProducer>;

pub type ThinDataAppState<J = JobProducer> = ThinData<AppState<J>>;

impl DefaultAppState {
    pub fn new(queue: Arc<Queue>) -> Self {
        Self {
            job_producer: Arc::new(JobProducer::new(queue.clone())),
            queue,
        }
    }
}

impl<J: JobProducerTrait> AppState<J> {
    pub fn with_producer(job_producer: Arc<J>, queue: Arc<Queue>) -> Self {
        Self {
            job_producer,
            queue,
        }
    }
}

impl<J: JobProducerTrait> Clone for AppState<J> {
    fn clone(&self) -> Self {
        Self {
            job_producer: self.job_producer.clone(),
            queue: self.queue.clone(),
        }
    }
}
