//! Readiness response returned by the `/ready` endpoint.

use serde::Serialize;

use crate::{constants::QUEUE_CLOSED_MESSAGE, jobs::Queue};

/// Readiness of the job queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    /// Why the queue is not accepting jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub queue_depth: usize,
    /// `null` for an unbounded queue.
    pub queue_capacity: Option<usize>,
}

impl ReadinessResponse {
    pub fn from_queue<T>(queue: &Queue<T>) -> Self {
        let queue_depth = queue.len();
        let queue_capacity = queue.capacity();

        let reason = if queue.is_closed() {
            Some(QUEUE_CLOSED_MESSAGE.to_string())
        } else if queue.is_full() {
            Some(format!(
                "Job queue is full: {}/{}",
                queue_depth,
                queue_capacity.unwrap_or_default()
            ))
        } else {
            None
        };

        Self {
            ready: reason.is_none(),
            reason,
            queue_depth,
            queue_capacity,
        }
    }
}
