use chrono::Utc;
use std::{collections::HashMap, fmt};
use uuid::Uuid;

use super::ResultSink;

/// Parsed request parameters carried by a job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPayload {
    params: HashMap<String, String>,
}

impl JobPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Returns the value of `name`, if the request carried it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for JobPayload {
    fn from(params: HashMap<String, String>) -> Self {
        Self { params }
    }
}

/// Builds a payload from query pairs in request order. When a name repeats,
/// the first value is kept.
impl FromIterator<(String, String)> for JobPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = HashMap::new();
        for (name, value) in pairs {
            params.entry(name).or_insert(value);
        }
        Self { params }
    }
}

/// One unit of work: the request payload plus the sink its result goes to.
///
/// A job is moved into the queue on push and moved out to exactly one worker
/// on pop, so it is never reachable from two workers at once.
pub struct Job {
    job_id: String,
    timestamp: String,
    payload: JobPayload,
    sink: Box<dyn ResultSink>,
}

impl Job {
    pub fn new(payload: JobPayload, sink: Box<dyn ResultSink>) -> Self {
        Self {
            job_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp().to_string(),
            payload,
            sink,
        }
    }

    pub fn id(&self) -> &str {
        &self.job_id
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn payload(&self) -> &JobPayload {
        &self.payload
    }

    pub fn sink_mut(&mut self) -> &mut dyn ResultSink {
        self.sink.as_mut()
    }

    /// Borrows the payload and the sink at the same time, for running the job.
    pub fn parts_mut(&mut self) -> (&JobPayload, &mut dyn ResultSink) {
        (&self.payload, self.sink.as_mut())
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("job_id", &self.job_id)
            .field("timestamp", &self.timestamp)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Lifecycle of a job. There are no retries, so `Failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Created,
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_final(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
