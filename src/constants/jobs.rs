/// Query parameter read by the greeting work function.
pub const NAME_PARAMETER: &str = "Name";

/// Prefix of a successful greeting response body.
pub const GREETING_PREFIX: &str = "Hello, ";

/// Body of the 400 response for a missing or empty name.
pub const MISSING_NAME_MESSAGE: &str = "Name parameter is missing or empty";

pub const QUEUE_FULL_MESSAGE: &str = "Job queue is full";

pub const QUEUE_CLOSED_MESSAGE: &str = "Job queue is shutting down";

/// Body of the 500 response sent when a job finishes without answering.
pub const JOB_DROPPED_MESSAGE: &str = "Job finished without producing a response";

/// Body of the 500 response sent when the work function panics.
pub const JOB_PANICKED_MESSAGE: &str = "Internal Server Error";
