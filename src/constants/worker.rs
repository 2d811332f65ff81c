/// Number of workers started when `WORKER_COUNT` is not set.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Prefix for worker thread names; the worker index is appended.
pub const WORKER_THREAD_NAME_PREFIX: &str = "worker";

// Capacity 0 in the environment means the queue is unbounded.
pub const UNBOUNDED_QUEUE_CAPACITY: usize = 0;

/// Default overflow policy for a bounded queue.
pub const DEFAULT_QUEUE_OVERFLOW_POLICY: &str = "reject";
