//! Job queue core: jobs, the shared queue, producers, sinks, and the worker pool.

mod queue;
pub use queue::*;

mod workers;
pub use workers::*;

mod job_producer;
pub use job_producer::*;

mod job;
pub use job::*;

mod sink;
pub use sink::*;

mod handlers;
pub use handlers::*;
