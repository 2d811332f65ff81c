//! Constants shared across the service.

mod jobs;
pub use jobs::*;

mod logging;
pub use logging::*;

mod server;
pub use server::*;

mod worker;
pub use worker::*;
