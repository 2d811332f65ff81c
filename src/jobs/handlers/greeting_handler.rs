//! Default work function: greets the caller by name.
use actix_web::http::StatusCode;
use log::{info, warn};

use crate::{
    constants::{GREETING_PREFIX, MISSING_NAME_MESSAGE, NAME_PARAMETER},
    jobs::{JobError, JobPayload, ResultSink, WorkFunction},
};

/// Answers `Hello, <Name>` or `400` when `Name` is missing or empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingHandler;

impl WorkFunction for GreetingHandler {
    fn name(&self) -> &str {
        "greeting"
    }

    fn execute(&self, payload: &JobPayload, sink: &mut dyn ResultSink) -> Result<(), JobError> {
        let Some(name) = payload.get(NAME_PARAMETER).filter(|name| !name.is_empty()) else {
            warn!("Error: {}", MISSING_NAME_MESSAGE);
            sink.write_error(StatusCode::BAD_REQUEST, MISSING_NAME_MESSAGE)?;
            return Err(JobError::Validation(MISSING_NAME_MESSAGE.to_string()));
        };

        let greeting = format!("{GREETING_PREFIX}{name}");
        // flush first so streaming transports commit the response head
        sink.flush()?;
        sink.write(greeting.as_bytes())?;
        sink.flush()?;

        info!("Response sent: {}", greeting);
        Ok(())
    }
}
