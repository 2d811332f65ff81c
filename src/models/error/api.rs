use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::{
    constants::{QUEUE_CLOSED_MESSAGE, QUEUE_FULL_MESSAGE},
    jobs::JobProducerError,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::InternalError(msg) | ApiError::ServiceUnavailable(msg) => msg.clone(),
        };
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(message)
    }
}

impl From<&JobProducerError> for ApiError {
    fn from(error: &JobProducerError) -> Self {
        match error {
            JobProducerError::QueueFull { .. } => {
                ApiError::ServiceUnavailable(QUEUE_FULL_MESSAGE.to_string())
            }
            JobProducerError::QueueClosed { .. } => {
                ApiError::ServiceUnavailable(QUEUE_CLOSED_MESSAGE.to_string())
            }
        }
    }
}
