//! Result sinks: where a job delivers its output.
//!
//! - [`HttpResultSink`] streams into an actix response held by [`PendingResponse`]
//! - [`BufferSink`] records the response in memory
use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use bytes::Bytes;
use futures::{channel::mpsc, StreamExt};
use parking_lot::Mutex;
use std::{convert::Infallible, sync::Arc};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::constants::JOB_DROPPED_MESSAGE;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Response receiver is closed")]
    Closed,
    #[error("Response headers were already sent")]
    HeadersAlreadySent,
    #[error("Transport error: {0}")]
    Io(String),
}

/// Destination for the output of a single job.
pub trait ResultSink: Send {
    /// Writes a chunk of the response body. The first write commits a `200 OK` head.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError>;

    /// Answers with an error status and message instead of a body.
    ///
    /// Fails with [`SinkError::HeadersAlreadySent`] once the head has been committed.
    fn write_error(&mut self, status: StatusCode, message: &str) -> Result<(), SinkError>;

    /// Pushes buffered output to the client. No-op for transports that don't stream.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[derive(Debug)]
enum ResponseHead {
    Streaming(StatusCode),
    Complete { status: StatusCode, message: String },
}

/// Sink half of an HTTP response; owned by the job.
#[derive(Debug)]
pub struct HttpResultSink {
    head_tx: Option<oneshot::Sender<ResponseHead>>,
    body_tx: Option<mpsc::UnboundedSender<Bytes>>,
}

/// Request half of an HTTP response; awaited by the route handler.
#[derive(Debug)]
pub struct PendingResponse {
    head_rx: oneshot::Receiver<ResponseHead>,
    body_rx: mpsc::UnboundedReceiver<Bytes>,
}

/// Creates a connected sink/response pair.
pub fn http_sink_channel() -> (HttpResultSink, PendingResponse) {
    let (head_tx, head_rx) = oneshot::channel();
    let (body_tx, body_rx) = mpsc::unbounded();
    (
        HttpResultSink {
            head_tx: Some(head_tx),
            body_tx: Some(body_tx),
        },
        PendingResponse { head_rx, body_rx },
    )
}

impl ResultSink for HttpResultSink {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError> {
        self.flush()?;
        let body_tx = self.body_tx.as_ref().ok_or(SinkError::Closed)?;
        body_tx
            .unbounded_send(Bytes::copy_from_slice(bytes))
            .map_err(|_| SinkError::Closed)?;
        Ok(bytes.len())
    }

    fn write_error(&mut self, status: StatusCode, message: &str) -> Result<(), SinkError> {
        let head_tx = self.head_tx.take().ok_or(SinkError::HeadersAlreadySent)?;
        // error responses carry their body in the head
        self.body_tx = None;
        head_tx
            .send(ResponseHead::Complete {
                status,
                message: message.to_string(),
            })
            .map_err(|_| SinkError::Closed)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if let Some(head_tx) = self.head_tx.take() {
            head_tx
                .send(ResponseHead::Streaming(StatusCode::OK))
                .map_err(|_| SinkError::Closed)?;
        }
        Ok(())
    }
}

impl PendingResponse {
    /// Waits for the job to commit a response head and builds the HTTP response.
    ///
    /// A streaming body ends when the job drops its sink. A sink dropped before
    /// committing anything yields `500 Internal Server Error`.
    pub async fn into_response(self) -> HttpResponse {
        let PendingResponse { head_rx, body_rx } = self;
        match head_rx.await {
            Ok(ResponseHead::Streaming(status)) => HttpResponse::build(status)
                .content_type(ContentType::plaintext())
                .streaming(body_rx.map(Ok::<Bytes, Infallible>)),
            Ok(ResponseHead::Complete { status, message }) => HttpResponse::build(status)
                .content_type(ContentType::plaintext())
                .body(message),
            Err(_) => HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body(JOB_DROPPED_MESSAGE),
        }
    }
}

#[derive(Debug, Default)]
struct BufferedResponse {
    status: Option<StatusCode>,
    body: Vec<u8>,
    flushes: usize,
    fail_writes: bool,
}

/// In-memory sink. Clones share the same buffer, so a caller can keep a clone
/// to inspect what a job wrote.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    inner: Arc<Mutex<BufferedResponse>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose transport is broken: every write and flush fails.
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.inner.lock().fail_writes = true;
        sink
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.inner.lock().status
    }

    pub fn body(&self) -> Vec<u8> {
        self.inner.lock().body.clone()
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().body).into_owned()
    }

    pub fn flush_count(&self) -> usize {
        self.inner.lock().flushes
    }
}

impl ResultSink for BufferSink {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(SinkError::Io("broken pipe".to_string()));
        }
        inner.status.get_or_insert(StatusCode::OK);
        inner.body.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn write_error(&mut self, status: StatusCode, message: &str) -> Result<(), SinkError> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(SinkError::Io("broken pipe".to_string()));
        }
        if inner.status.is_some() {
            return Err(SinkError::HeadersAlreadySent);
        }
        inner.status = Some(status);
        inner.body = message.as_bytes().to_vec();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(SinkError::Io("broken pipe".to_string()));
        }
        inner.flushes += 1;
        inner.status.get_or_insert(StatusCode::OK);
        Ok(())
    }
}
