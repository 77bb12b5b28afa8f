//! Test doubles for the fetch pipeline.
//!
//! [`MockTransport`] answers requests from scripted replies keyed by url and
//! records every request it sees. [`RecordingLogger`] keeps every message it
//! receives, per level.
//!
//! ```
//! use easefetch::mock::{MockReply, MockTransport, RecordingLogger};
//! use easefetch::{predicate, DataFetch, FetchState};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let transport = MockTransport::new();
//! transport.expect("u", MockReply::reject("boom"));
//! let logger = RecordingLogger::new();
//!
//! let controller = DataFetch::new(
//!     Arc::new(transport.clone()),
//!     predicate(|_| true),
//!     Arc::new(logger.clone()),
//! );
//! controller.fetch("u").await.unwrap();
//!
//! assert_eq!(controller.result().state, FetchState::Rejected);
//! assert_eq!(logger.errors(), vec!["Fetch failed for request u with reason: boom"]);
//! # }
//! ```

use crate::{Logger, Request, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

/// A scripted answer for one request.
#[derive(Debug, Clone)]
pub struct MockReply {
    outcome: Result<TransportResponse, TransportError>,
    delay: Option<Duration>,
}

impl MockReply {
    pub fn respond(response: TransportResponse) -> Self {
        MockReply {
            outcome: Ok(response),
            delay: None,
        }
    }

    /// `200 OK` with `value` as JSON body.
    pub fn json(value: Value) -> Self {
        Self::respond(TransportResponse::new(200, "OK", value.to_string()))
    }

    /// `200 OK` with a raw body, useful for malformed payloads.
    pub fn text(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::respond(TransportResponse::new(200, "OK", body))
    }

    /// An empty response with the given status line.
    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        Self::respond(TransportResponse::new(status, status_text, Vec::<u8>::new()))
    }

    /// The transport fails with `reason`.
    pub fn reject(reason: impl ToString) -> Self {
        MockReply {
            outcome: Err(TransportError::new(reason)),
            delay: None,
        }
    }

    /// Holds the reply back for `delay` before answering.
    pub fn delayed(self, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..self
        }
    }
}

#[derive(Default)]
struct MockTransportInner {
    replies: HashMap<String, VecDeque<MockReply>>,
    requests: Vec<Request>,
}

/// In-memory [`Transport`]. Clones share scripted replies and recorded requests.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues `reply` for the next request to `url`. Replies for the same url
    /// are used in the order they were queued.
    pub fn expect(&self, url: impl Into<String>, reply: MockReply) {
        self.lock()
            .replies
            .entry(url.into())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: Request) -> Result<TransportResponse, TransportError> {
        let reply = {
            let mut inner = self.lock();
            inner.requests.push(request.clone());
            inner
                .replies
                .get_mut(&request.url)
                .and_then(VecDeque::pop_front)
        };

        let Some(reply) = reply else {
            return Err(TransportError::new(format!(
                "no mocked reply for {} {}",
                request.method, request.url
            )));
        };
        if let Some(delay) = reply.delay {
            sleep(delay).await;
        }
        reply.outcome
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Info,
    Log,
}

/// [`Logger`] that remembers every call. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    entries: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(entry_level, _)| *entry_level == level)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(LogLevel::Error)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Logger for RecordingLogger {
    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }

    fn log(&self, message: &str) {
        self.record(LogLevel::Log, message);
    }
}
