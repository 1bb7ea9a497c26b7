//! Mock implementations for testing.
//!
//! Provides a mock transport, a recording logger and a pre-wired client so
//! code built on this crate can be tested without a running service.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::MultivizClient;
use crate::observability::{LogLevel, Logger};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Decodes the request body as JSON.
    pub fn json_body(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        Self {
            status: 200,
            body: serde_json::to_vec(value).unwrap_or_default(),
        }
    }

    /// Creates an error response shaped `{"detail": "<message>"}`.
    pub fn detail(status: u16, message: &str) -> Self {
        Self::json(&serde_json::json!({ "detail": message })).with_status(status)
    }

    /// Creates a plain text response.
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    /// Creates a response without a body.
    pub fn empty(status: u16) -> Self {
        Self::text(status, "")
    }

    /// Sets the status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

enum Outcome {
    Respond(MockResponse),
    Fail(TransportError),
}

/// Mock HTTP transport replaying queued outcomes in order.
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a response.
    pub fn queue(&self, response: MockResponse) {
        lock(&self.outcomes).push_back(Outcome::Respond(response));
    }

    /// Queues a transport failure.
    pub fn queue_failure(&self, error: TransportError) {
        lock(&self.outcomes).push_back(Outcome::Fail(error));
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            path: request.path,
            query: request.query,
            headers: request.headers,
            body: request.body,
        });

        match lock(&self.outcomes).pop_front() {
            Some(Outcome::Respond(response)) => Ok(HttpResponse {
                status: response.status,
                body: response.body,
            }),
            Some(Outcome::Fail(error)) => Err(error),
            None => Err(TransportError::InvalidResponse {
                message: "No mock response configured".to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

/// A log line captured by [`RecordingLogger`].
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Level.
    pub level: LogLevel,
    /// Message.
    pub message: String,
    /// Context fields.
    pub context: HashMap<String, String>,
}

/// Logger that keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    /// Creates an empty recording logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured lines.
    pub fn entries(&self) -> Vec<LogEntry> {
        lock(&self.entries).clone()
    }

    /// Returns the captured lines at `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        lock(&self.entries)
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, message: &str, context: Option<&HashMap<String, String>>) {
        lock(&self.entries).push(LogEntry {
            level,
            message: message.to_string(),
            context: context.cloned().unwrap_or_default(),
        });
    }
}

/// A client wired to a [`MockTransport`] and a [`RecordingLogger`].
pub struct MockClient {
    /// The client under test.
    pub client: MultivizClient,
    /// Transport receiving the client's requests.
    pub transport: Arc<MockTransport>,
    /// Logger receiving the client's log lines.
    pub logger: Arc<RecordingLogger>,
}

impl MockClient {
    /// Creates a mock client.
    ///
    /// # Panics
    ///
    /// Never in practice: the built-in configuration is valid.
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::new());
        let logger = Arc::new(RecordingLogger::new());

        let client = MultivizClient::builder()
            .base_url("https://multiviz.test")
            .api_key("mv_test_key")
            .transport(Arc::clone(&transport) as Arc<dyn HttpTransport>)
            .logger(Arc::clone(&logger) as Arc<dyn Logger>)
            .build()
            .unwrap_or_else(|e| panic!("mock client configuration rejected: {}", e));

        Self {
            client,
            transport,
            logger,
        }
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClient")
            .field("transport", &self.transport)
            .finish()
    }
}
