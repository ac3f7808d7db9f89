//! Test doubles for SMS channels
//!
//! [`MockSmsChannel`] replays queued results without I/O; [`TestSmsServer`]
//! is a local HTTP server standing in for the messaging API.

use super::{SmsChannel, SmsError, SmsResponse};
use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

// ============================================================================
// Mock SMS Channel
// ============================================================================

/// Mock channel that returns queued results and records every call
pub struct MockSmsChannel {
    name: &'static str,
    results: Mutex<VecDeque<Result<SmsResponse, SmsError>>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockSmsChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_response(&self, response: SmsResponse) {
        self.results.lock().unwrap().push_back(Ok(response));
    }

    pub fn queue_error(&self, error: SmsError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    /// Recorded `(message, recipients)` pairs
    pub fn recorded_calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsChannel for MockSmsChannel {
    async fn send(&self, message: &str, recipients: &[String]) -> Result<SmsResponse, SmsError> {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_string(), recipients.to_vec()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SmsError::unavailable("No mock result queued")))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

// ============================================================================
// Local messaging API
// ============================================================================

/// A request captured by [`TestSmsServer`]
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// HTTP server answering every request with a fixed status and body
pub struct TestSmsServer {
    addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl TestSmsServer {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let captured = Arc::new(Mutex::new(Vec::new()));

        let sink = captured.clone();
        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, request_body: String| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(CapturedRequest {
                    path: uri.path().to_string(),
                    headers,
                    body: request_body,
                });
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (status, body)
            }
        });

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            captured,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

impl Drop for TestSmsServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
