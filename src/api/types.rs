//! API request and response types

use crate::session::Interpretation;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Form fields posted by the USSD aggregator on every turn
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssdRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub service_code: String,
    #[serde(default)]
    pub phone_number: String,
    /// Accumulated input since the session started
    #[serde(default)]
    pub text: String,
}

/// Plain-text USSD reply.
///
/// `CON` keeps the session open for another turn, `END` closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UssdResponse {
    pub continues: bool,
    pub text: String,
}

impl UssdResponse {
    pub fn body(&self) -> String {
        let prefix = if self.continues { "CON" } else { "END" };
        format!("{prefix} {}", self.text)
    }
}

impl From<&Interpretation> for UssdResponse {
    fn from(outcome: &Interpretation) -> Self {
        Self {
            continues: !outcome.state.is_terminal(),
            text: outcome.prompt.to_string(),
        }
    }
}

impl IntoResponse for UssdResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/plain")], self.body()).into_response()
    }
}

/// Response for the health check
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether the primary SMS channel initialized at startup
    pub primary_channel: bool,
    pub recipients: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
