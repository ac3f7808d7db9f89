//! SMS delivery types

use serde_json::Value;
use std::fmt;

/// Ordered, de-duplicated list of alert recipients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientList(Vec<String>);

impl RecipientList {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for number in numbers {
            let number = number.as_ref().trim();
            if !number.is_empty() && !list.iter().any(|n| n == number) {
                list.push(number.to_string());
            }
        }
        Self(list)
    }

    /// Parse a comma-separated list, dropping blank entries
    pub fn parse(value: &str) -> Self {
        Self::new(value.split(','))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body returned by a messaging API, parsed when it is JSON
#[derive(Debug, Clone, PartialEq)]
pub enum SmsResponse {
    Json(Value),
    Text(String),
}

impl SmsResponse {
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => SmsResponse::Json(value),
            Err(_) => SmsResponse::Text(body),
        }
    }
}

impl fmt::Display for SmsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmsResponse::Json(value) => write!(f, "{value}"),
            SmsResponse::Text(text) => f.write_str(text),
        }
    }
}

/// Which channel produced a delivery result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryChannel {
    Primary,
    Fallback,
    /// No channel was attempted
    None,
}

impl DeliveryChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryChannel::Primary => "primary",
            DeliveryChannel::Fallback => "fallback",
            DeliveryChannel::None => "none",
        }
    }
}

/// Outcome of a dispatch. Failures always carry a detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryResult {
    pub succeeded: bool,
    pub channel: DeliveryChannel,
    /// Normalized response on success, error text on failure
    pub detail: String,
}

impl DeliveryResult {
    pub fn delivered(channel: DeliveryChannel, response: &SmsResponse) -> Self {
        Self {
            succeeded: true,
            channel,
            detail: response.to_string(),
        }
    }

    pub fn failed(channel: DeliveryChannel, detail: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            channel,
            detail: detail.into(),
        }
    }
}
