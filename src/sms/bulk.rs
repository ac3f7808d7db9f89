//! Bulk JSON messaging channel
//!
//! The primary path. Sends one JSON request for all recipients and checks
//! that the provider accepted at least one of them.

use super::{Account, SmsChannel, SmsError, SmsResponse};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const BULK_MESSAGING_PATH: &str = "/version1/messaging/bulk";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Status the provider reports for an accepted recipient
const ACCEPTED_STATUS: &str = "Success";

/// Bulk SMS channel
pub struct BulkSmsChannel {
    client: Client,
    account: Account,
    endpoint: String,
}

impl BulkSmsChannel {
    /// Initialize the channel, validating its prerequisites.
    ///
    /// Failure here means the primary path is unavailable for the life of
    /// the process.
    pub fn initialize(account: Account) -> Result<Self, SmsError> {
        if account.username.trim().is_empty() {
            return Err(SmsError::unavailable("Account username is empty"));
        }
        if account.api_key.trim().is_empty() {
            return Err(SmsError::unavailable("API key is empty"));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SmsError::unavailable(format!("Failed to create HTTP client: {e}")))?;
        let endpoint = account.endpoint(BULK_MESSAGING_PATH);

        Ok(Self {
            client,
            account,
            endpoint,
        })
    }

    /// Check the provider's per-recipient verdicts
    fn validate_response(value: &Value) -> Result<(), SmsError> {
        let parsed: BulkResponse = serde_json::from_value(value.clone())
            .map_err(|e| SmsError::malformed(format!("Unexpected response shape: {e} - body: {value}")))?;
        let data = parsed.sms_message_data;

        let accepted = data
            .recipients
            .iter()
            .filter(|r| r.status == ACCEPTED_STATUS)
            .count();

        if accepted == 0 {
            let statuses: Vec<String> = data
                .recipients
                .iter()
                .map(|r| format!("{}: {}", r.number, r.status))
                .collect();
            return Err(SmsError::rejected(format!(
                "No recipients accepted: {} [{}]",
                data.message,
                statuses.join(", ")
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl SmsChannel for BulkSmsChannel {
    async fn send(&self, message: &str, recipients: &[String]) -> Result<SmsResponse, SmsError> {
        let request = BulkRequest {
            username: &self.account.username,
            message,
            phone_numbers: recipients,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("apiKey", &self.account.api_key)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SmsError::from_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SmsError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(SmsError::from_status(status, &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| SmsError::malformed(format!("Failed to parse response: {e} - body: {body}")))?;
        Self::validate_response(&value)?;

        Ok(SmsResponse::Json(value))
    }

    fn name(&self) -> &'static str {
        "bulk"
    }
}

// Bulk messaging API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkRequest<'a> {
    username: &'a str,
    message: &'a str,
    phone_numbers: &'a [String],
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(rename = "SMSMessageData")]
    sms_message_data: SmsMessageData,
}

#[derive(Debug, Deserialize)]
struct SmsMessageData {
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Recipients", default)]
    recipients: Vec<BulkRecipient>,
}

#[derive(Debug, Deserialize)]
struct BulkRecipient {
    #[serde(default)]
    number: String,
    status: String,
}
