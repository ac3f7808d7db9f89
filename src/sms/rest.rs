//! Direct REST messaging channel
//!
//! Posts a form to the messaging endpoint. Used as the fallback path, so it
//! has no prerequisites beyond an HTTP client.

use super::{Account, SmsChannel, SmsError, SmsResponse};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

pub const MESSAGING_PATH: &str = "/version1/messaging";

/// Upper bound on a single fallback request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// REST SMS channel
pub struct RestSmsChannel {
    client: Client,
    account: Account,
    endpoint: String,
}

impl RestSmsChannel {
    pub fn new(account: Account) -> Result<Self, SmsError> {
        Self::with_timeout(account, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(account: Account, timeout: Duration) -> Result<Self, SmsError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SmsError::unavailable(format!("Failed to create HTTP client: {e}")))?;
        let endpoint = account.endpoint(MESSAGING_PATH);

        Ok(Self {
            client,
            account,
            endpoint,
        })
    }
}

#[derive(Debug, Serialize)]
struct RestSmsForm<'a> {
    username: &'a str,
    to: String,
    message: &'a str,
}

#[async_trait]
impl SmsChannel for RestSmsChannel {
    async fn send(&self, message: &str, recipients: &[String]) -> Result<SmsResponse, SmsError> {
        let form = RestSmsForm {
            username: &self.account.username,
            to: recipients.join(","),
            message,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Apikey", &self.account.api_key)
            .header(ACCEPT, "application/json")
            .form(&form)
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

        Ok(SmsResponse::from_body(body))
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}
