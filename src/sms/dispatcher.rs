//! Primary-then-fallback notification dispatch

use super::{
    Account, BulkSmsChannel, DeliveryChannel, DeliveryResult, RestSmsChannel, SmsChannel,
    SmsError, SmsResponse,
};
use std::sync::Arc;
use std::time::Instant;

/// Detail reported when there is nobody to notify
pub const NO_RECIPIENTS: &str = "No recipients provided";

/// Routes alerts through the primary channel, falling back to the
/// secondary one. Channel availability is fixed at construction.
pub struct Dispatcher {
    primary: Option<Arc<dyn SmsChannel>>,
    fallback: Arc<dyn SmsChannel>,
}

impl Dispatcher {
    pub fn new(primary: Option<Arc<dyn SmsChannel>>, fallback: Arc<dyn SmsChannel>) -> Self {
        Self { primary, fallback }
    }

    /// Build both channels for an account.
    ///
    /// A primary channel that fails to initialize is logged and left out;
    /// only a fallback failure is fatal.
    pub fn from_account(account: &Account, primary_enabled: bool) -> Result<Self, SmsError> {
        let fallback: Arc<dyn SmsChannel> = Arc::new(RestSmsChannel::new(account.clone())?);

        let primary: Option<Arc<dyn SmsChannel>> = if primary_enabled {
            match BulkSmsChannel::initialize(account.clone()) {
                Ok(channel) => {
                    tracing::info!(channel = channel.name(), "Primary SMS channel initialized");
                    Some(Arc::new(channel))
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = e.kind.as_str(),
                        "Primary SMS channel initialization failed, using REST fallback only"
                    );
                    None
                }
            }
        } else {
            tracing::info!("Primary SMS channel disabled, using REST fallback only");
            None
        };

        Ok(Self::new(primary, fallback))
    }

    pub fn primary_available(&self) -> bool {
        self.primary.is_some()
    }

    /// Deliver `message` to `recipients`.
    ///
    /// Never fails outright: total failure is a `DeliveryResult` with
    /// `succeeded == false` and the last error as its detail.
    pub async fn dispatch(&self, message: &str, recipients: &[String]) -> DeliveryResult {
        if recipients.is_empty() {
            tracing::error!("SMS dispatch skipped: {NO_RECIPIENTS}");
            return DeliveryResult::failed(DeliveryChannel::None, NO_RECIPIENTS);
        }

        if let Some(primary) = &self.primary {
            match attempt(primary.as_ref(), message, recipients).await {
                Ok(response) => {
                    tracing::info!(
                        channel = primary.name(),
                        recipients = recipients.len(),
                        response = %response,
                        "SMS sent via primary channel"
                    );
                    return DeliveryResult::delivered(DeliveryChannel::Primary, &response);
                }
                Err(e) => {
                    tracing::warn!(
                        channel = primary.name(),
                        error = %e,
                        kind = e.kind.as_str(),
                        "Primary SMS channel failed, trying fallback"
                    );
                }
            }
        } else {
            tracing::debug!("Primary SMS channel unavailable, using fallback");
        }

        match attempt(self.fallback.as_ref(), message, recipients).await {
            Ok(response) => {
                tracing::info!(
                    channel = self.fallback.name(),
                    recipients = recipients.len(),
                    response = %response,
                    "SMS sent via fallback channel"
                );
                DeliveryResult::delivered(DeliveryChannel::Fallback, &response)
            }
            Err(e) => {
                tracing::error!(
                    channel = self.fallback.name(),
                    error = %e,
                    kind = e.kind.as_str(),
                    "Fallback SMS channel failed"
                );
                DeliveryResult::failed(DeliveryChannel::Fallback, e.to_string())
            }
        }
    }
}

async fn attempt(
    channel: &dyn SmsChannel,
    message: &str,
    recipients: &[String],
) -> Result<SmsResponse, SmsError> {
    let start = Instant::now();
    let result = channel.send(message, recipients).await;
    tracing::debug!(
        channel = channel.name(),
        duration_ms = %start.elapsed().as_millis(),
        ok = result.is_ok(),
        "SMS channel attempt finished"
    );
    result
}
