//! SMS notification delivery
//!
//! Two channels share one interface: the bulk JSON channel (primary, only
//! present when it initialized at startup) and the REST form channel
//! (fallback). The [`Dispatcher`] tries them in order.

mod account;
mod bulk;
mod dispatcher;
mod error;
mod rest;
mod types;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // Environment and SmsErrorKind are named by tests
pub use {
    account::{Account, Environment},
    error::{SmsError, SmsErrorKind},
};
pub use bulk::BulkSmsChannel;
pub use dispatcher::Dispatcher;
pub use rest::RestSmsChannel;
pub use types::*;

use async_trait::async_trait;

/// Common interface for SMS channels
#[async_trait]
pub trait SmsChannel: Send + Sync {
    /// Send one message to every recipient in a single call
    async fn send(&self, message: &str, recipients: &[String]) -> Result<SmsResponse, SmsError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
