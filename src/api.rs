//! HTTP API for the USSD gateway

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::reports::ReportSink;
use crate::sms::{Dispatcher, RecipientList};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<dyn ReportSink>,
    pub dispatcher: Arc<Dispatcher>,
    pub recipients: Arc<RecipientList>,
}

impl AppState {
    pub fn new(
        reports: Arc<dyn ReportSink>,
        dispatcher: Dispatcher,
        recipients: RecipientList,
    ) -> Self {
        Self {
            reports,
            dispatcher: Arc::new(dispatcher),
            recipients: Arc::new(recipients),
        }
    }
}
