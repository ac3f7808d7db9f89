//! Report storage
//!
//! Reports are append-only and listed back in creation order.

mod memory;
mod sqlite;

pub use memory::MemoryReportSink;
pub use sqlite::SqliteReportSink;

use crate::session::Report;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Corrupt report row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
    #[error("Report store lock poisoned")]
    Poisoned,
}

/// Destination for finalized reports
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Store a report after any previously appended ones
    async fn append(&self, report: Report) -> Result<(), SinkError>;

    /// All reports, oldest first
    async fn list(&self) -> Result<Vec<Report>, SinkError>;
}
