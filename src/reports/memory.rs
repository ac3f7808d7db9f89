//! Volatile in-process report store

use super::{ReportSink, SinkError};
use crate::session::Report;
use async_trait::async_trait;
use std::sync::Mutex;

/// Mutex-guarded list of reports, lost on restart
#[derive(Default)]
pub struct MemoryReportSink {
    reports: Mutex<Vec<Report>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportSink for MemoryReportSink {
    async fn append(&self, report: Report) -> Result<(), SinkError> {
        self.reports
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .push(report);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Report>, SinkError> {
        Ok(self.reports.lock().map_err(|_| SinkError::Poisoned)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ReportKind;
    use chrono::Utc;
    use std::sync::Arc;

    fn report(location: &str) -> Report {
        Report {
            reporter: "+254700000001".to_string(),
            kind: ReportKind::Poaching,
            location: location.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_lists_in_append_order() {
        let sink = MemoryReportSink::new();
        assert!(sink.list().await.unwrap().is_empty());

        sink.append(report("A")).await.unwrap();
        sink.append(report("B")).await.unwrap();

        let locations: Vec<String> = sink.list().await.unwrap().into_iter().map(|r| r.location).collect();
        assert_eq!(locations, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let sink = Arc::new(MemoryReportSink::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let sink = sink.clone();
                tokio::spawn(async move { sink.append(report(&format!("site-{i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(sink.list().await.unwrap().len(), 32);
    }
}
