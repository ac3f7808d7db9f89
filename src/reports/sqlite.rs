//! SQLite-backed report store

use super::{ReportSink, SinkError};
use crate::session::{Report, ReportKind};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    reporter TEXT NOT NULL,
    report_type TEXT NOT NULL,
    location TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

/// Thread-safe SQLite report store
#[derive(Clone)]
pub struct SqliteReportSink {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteReportSink {
    /// Open or create the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> Result<Self, SinkError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SinkError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl ReportSink for SqliteReportSink {
    async fn append(&self, report: Report) -> Result<(), SinkError> {
        let conn = self.conn.lock().map_err(|_| SinkError::Poisoned)?;
        conn.execute(
            "INSERT INTO reports (reporter, report_type, location, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                report.reporter,
                report.kind.as_str(),
                report.location,
                report.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ],
        )?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Report>, SinkError> {
        let conn = self.conn.lock().map_err(|_| SinkError::Poisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, reporter, report_type, location, created_at FROM reports ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut reports = Vec::new();
        for row in rows {
            let (id, reporter, report_type, location, created_at) = row?;
            let kind: ReportKind = report_type
                .parse()
                .map_err(|reason| SinkError::Corrupt { id, reason })?;
            let timestamp = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| SinkError::Corrupt {
                    id,
                    reason: format!("bad timestamp {created_at:?}: {e}"),
                })?
                .with_timezone(&Utc);

            reports.push(Report {
                reporter,
                kind,
                location,
                timestamp,
            });
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report(kind: ReportKind, location: &str) -> Report {
        Report {
            reporter: "+254700000001".to_string(),
            kind,
            location: location.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_append_and_list_round_trip() {
        let sink = SqliteReportSink::open_in_memory().unwrap();

        let first = report(ReportKind::Poaching, "Riverside Camp");
        let second = report(ReportKind::Emergency, "Unknown location");
        sink.append(first.clone()).await.unwrap();
        sink.append(second.clone()).await.unwrap();

        assert_eq!(sink.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_reports_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.db");

        let stored = Report {
            reporter: "+254700000009".to_string(),
            kind: ReportKind::Emergency,
            location: "Camp*North".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
        };
        {
            let sink = SqliteReportSink::open(&path).unwrap();
            sink.append(stored.clone()).await.unwrap();
        }

        let reopened = SqliteReportSink::open(&path).unwrap();
        assert_eq!(reopened.list().await.unwrap(), vec![stored]);
    }

    #[tokio::test]
    async fn test_corrupt_type_is_reported() {
        let sink = SqliteReportSink::open_in_memory().unwrap();
        sink.conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO reports (reporter, report_type, location, created_at)
                 VALUES ('x', 'Flood', 'y', '2024-05-01T08:30:00Z')",
                [],
            )
            .unwrap();

        let err = sink.list().await.unwrap_err();
        assert!(matches!(err, SinkError::Corrupt { id: 1, .. }));
    }
}
