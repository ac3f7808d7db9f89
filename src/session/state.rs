//! Session state and report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu position derived from the accumulated USSD input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    /// Initial menu, only reachable from empty input
    RootMenu,
    AwaitingPoachingLocation,
    AwaitingEmergencyLocation,
    /// Report filed; the session ends
    Completed,
    /// Unrecognised input; the session ends
    Invalid,
}

impl MenuState {
    /// Terminal states end the USSD session (`END` responses)
    pub fn is_terminal(self) -> bool {
        matches!(self, MenuState::Completed | MenuState::Invalid)
    }
}

/// Kind of incident being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Poaching,
    Emergency,
}

impl ReportKind {
    /// Map a root-menu option to the report it files
    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "1" => Some(ReportKind::Poaching),
            "2" => Some(ReportKind::Emergency),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Poaching => "Poaching",
            ReportKind::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Poaching" => Ok(ReportKind::Poaching),
            "Emergency" => Ok(ReportKind::Emergency),
            other => Err(format!("unknown report type: {other}")),
        }
    }
}

/// A filed incident report. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub reporter: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

impl Report {
    /// SMS text sent to rangers for this report
    pub fn alert_message(&self) -> String {
        format!(
            "ALERT: {} reported at {} by {}",
            self.kind, self.location, self.reporter
        )
    }
}

/// Per-request inputs the interpreter needs besides the USSD text.
///
/// Passing the clock in keeps `interpret` deterministic.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub phone_number: String,
    pub now: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(phone_number: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            phone_number: phone_number.into(),
            now,
        }
    }
}
