//! Pure USSD input interpretation
//!
//! Given the same input and context this always produces the same output,
//! with no I/O side effects.

use super::{MenuState, Report, ReportKind, SessionContext};

/// Separator the aggregator puts between menu selections
pub const DELIMITER: char = '*';

/// Location recorded when the reporter submits an empty one
pub const UNKNOWN_LOCATION: &str = "Unknown location";

const ROOT_MENU_PROMPT: &str = "Wildlife Guardian\n1. Report Poaching\n2. Emergency Wildlife Help";
const POACHING_LOCATION_PROMPT: &str = "Enter location (village/landmark/coords):";
const EMERGENCY_LOCATION_PROMPT: &str = "Enter location for emergency (village/landmark/coords):";
const COMPLETED_PROMPT: &str = "Thank you, rangers have been alerted. Stay safe.";
const INVALID_PROMPT: &str = "Invalid input. Try again.";

/// Result of interpreting one USSD turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub state: MenuState,
    pub prompt: &'static str,
    /// Set only when the turn completes a report
    pub report: Option<Report>,
}

impl Interpretation {
    fn prompt(state: MenuState, prompt: &'static str) -> Self {
        Self {
            state,
            prompt,
            report: None,
        }
    }

    fn completed(report: Report) -> Self {
        Self {
            state: MenuState::Completed,
            prompt: COMPLETED_PROMPT,
            report: Some(report),
        }
    }

    fn invalid() -> Self {
        Self::prompt(MenuState::Invalid, INVALID_PROMPT)
    }
}

/// Interpret the accumulated USSD input for one turn.
///
/// Only the first delimiter splits the option from the location, so a
/// location containing `*` is kept whole.
pub fn interpret(input: &str, context: &SessionContext) -> Interpretation {
    let text = input.trim();

    match text {
        "" => Interpretation::prompt(MenuState::RootMenu, ROOT_MENU_PROMPT),
        "1" => Interpretation::prompt(
            MenuState::AwaitingPoachingLocation,
            POACHING_LOCATION_PROMPT,
        ),
        "2" => Interpretation::prompt(
            MenuState::AwaitingEmergencyLocation,
            EMERGENCY_LOCATION_PROMPT,
        ),
        _ => {
            let Some((option, rest)) = text.split_once(DELIMITER) else {
                return Interpretation::invalid();
            };
            let Some(kind) = ReportKind::from_option(option) else {
                return Interpretation::invalid();
            };

            let location = match rest.trim() {
                "" => UNKNOWN_LOCATION,
                location => location,
            };

            Interpretation::completed(Report {
                reporter: context.phone_number.clone(),
                kind,
                location: location.to_string(),
                timestamp: context.now,
            })
        }
    }
}
