//! USSD session interpreter
//!
//! The aggregator resends the full accumulated input on every turn, so the
//! menu state is recomputed from the input string alone. Nothing is stored
//! between turns.

mod interpreter;
pub mod state;

#[cfg(test)]
mod proptests;

pub use interpreter::{interpret, Interpretation};
pub use state::{MenuState, Report, ReportKind, SessionContext};
