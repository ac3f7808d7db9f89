//! Property-based tests for the session interpreter

use super::interpreter::{DELIMITER, UNKNOWN_LOCATION};
use super::*;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn arb_context() -> impl Strategy<Value = SessionContext> {
    ("\\+[0-9]{9,12}", 0i64..2_000_000_000).prop_map(|(phone, secs)| {
        SessionContext::new(phone, Utc.timestamp_opt(secs, 0).unwrap())
    })
}

fn arb_option() -> impl Strategy<Value = (&'static str, ReportKind)> {
    prop_oneof![
        Just(("1", ReportKind::Poaching)),
        Just(("2", ReportKind::Emergency)),
    ]
}

proptest! {
    #[test]
    fn prop_completed_report_matches_option_and_location(
        (option, kind) in arb_option(),
        rest in "\\PC{0,40}",
        ctx in arb_context(),
    ) {
        let input = format!("{option}{DELIMITER}{rest}");
        let result = interpret(&input, &ctx);

        prop_assert_eq!(result.state, MenuState::Completed);
        let report = result.report.expect("completed turn must carry a report");
        prop_assert_eq!(report.kind, kind);

        let expected = match rest.trim() {
            "" => UNKNOWN_LOCATION,
            location => location,
        };
        prop_assert_eq!(report.location.as_str(), expected);
        prop_assert_eq!(report.reporter, ctx.phone_number);
        prop_assert_eq!(report.timestamp, ctx.now);
    }

    #[test]
    fn prop_interpret_is_deterministic(input in "[0-9*#a-z ]{0,12}", ctx in arb_context()) {
        prop_assert_eq!(interpret(&input, &ctx), interpret(&input, &ctx));
    }

    #[test]
    fn prop_unrecognised_input_is_invalid(input in "[0-9*#a-zA-Z]{1,12}", ctx in arb_context()) {
        prop_assume!(!matches!(input.as_str(), "1" | "2"));
        prop_assume!(!input.starts_with("1*") && !input.starts_with("2*"));

        let result = interpret(&input, &ctx);
        prop_assert_eq!(result.state, MenuState::Invalid);
        prop_assert!(result.report.is_none());
    }

    #[test]
    fn prop_report_only_on_completion(input in "[0-9*# a-z]{0,12}", ctx in arb_context()) {
        let result = interpret(&input, &ctx);
        prop_assert_eq!(result.report.is_some(), result.state == MenuState::Completed);
    }
}
