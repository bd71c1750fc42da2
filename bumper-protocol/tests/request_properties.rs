//! Property tests for drive request parsing

use bumper_core::state::Command;
use bumper_protocol::{clamp_command, param_value, DriveRequest, MAX_COMMAND};
use proptest::prelude::*;

proptest! {
    #[test]
    fn integer_values_parse_exactly(value in any::<i32>()) {
        let query = format!("ud={}&lr=0", value);
        prop_assert_eq!(param_value(&query, "ud"), Some(value));
    }

    #[test]
    fn request_values_are_always_in_range(ud in any::<i32>(), lr in any::<i32>()) {
        let line = format!("GET /drive?ud={}&lr={} HTTP/1.1", ud, lr);
        let request = DriveRequest::parse(&line).unwrap();
        prop_assert_eq!(request.throttle, Some(clamp_command(ud)));
        prop_assert_eq!(request.turn, Some(clamp_command(lr)));
        prop_assert!(request.throttle.unwrap().abs() <= MAX_COMMAND);
        prop_assert!(request.turn.unwrap().abs() <= MAX_COMMAND);
    }

    #[test]
    fn parse_never_panics(line in ".*") {
        let _ = DriveRequest::parse(&line);
    }

    #[test]
    fn param_lookup_never_panics(query in ".*", name in "[a-z]{1,4}") {
        let _ = param_value(&query, &name);
    }

    #[test]
    fn missing_axis_keeps_previous_value(
        throttle in -255i32..=255,
        turn in -255i32..=255,
        new_turn in -255i32..=255,
    ) {
        let mut command = Command::new(throttle, turn);
        let line = format!("/drive?lr={}", new_turn);
        DriveRequest::parse(&line).unwrap().apply(&mut command);
        prop_assert_eq!(command, Command::new(throttle, new_turn));
    }
}
