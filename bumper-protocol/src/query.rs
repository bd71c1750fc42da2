//! Query-string parameter extraction
//!
//! Query format: `name=value` pairs separated by `&`, e.g. `ud=120&lr=-40`.
//! Values are decimal integers; anything after the digits is ignored.

/// Largest command magnitude accepted by the vehicle
pub const MAX_COMMAND: i32 = 255;

/// Look up an integer parameter in a query string
///
/// Returns `None` if the parameter is absent. A parameter that is present
/// but not numeric yields `Some(0)`. Parsing stops at the first space, so a
/// query still followed by ` HTTP/1.1` is accepted as well.
pub fn param_value(query: &str, name: &str) -> Option<i32> {
    let query = query.split(' ').next().unwrap_or("");

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| parse_int(value))
}

/// Lenient decimal integer conversion
///
/// Accepts leading whitespace, an optional sign and leading digits. Input
/// without digits converts to 0 and out-of-range values saturate.
pub fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i32 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = (byte - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Clamp a command value to the accepted range
pub fn clamp_command(value: i32) -> i32 {
    value.clamp(-MAX_COMMAND, MAX_COMMAND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_param() {
        assert_eq!(param_value("ud=120&lr=-40", "ud"), Some(120));
    }

    #[test]
    fn test_last_param() {
        assert_eq!(param_value("ud=120&lr=-40", "lr"), Some(-40));
    }

    #[test]
    fn test_missing_param() {
        assert_eq!(param_value("ud=120&lr=-40", "speed"), None);
        assert_eq!(param_value("", "ud"), None);
    }

    #[test]
    fn test_single_param() {
        assert_eq!(param_value("ud=255", "ud"), Some(255));
    }

    #[test]
    fn test_trailing_http_version() {
        assert_eq!(param_value("ud=10&lr=7 HTTP/1.1", "lr"), Some(7));
    }

    #[test]
    fn test_name_must_match_exactly() {
        assert_eq!(param_value("xud=5&ud=9", "ud"), Some(9));
        assert_eq!(param_value("udx=5", "ud"), None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(param_value("ud=1&ud=2", "ud"), Some(1));
    }

    #[test]
    fn test_non_numeric_value_is_zero() {
        assert_eq!(param_value("ud=fast", "ud"), Some(0));
        assert_eq!(param_value("ud=", "ud"), Some(0));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("-42"), -42);
        assert_eq!(parse_int("+7"), 7);
        assert_eq!(parse_int("  13"), 13);
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int("-"), 0);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999"), i32::MIN);
    }

    #[test]
    fn test_clamp_command() {
        assert_eq!(clamp_command(-10), -10);
        assert_eq!(clamp_command(300), 255);
        assert_eq!(clamp_command(-300), -255);
        assert_eq!(clamp_command(i32::MIN), -255);
    }
}
