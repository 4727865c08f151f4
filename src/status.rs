//! Status code helpers.
//!
//! Status codes arrive as free form strings. They are classified leniently the way a
//! loose integer cast reads them: leading whitespace is skipped and the leading run of
//! ASCII digits is the numeric value, so `"201 Created"` is `201`, `"2XX"` is `2` and
//! `"default"` is `0`.

/// `200 OK`, default success code of read and update operations.
pub const OK: &str = "200";
/// `201 Created`, default success code of create operations.
pub const CREATED: &str = "201";
/// `204 No Content`, default success code of delete operations and empty responses.
pub const NO_CONTENT: &str = "204";

/// Numeric value of a status code string. Codes without leading digits read as `0`, codes
/// too large to fit read as [`u64::MAX`].
pub fn numeric_value(code: &str) -> u64 {
    let digits = code
        .trim_start()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(Some(0u64), |value, digit| {
            value
                .and_then(|value| value.checked_mul(10))
                .and_then(|value| value.checked_add(u64::from(digit - b'0')))
        });

    digits.unwrap_or(u64::MAX)
}

/// `true` when the numeric value of `code` is in `[200, 300)`.
pub fn is_success(code: &str) -> bool {
    (200..300).contains(&numeric_value(code))
}

/// `true` for codes an OpenAPI responses object accepts as keys: `default`, a three digit
/// code in `100..=599` or a range such as `2XX`.
pub fn is_valid(code: &str) -> bool {
    if code == crate::openapi::response::DEFAULT_RESPONSE {
        return true;
    }

    match code.as_bytes() {
        [b'1'..=b'5', b'X', b'X'] => true,
        [b'1'..=b'5', rest @ ..] => rest.len() == 2 && rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_value_reads_leading_digits() {
        assert_eq!(numeric_value("200"), 200);
        assert_eq!(numeric_value("  201 Created"), 201);
        assert_eq!(numeric_value("2XX"), 2);
        assert_eq!(numeric_value("default"), 0);
        assert_eq!(numeric_value(""), 0);
        assert_eq!(numeric_value("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn success_range_is_half_open() {
        assert!(is_success("200"));
        assert!(is_success("299"));
        assert!(is_success("204 No Content"));
        assert!(!is_success("300"));
        assert!(!is_success("199"));
        assert!(!is_success("2XX"));
        assert!(!is_success("default"));
    }

    #[test]
    fn valid_codes() {
        for code in ["default", "200", "404", "599", "2XX", "5XX"] {
            assert!(is_valid(code), "{code} should be valid");
        }
        for code in ["", "20", "2000", "600", "099", "6XX", "2xx", "ok", " 200"] {
            assert!(!is_valid(code), "{code} should be invalid");
        }
    }
}
