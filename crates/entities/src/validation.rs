//! Format checks shared by the mutation inputs.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("regex pattern is valid")
});

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])$")
        .expect("regex pattern is valid")
});

/// Returns true if `value` looks like an email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Returns true if `value` has the `YYYY-MM-DD` shape.
///
/// Only the shape is checked; `2024-02-31` passes here and is rejected
/// later when the store parses it into a calendar date.
pub fn is_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

/// Returns true if `value` is a usable foreign key.
pub fn is_reference(value: i64) -> bool {
    value >= 0
}

/// Parses an optional `YYYY-MM-DD` date; the empty string means "unset".
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_email("alice02@mail.com"));
        assert!(is_email("a.b+tag@sub.example.org"));
        assert!(is_email("local@host"));

        assert!(!is_email(""));
        assert!(!is_email("bad-email"));
        assert!(!is_email("alice02@mail."));
        assert!(!is_email("@mail.com"));
        assert!(!is_email("alice@-mail.com"));
    }

    #[test]
    fn test_date_format() {
        assert!(is_date("2024-01-31"));
        assert!(is_date("1999-12-01"));

        assert!(!is_date(""));
        assert!(!is_date("2024-13-01"));
        assert!(!is_date("2024-1-1"));
        assert!(!is_date("2024-01-32"));
        assert!(!is_date("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("").unwrap(), None);
        assert_eq!(
            parse_optional_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(parse_optional_date("2023-02-29").is_err());
        assert!(parse_optional_date("soon").is_err());
    }

    #[test]
    fn test_reference() {
        assert!(is_reference(0));
        assert!(is_reference(42));
        assert!(!is_reference(-1));
    }
}
