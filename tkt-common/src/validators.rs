//! Field validators
//!
//! Each validator returns the normalized (trimmed / parsed) value or an
//! [`Error::Validation`] naming the field and the rule it broke. None of
//! them touch storage.

use crate::time;
use crate::{Error, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest accepted event or attendee name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Largest accepted event capacity
pub const MAX_CAPACITY: i64 = 10_000;

/// Date format accepted for event dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,15}$").expect("valid phone regex"));

/// Trim and require a non-empty value
fn required<'a>(field: &'static str, s: &'a str) -> Result<&'a str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "cannot be empty"));
    }
    Ok(trimmed)
}

fn check_name_length(field: &'static str, name: &str) -> Result<()> {
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::validation(
            field,
            format!("cannot exceed {} characters", MAX_NAME_LEN),
        ));
    }
    Ok(())
}

pub fn validate_event_name(s: &str) -> Result<String> {
    let name = required("event name", s)?;
    check_name_length("event name", name)?;
    Ok(name.to_string())
}

pub fn validate_location(s: &str) -> Result<String> {
    Ok(required("event location", s)?.to_string())
}

/// Parse a `YYYY-MM-DD` date that is not before today
pub fn validate_date(s: &str) -> Result<NaiveDate> {
    validate_date_on(s, time::today())
}

/// [`validate_date`] against an explicit reference date
pub fn validate_date_on(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let raw = required("event date", s)?;

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| Error::validation("event date", "invalid format, use YYYY-MM-DD"))?;

    if date < today {
        return Err(Error::validation("event date", "cannot be in the past"));
    }

    Ok(date)
}

/// Parse a capacity given as text
pub fn validate_capacity(s: &str) -> Result<i64> {
    let raw = required("event capacity", s)?;
    match raw.parse::<i64>() {
        Ok(capacity) => check_capacity(capacity),
        Err(_) => Err(overflow_or_garbage(raw)),
    }
}

/// Integers too wide for `i64` still get the range message
fn overflow_or_garbage(raw: &str) -> Error {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        Error::validation("event capacity", "must be a valid number")
    } else if negative {
        Error::validation("event capacity", "must be a positive number")
    } else {
        Error::validation("event capacity", format!("cannot exceed {}", MAX_CAPACITY))
    }
}

/// Range check for a capacity that is already numeric
pub fn check_capacity(capacity: i64) -> Result<i64> {
    if capacity <= 0 {
        return Err(Error::validation(
            "event capacity",
            "must be a positive number",
        ));
    }
    if capacity > MAX_CAPACITY {
        return Err(Error::validation(
            "event capacity",
            format!("cannot exceed {}", MAX_CAPACITY),
        ));
    }
    Ok(capacity)
}

/// Letters, whitespace, hyphens and apostrophes only
pub fn validate_attendee_name(s: &str) -> Result<String> {
    let name = required("attendee name", s)?;
    check_name_length("attendee name", name)?;

    let allowed = |c: char| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\'';
    if !name.chars().all(allowed) {
        return Err(Error::validation(
            "attendee name",
            "can only contain letters, spaces, hyphens, and apostrophes",
        ));
    }

    Ok(name.to_string())
}

/// Email address or phone number
pub fn validate_contact(s: &str) -> Result<String> {
    let contact = required("attendee contact", s)?;

    if !(EMAIL_PATTERN.is_match(contact) || PHONE_PATTERN.is_match(contact)) {
        return Err(Error::validation(
            "attendee contact",
            "must be a valid email address or phone number",
        ));
    }

    Ok(contact.to_string())
}

/// Parse a record id typed by the user
pub fn parse_id(field: &'static str, s: &str) -> Result<i64> {
    let raw = required(field, s)?;
    raw.parse()
        .map_err(|_| Error::validation(field, "must be a valid number"))
}
