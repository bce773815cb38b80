//! Checks for operator-entered values. Every function is total: bad input
//! yields `None`/`false`, never a panic.

use crate::model::schedule::{DayOfMonth, DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use std::num::NonZeroU32;

/// Strict 24-hour `HH:mm`: two digits, a colon, two digits.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    if !matches_shape(value, "dd:dd") {
        return None;
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

/// Strict `yyyy-MM-dd` naming a day that exists.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !matches_shape(value, "dddd-dd-dd") {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn validate_time(value: &str) -> bool {
    parse_time(value).is_some()
}

pub fn validate_date(value: &str) -> bool {
    parse_date(value).is_some()
}

pub fn parse_day_of_month(value: &str) -> Option<DayOfMonth> {
    let value = value.trim();
    if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u8>().ok().and_then(DayOfMonth::new)
}

/// Zero is rejected: a retention count of zero would empty the destination
/// on every run.
pub fn parse_max_backups(value: &str) -> Option<NonZeroU32> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<NonZeroU32>().ok()
}

// `d` stands for an ASCII digit, anything else must match literally.
fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value
            .bytes()
            .zip(shape.bytes())
            .all(|(actual, expected)| match expected {
                b'd' => actual.is_ascii_digit(),
                _ => actual == expected,
            })
}
