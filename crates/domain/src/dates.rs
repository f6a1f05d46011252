// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text conversions for dates and times.
//!
//! Dates travel as `YYYY-MM-DD` and times as `HH:MM:SS` both on the wire
//! and in storage, so lexical ordering matches chronological ordering.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::error::DomainError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const SHORT_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the input is not a valid date.
pub fn parse_date(input: &str) -> Result<Date, DomainError> {
    Date::parse(input.trim(), DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        input: input.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a time of day given as `HH:MM:SS` or `HH:MM`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the input matches neither format.
pub fn parse_time(input: &str) -> Result<Time, DomainError> {
    let trimmed: &str = input.trim();
    Time::parse(trimmed, TIME_FORMAT)
        .or_else(|_| Time::parse(trimmed, SHORT_TIME_FORMAT))
        .map_err(|e| DomainError::DateParseError {
            input: input.to_string(),
            error: e.to_string(),
        })
}

/// Formats a time of day as `HH:MM:SS`.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}
