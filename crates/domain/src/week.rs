// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Weekday};

use crate::error::DomainError;

/// A Monday-to-Sunday reporting week, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekWindow {
    start: Date,
    end: Date,
}

impl WeekWindow {
    /// Creates the window that begins on `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not a Monday or the end date overflows.
    pub fn starting(start: Date) -> Result<Self, DomainError> {
        let weekday: Weekday = start.weekday();
        if weekday != Weekday::Monday {
            return Err(DomainError::WeekStartNotMonday {
                start_date: start,
                weekday,
            });
        }

        let end: Date =
            start
                .checked_add(Duration::days(6))
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("computing the end of the week starting {start}"),
                })?;

        Ok(Self { start, end })
    }

    /// Returns the last complete week before the week containing `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if date arithmetic overflows.
    pub fn previous_week(today: Date) -> Result<Self, DomainError> {
        let days_back: i64 = i64::from(today.weekday().number_days_from_monday()) + 7;
        let start: Date = today
            .checked_sub(Duration::days(days_back))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("stepping back to last week from {today}"),
            })?;
        Self::starting(start)
    }

    /// First day of the week (a Monday).
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the week (a Sunday).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Returns the earliest date included in an `weeks`-week lookback from `today`.
///
/// # Errors
///
/// Returns an error if date arithmetic overflows.
pub fn lookback_cutoff(today: Date, weeks: u32) -> Result<Date, DomainError> {
    today
        .checked_sub(Duration::weeks(i64::from(weeks)))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("looking back {weeks} weeks from {today}"),
        })
}
