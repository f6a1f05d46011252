// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::{Date, Weekday};

use crate::types::BusId;

/// Errors that can occur during domain validation and computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A bus has a zero or negative fuel mileage.
    ///
    /// This is a configuration error on the bus record. Fuel cost cannot be
    /// derived without a positive mileage.
    InvalidFuelMileage {
        /// The bus with the invalid mileage, when known.
        bus_id: Option<BusId>,
        /// The configured mileage.
        mileage: Decimal,
    },
    /// A pricing constant is negative.
    InvalidPrice {
        /// The name of the pricing field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
    /// A distance is negative.
    InvalidDistance {
        /// Description of the distance that was rejected.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
    /// A week start date is not a Monday.
    WeekStartNotMonday {
        /// The rejected start date.
        start_date: Date,
        /// The actual weekday.
        weekday: Weekday,
    },
    /// No bus assignments exist in the requested window.
    NoScheduleData {
        /// First day of the window.
        week_start: Date,
        /// Last day of the window (inclusive).
        week_end: Date,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Decimal arithmetic overflow.
    ArithmeticOverflow {
        /// Description of the operation that failed.
        operation: &'static str,
    },
    /// A passenger total does not fit the counter type.
    PassengerCountOverflow,
    /// The bus or route supplied for a derivation does not match the record key.
    EntityMismatch {
        /// Description of the mismatch.
        reason: String,
    },
    /// A stored performance record violates a derived-field invariant.
    CorruptPerformanceRecord {
        /// The stored record identifier.
        performance_id: i64,
        /// Description of the violated invariant.
        reason: String,
    },
    /// Failed to parse a date or time from a string.
    DateParseError {
        /// The invalid input string.
        input: String,
        /// The parsing error message.
        error: String,
    },
    /// A pre-inform status string is not recognized.
    InvalidPreInformStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFuelMileage {
                bus_id: Some(bus_id),
                mileage,
            } => {
                write!(
                    f,
                    "Bus {bus_id} has invalid fuel mileage {mileage}: must be greater than 0"
                )
            }
            Self::InvalidFuelMileage {
                bus_id: None,
                mileage,
            } => {
                write!(f, "Invalid fuel mileage {mileage}: must be greater than 0")
            }
            Self::InvalidPrice { field, value } => {
                write!(f, "Invalid {field}: {value} must not be negative")
            }
            Self::InvalidDistance { field, value } => {
                write!(f, "Invalid {field}: {value} must not be negative")
            }
            Self::WeekStartNotMonday {
                start_date,
                weekday,
            } => {
                write!(
                    f,
                    "Week start date must be a Monday, but {start_date} is a {weekday}"
                )
            }
            Self::NoScheduleData {
                week_start,
                week_end,
            } => {
                write!(
                    f,
                    "No bus assignments found between {week_start} and {week_end}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::ArithmeticOverflow { operation } => {
                write!(f, "Arithmetic overflow while computing {operation}")
            }
            Self::PassengerCountOverflow => write!(f, "Passenger count overflow"),
            Self::EntityMismatch { reason } => write!(f, "Entity mismatch: {reason}"),
            Self::CorruptPerformanceRecord {
                performance_id,
                reason,
            } => {
                write!(
                    f,
                    "Stored performance record {performance_id} is inconsistent: {reason}"
                )
            }
            Self::DateParseError { input, error } => {
                write!(f, "Failed to parse '{input}': {error}")
            }
            Self::InvalidPreInformStatus(status) => {
                write!(f, "Invalid pre-inform status: {status}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
