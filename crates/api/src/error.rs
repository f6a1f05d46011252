// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use busops::CoreError;
use busops_domain::DomainError;
use busops_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and
/// represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// Configuration problems on stored data (a bus with unusable mileage, an
/// inconsistent stored record) are rule violations; malformed caller input
/// is invalid input.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidFuelMileage { .. } => ApiError::DomainRuleViolation {
            rule: String::from("positive_fuel_mileage"),
            message,
        },
        DomainError::InvalidPrice { field, .. } | DomainError::InvalidDistance { field, .. } => {
            ApiError::InvalidInput {
                field: field.to_string(),
                message,
            }
        }
        DomainError::WeekStartNotMonday { .. } => ApiError::InvalidInput {
            field: String::from("week_start"),
            message,
        },
        DomainError::NoScheduleData { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message,
        },
        DomainError::DateArithmeticOverflow { .. } | DomainError::DateParseError { .. } => {
            ApiError::InvalidInput {
                field: String::from("date"),
                message,
            }
        }
        DomainError::ArithmeticOverflow { .. } | DomainError::PassengerCountOverflow => {
            ApiError::DomainRuleViolation {
                rule: String::from("bounded_values"),
                message,
            }
        }
        DomainError::EntityMismatch { .. } | DomainError::CorruptPerformanceRecord { .. } => {
            ApiError::Internal { message }
        }
        DomainError::InvalidPreInformStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoScheduleData { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Schedule"),
            message: err.to_string(),
        },
        CoreError::BusNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Bus"),
            message: err.to_string(),
        },
        CoreError::RouteNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Route"),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::UniqueViolation(message) => ApiError::DomainRuleViolation {
            rule: String::from("unique_value"),
            message,
        },
        PersistenceError::ReferenceViolation(message) => ApiError::InvalidInput {
            field: String::from("reference"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
