// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{BusId, DomainError, RouteId};
use time::Date;

/// Errors that can occur while planning reports or assembling dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The reporting week has no bus assignments.
    ///
    /// This is a warning condition: nothing is computed or written.
    NoScheduleData {
        /// First day of the week.
        week_start: Date,
        /// Last day of the week.
        week_end: Date,
    },
    /// An assignment references a bus that does not exist.
    BusNotFound(BusId),
    /// An assignment references a route that does not exist.
    RouteNotFound(RouteId),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoScheduleData {
                week_start,
                week_end,
            } => {
                write!(
                    f,
                    "No bus assignments found between {week_start} and {week_end}"
                )
            }
            Self::BusNotFound(bus_id) => write!(f, "Bus {bus_id} not found"),
            Self::RouteNotFound(route_id) => write!(f, "Route {route_id} not found"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NoScheduleData {
                week_start,
                week_end,
            } => Self::NoScheduleData {
                week_start,
                week_end,
            },
            other => Self::DomainViolation(other),
        }
    }
}
