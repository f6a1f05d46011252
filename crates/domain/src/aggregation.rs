// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DomainError;
use crate::types::{BusAssignment, BusId, PreInform, RouteId};
use crate::week::WeekWindow;

/// All assignments of one bus to one route within a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGroup {
    /// The bus.
    pub bus_id: BusId,
    /// The route.
    pub route_id: RouteId,
    /// Number of service days in the window.
    pub assignment_count: u32,
    /// Route distance summed over every assignment.
    pub total_kms: Decimal,
}

/// Groups the window's assignments by bus and route and sums their distance.
///
/// Assignments outside the window are ignored. Groups are returned ordered by
/// `(bus_id, route_id)`.
///
/// # Errors
///
/// Returns `DomainError::NoScheduleData` if no assignment falls inside the
/// window, so callers can tell "nothing scheduled" apart from an empty result.
pub fn aggregate_schedules(
    window: &WeekWindow,
    assignments: &[BusAssignment],
) -> Result<Vec<ScheduleGroup>, DomainError> {
    let mut groups: BTreeMap<(BusId, RouteId), ScheduleGroup> = BTreeMap::new();

    for assignment in assignments
        .iter()
        .filter(|a| window.contains(a.service_date))
    {
        let group: &mut ScheduleGroup = groups
            .entry((assignment.bus_id, assignment.route_id))
            .or_insert(ScheduleGroup {
                bus_id: assignment.bus_id,
                route_id: assignment.route_id,
                assignment_count: 0,
                total_kms: Decimal::ZERO,
            });

        group.assignment_count = group
            .assignment_count
            .checked_add(1)
            .ok_or(DomainError::ArithmeticOverflow {
                operation: "assignment count",
            })?;
        group.total_kms = group
            .total_kms
            .checked_add(assignment.route_distance_km)
            .ok_or(DomainError::ArithmeticOverflow {
                operation: "total kilometers",
            })?;
    }

    if groups.is_empty() {
        return Err(DomainError::NoScheduleData {
            week_start: window.start(),
            week_end: window.end(),
        });
    }

    Ok(groups.into_values().collect())
}

/// Sums the passenger counts of pre-informs for `route_id` travelling within the window.
///
/// No matching pre-informs yields zero.
///
/// # Errors
///
/// Returns `DomainError::PassengerCountOverflow` if the sum does not fit in a `u32`.
pub fn estimate_demand(
    route_id: RouteId,
    window: &WeekWindow,
    pre_informs: &[PreInform],
) -> Result<u32, DomainError> {
    let total: u64 = pre_informs
        .iter()
        .filter(|p| p.route_id == route_id && window.contains(p.date_of_travel))
        .map(|p| u64::from(p.passenger_count))
        .sum();

    u32::try_from(total).map_err(|_| DomainError::PassengerCountOverflow)
}
