// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly report planning.
//!
//! Planning is pure: the caller loads every input for the reporting week,
//! this module decides for each (bus, route) group whether a record is
//! created, updated or fails, and the caller persists the successful
//! records in a single transaction.

use busops_domain::{
    Bus, BusAssignment, BusId, PerformanceDraft, PerformanceKey, PreInform, PricingConfig, Route,
    RouteId, ScheduleGroup, WeekWindow, WeeklyPerformance, aggregate_schedules, estimate_demand,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::error::CoreError;

/// Everything needed to plan one week's report.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    /// The reporting week.
    pub window: WeekWindow,
    /// Assignments loaded for the week. Out-of-window entries are ignored.
    pub assignments: &'a [BusAssignment],
    /// Pre-informs loaded for the week. Out-of-window entries are ignored.
    pub pre_informs: &'a [PreInform],
    /// Known buses.
    pub buses: &'a [Bus],
    /// Known routes.
    pub routes: &'a [Route],
    /// Records already stored for the week.
    pub existing: &'a [WeeklyPerformance],
    /// Prices used to derive revenue and cost.
    pub pricing: PricingConfig,
}

/// What happened to one (bus, route) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// No record existed; this one is new.
    Created(WeeklyPerformance),
    /// A record existed; estimates and distance were refreshed.
    Updated(WeeklyPerformance),
    /// The group could not be computed. Other groups are unaffected.
    Failed(CoreError),
}

impl GroupOutcome {
    /// Returns the status label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Failed(_) => "failed",
        }
    }

    /// The record to persist, if the group succeeded.
    #[must_use]
    pub const fn record(&self) -> Option<&WeeklyPerformance> {
        match self {
            Self::Created(record) | Self::Updated(record) => Some(record),
            Self::Failed(_) => None,
        }
    }
}

/// The planned outcome of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    /// The bus.
    pub bus_id: BusId,
    /// The route.
    pub route_id: RouteId,
    /// Passengers estimated from pre-informs.
    pub estimated_passengers: u32,
    /// Kilometers summed from assignments.
    pub total_kms: Decimal,
    /// The decision for this group.
    pub outcome: GroupOutcome,
}

/// The planned outcome of a whole week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyReportPlan {
    window: WeekWindow,
    groups: Vec<GroupReport>,
}

impl WeeklyReportPlan {
    /// The reporting week.
    #[must_use]
    pub const fn window(&self) -> WeekWindow {
        self.window
    }

    /// Per-group reports, ordered by bus then route.
    #[must_use]
    pub fn groups(&self) -> &[GroupReport] {
        &self.groups
    }

    /// Number of groups that produce a new record.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, GroupOutcome::Created(_)))
    }

    /// Number of groups that refresh an existing record.
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, GroupOutcome::Updated(_)))
    }

    /// Number of groups that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, GroupOutcome::Failed(_)))
    }

    /// Records of every successful group.
    #[must_use]
    pub fn records_to_persist(&self) -> Vec<&WeeklyPerformance> {
        self.groups
            .iter()
            .filter_map(|group| group.outcome.record())
            .collect()
    }

    fn count(&self, predicate: impl Fn(&GroupOutcome) -> bool) -> usize {
        self.groups
            .iter()
            .filter(|group| predicate(&group.outcome))
            .count()
    }
}

/// Plans the weekly report for `inputs.window`.
///
/// Each schedule group is estimated, matched against existing records by
/// `(bus_id, route_id, week_start)` and derived through the domain. An
/// existing record keeps its identifier and its actual passengers; only
/// estimates, distance and the derived fields change.
///
/// A group whose bus or route is missing, or whose bus has an unusable
/// mileage, is reported as failed without affecting the other groups.
///
/// # Errors
///
/// Returns `CoreError::NoScheduleData` if the week has no assignments. No
/// group is evaluated in that case.
pub fn plan_weekly_report(inputs: &ReportInputs<'_>) -> Result<WeeklyReportPlan, CoreError> {
    let schedule: Vec<ScheduleGroup> = aggregate_schedules(&inputs.window, inputs.assignments)?;

    let buses: HashMap<BusId, &Bus> = inputs.buses.iter().map(|b| (b.bus_id, b)).collect();
    let routes: HashMap<RouteId, &Route> = inputs.routes.iter().map(|r| (r.route_id, r)).collect();
    let existing: HashMap<PerformanceKey, &WeeklyPerformance> = inputs
        .existing
        .iter()
        .map(|record| (record.key(), record))
        .collect();

    let groups: Vec<GroupReport> = schedule
        .into_iter()
        .map(|group| {
            let (estimated_passengers, outcome): (u32, GroupOutcome) =
                match estimate_demand(group.route_id, &inputs.window, inputs.pre_informs) {
                    Ok(estimate) => (
                        estimate,
                        plan_group(&group, estimate, inputs, &buses, &routes, &existing),
                    ),
                    Err(err) => (0, GroupOutcome::Failed(err.into())),
                };
            GroupReport {
                bus_id: group.bus_id,
                route_id: group.route_id,
                estimated_passengers,
                total_kms: group.total_kms,
                outcome,
            }
        })
        .collect();

    Ok(WeeklyReportPlan {
        window: inputs.window,
        groups,
    })
}

fn plan_group(
    group: &ScheduleGroup,
    estimated_passengers: u32,
    inputs: &ReportInputs<'_>,
    buses: &HashMap<BusId, &Bus>,
    routes: &HashMap<RouteId, &Route>,
    existing: &HashMap<PerformanceKey, &WeeklyPerformance>,
) -> GroupOutcome {
    let Some(bus) = buses.get(&group.bus_id) else {
        return GroupOutcome::Failed(CoreError::BusNotFound(group.bus_id));
    };
    let Some(route) = routes.get(&group.route_id) else {
        return GroupOutcome::Failed(CoreError::RouteNotFound(group.route_id));
    };

    let key: PerformanceKey = PerformanceKey {
        bus_id: group.bus_id,
        route_id: group.route_id,
        week_start: inputs.window.start(),
    };

    match existing.get(&key) {
        Some(stored) => stored
            .with_estimates(
                estimated_passengers,
                group.total_kms,
                bus,
                route,
                &inputs.pricing,
            )
            .map_or_else(
                |err| GroupOutcome::Failed(err.into()),
                GroupOutcome::Updated,
            ),
        None => {
            let draft: PerformanceDraft = PerformanceDraft {
                key,
                estimated_passengers,
                actual_passengers: 0,
                total_kms: group.total_kms,
            };
            WeeklyPerformance::compute(draft, bus, route, &inputs.pricing).map_or_else(
                |err| GroupOutcome::Failed(err.into()),
                GroupOutcome::Created,
            )
        }
    }
}
