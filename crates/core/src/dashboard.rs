// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use busops_domain::{
    BusRanking, BusWeekSummary, DemandBucket, PreInform, RouteRanking, RouteWeekSummary,
    WeekTotals, WeekWindow, WeeklyPerformance, WeeklyTrendPoint, bus_leaderboard, demand_pattern,
    lookback_cutoff, rank_buses, rank_routes, route_leaderboard, week_totals, weekly_trend,
};
use time::Date;

use crate::error::CoreError;

/// Default number of weeks covered by the analytics dashboard.
pub const DEFAULT_ANALYTICS_WEEKS: u32 = 8;

/// Summary of a single reporting week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard {
    /// The week shown.
    pub window: WeekWindow,
    /// Totals across the week's records.
    pub totals: WeekTotals,
    /// Per-route profit and passengers, highest profit first.
    pub route_leaderboard: Vec<RouteWeekSummary>,
    /// Per-bus profit and route count, highest profit first.
    pub bus_leaderboard: Vec<BusWeekSummary>,
    /// The week's records.
    pub records: Vec<WeeklyPerformance>,
}

/// Multi-week trends and rankings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsDashboard {
    /// Earliest date included.
    pub cutoff: Date,
    /// Per-week totals, oldest first.
    pub weekly_trend: Vec<WeeklyTrendPoint>,
    /// Most profitable routes.
    pub top_routes: Vec<RouteRanking>,
    /// Buses earning the most per kilometer.
    pub top_buses: Vec<BusRanking>,
    /// Pre-inform counts by weekday and hour.
    pub demand_pattern: Vec<DemandBucket>,
}

/// Builds the admin dashboard for `window`.
///
/// Records belonging to other weeks are ignored.
#[must_use]
pub fn build_admin_dashboard(
    window: WeekWindow,
    records: Vec<WeeklyPerformance>,
) -> AdminDashboard {
    let records: Vec<WeeklyPerformance> = records
        .into_iter()
        .filter(|record| record.week_start() == window.start())
        .collect();

    AdminDashboard {
        window,
        totals: week_totals(&records),
        route_leaderboard: route_leaderboard(&records),
        bus_leaderboard: bus_leaderboard(&records),
        records,
    }
}

/// Builds the analytics dashboard over the `lookback_weeks` weeks before `today`.
///
/// Records are included when their week starts on or after the cutoff;
/// pre-informs when they were submitted on or after it.
///
/// # Errors
///
/// Returns an error if the cutoff date cannot be computed.
pub fn build_analytics_dashboard(
    today: Date,
    lookback_weeks: u32,
    records: &[WeeklyPerformance],
    pre_informs: &[PreInform],
) -> Result<AnalyticsDashboard, CoreError> {
    let cutoff: Date = lookback_cutoff(today, lookback_weeks)?;

    let records: Vec<WeeklyPerformance> = records
        .iter()
        .filter(|record| record.week_start() >= cutoff)
        .cloned()
        .collect();
    let pre_informs: Vec<PreInform> = pre_informs
        .iter()
        .filter(|pre_inform| pre_inform.submitted_on >= cutoff)
        .cloned()
        .collect();

    Ok(AnalyticsDashboard {
        cutoff,
        weekly_trend: weekly_trend(&records),
        top_routes: rank_routes(&records),
        top_buses: rank_buses(&records),
        demand_pattern: demand_pattern(&pre_informs),
    })
}
