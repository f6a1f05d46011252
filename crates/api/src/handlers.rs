// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler loads what it needs from persistence, hands the decision
//! to the core or domain crates, persists the outcome and shapes the
//! response. Handlers never talk HTTP.

use std::collections::HashMap;
use time::Date;
use tracing::{debug, info, warn};

use busops::{
    AdminDashboard, AnalyticsDashboard, CoreError, GroupOutcome, GroupReport, ReportInputs,
    WeeklyReportPlan, build_admin_dashboard, build_analytics_dashboard, plan_weekly_report,
};
use busops_domain::{
    Bus, BusAssignment, BusId, PreInform, PricingConfig, Route, RouteId, WeekTotals, WeekWindow,
    WeeklyPerformance, format_date, lookback_cutoff, week_totals,
};
use busops_persistence::SqlitePersistence;

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AdminDashboardResponse, AnalyticsDashboardResponse, BusLeaderboardEntry, BusRankingEntry,
    DemandPatternEntry, GenerateWeeklyReportResponse, ListPerformancesResponse, PerformanceInfo,
    PerformanceSummary, ReportGroupInfo, ReportGroupStatus, RouteLeaderboardEntry,
    RouteRankingEntry, UpdateActualPassengersRequest, WeeklyTrendEntry,
};

/// Display values for buses and routes, keyed by canonical identifier.
struct CatalogNames {
    plates: HashMap<BusId, String>,
    routes: HashMap<RouteId, (String, String)>,
}

impl CatalogNames {
    fn new(buses: &[Bus], routes: &[Route]) -> Self {
        Self {
            plates: buses
                .iter()
                .map(|b| (b.bus_id, b.number_plate.clone()))
                .collect(),
            routes: routes
                .iter()
                .map(|r| (r.route_id, (r.route_number.clone(), r.name.clone())))
                .collect(),
        }
    }

    fn load(persistence: &mut SqlitePersistence) -> Result<Self, ApiError> {
        let buses: Vec<Bus> = persistence
            .list_buses()
            .map_err(translate_persistence_error)?;
        let routes: Vec<Route> = persistence
            .list_routes()
            .map_err(translate_persistence_error)?;
        Ok(Self::new(&buses, &routes))
    }

    fn plate(&self, bus_id: BusId) -> Option<String> {
        self.plates.get(&bus_id).cloned()
    }

    fn route_number(&self, route_id: RouteId) -> Option<String> {
        self.routes.get(&route_id).map(|(number, _)| number.clone())
    }

    fn route_name(&self, route_id: RouteId) -> Option<String> {
        self.routes.get(&route_id).map(|(_, name)| name.clone())
    }
}

/// Converts a stored record into its response form.
fn performance_info(record: &WeeklyPerformance) -> PerformanceInfo {
    PerformanceInfo {
        // Records read from storage always carry an identifier.
        performance_id: record.performance_id().unwrap_or_default(),
        bus_id: record.bus_id().value(),
        route_id: record.route_id().value(),
        week_start_date: format_date(record.week_start()),
        estimated_passengers: record.estimated_passengers(),
        actual_passengers: record.actual_passengers(),
        total_passengers: record.total_passengers(),
        total_kms: record.total_kms(),
        total_revenue: record.total_revenue(),
        total_cost: record.total_cost(),
        total_profit: record.total_profit(),
        profit_per_km: record.profit_per_km(),
        revenue_per_passenger: record.revenue_per_passenger(),
        profit_status: String::from(record.profit_status().as_str()),
    }
}

fn performance_summary(records: &[WeeklyPerformance]) -> PerformanceSummary {
    let totals: WeekTotals = week_totals(records);
    PerformanceSummary {
        record_count: totals.record_count,
        total_revenue: totals.total_revenue,
        total_cost: totals.total_cost,
        total_profit: totals.total_profit,
        average_passengers: totals.average_passengers(),
    }
}

/// Generates the report for the last complete week before `today`.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `pricing` - Ticket and fuel prices
/// * `today` - The current date
///
/// # Errors
///
/// See [`generate_weekly_report_for_week`].
pub fn generate_weekly_report(
    persistence: &mut SqlitePersistence,
    pricing: &PricingConfig,
    today: Date,
) -> Result<GenerateWeeklyReportResponse, ApiError> {
    let window: WeekWindow = WeekWindow::previous_week(today).map_err(translate_domain_error)?;
    generate_weekly_report_for_week(persistence, pricing, window)
}

/// Generates or refreshes the weekly performance records of `window`.
///
/// One record is produced per (bus, route) pair assigned during the
/// week. Existing records keep their actual passenger counts. A week
/// without assignments is reported with `no_data` set and nothing is
/// written.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `pricing` - Ticket and fuel prices
/// * `window` - The reporting week
///
/// # Returns
///
/// * `Ok(GenerateWeeklyReportResponse)` with per-group outcomes
/// * `Err(ApiError)` if loading or storing fails
///
/// # Errors
///
/// Returns an error if the inputs cannot be loaded or the successful
/// groups cannot be stored. Failed groups are reported, not raised.
pub fn generate_weekly_report_for_week(
    persistence: &mut SqlitePersistence,
    pricing: &PricingConfig,
    window: WeekWindow,
) -> Result<GenerateWeeklyReportResponse, ApiError> {
    let assignments: Vec<BusAssignment> = persistence
        .list_assignments_between(window.start(), window.end())
        .map_err(translate_persistence_error)?;
    let pre_informs: Vec<PreInform> = persistence
        .list_pre_informs_between(window.start(), window.end())
        .map_err(translate_persistence_error)?;
    let buses: Vec<Bus> = persistence
        .list_buses()
        .map_err(translate_persistence_error)?;
    let routes: Vec<Route> = persistence
        .list_routes()
        .map_err(translate_persistence_error)?;
    let existing: Vec<WeeklyPerformance> = persistence
        .list_performances_for_week(window.start())
        .map_err(translate_persistence_error)?;

    debug!(
        week_start = %window.start(),
        assignments = assignments.len(),
        pre_informs = pre_informs.len(),
        existing = existing.len(),
        "Loaded weekly report inputs"
    );

    let inputs: ReportInputs<'_> = ReportInputs {
        window,
        assignments: &assignments,
        pre_informs: &pre_informs,
        buses: &buses,
        routes: &routes,
        existing: &existing,
        pricing: *pricing,
    };

    let plan: WeeklyReportPlan = match plan_weekly_report(&inputs) {
        Ok(plan) => plan,
        Err(err @ CoreError::NoScheduleData { .. }) => {
            warn!(week_start = %window.start(), "No bus assignments for the week");
            return Ok(GenerateWeeklyReportResponse {
                week_start: format_date(window.start()),
                week_end: format_date(window.end()),
                no_data: true,
                message: err.to_string(),
                created_count: 0,
                updated_count: 0,
                failed_count: 0,
                groups: Vec::new(),
            });
        }
        Err(err) => return Err(translate_core_error(err)),
    };

    let stored_ids: Vec<i64> = persistence
        .persist_weekly_report(&plan)
        .map_err(translate_persistence_error)?;

    let names: CatalogNames = CatalogNames::new(&buses, &routes);
    let mut ids = stored_ids.into_iter();
    let groups: Vec<ReportGroupInfo> = plan
        .groups()
        .iter()
        .map(|group| report_group_info(group, &names, &mut ids))
        .collect();

    for group in groups.iter().filter(|g| g.status == ReportGroupStatus::Failed) {
        warn!(
            bus_id = group.bus_id,
            route_id = group.route_id,
            error = group.error.as_deref().unwrap_or_default(),
            "Weekly performance group failed"
        );
    }

    let created_count: usize = plan.created_count();
    let updated_count: usize = plan.updated_count();
    let failed_count: usize = plan.failed_count();
    info!(
        week_start = %window.start(),
        created_count, updated_count, failed_count, "Generated weekly report"
    );

    Ok(GenerateWeeklyReportResponse {
        week_start: format_date(window.start()),
        week_end: format_date(window.end()),
        no_data: false,
        message: format!(
            "Weekly report for {} to {}: {created_count} created, {updated_count} updated, {failed_count} failed",
            window.start(),
            window.end()
        ),
        created_count,
        updated_count,
        failed_count,
        groups,
    })
}

/// Shapes one planned group. Stored identifiers are handed out in the
/// order successful groups were persisted.
fn report_group_info(
    group: &GroupReport,
    names: &CatalogNames,
    stored_ids: &mut impl Iterator<Item = i64>,
) -> ReportGroupInfo {
    let (status, performance_id, error) = match &group.outcome {
        GroupOutcome::Created(_) => (ReportGroupStatus::Created, stored_ids.next(), None),
        GroupOutcome::Updated(_) => (ReportGroupStatus::Updated, stored_ids.next(), None),
        GroupOutcome::Failed(err) => (ReportGroupStatus::Failed, None, Some(err.to_string())),
    };

    ReportGroupInfo {
        bus_id: group.bus_id.value(),
        number_plate: names.plate(group.bus_id),
        route_id: group.route_id.value(),
        route_number: names.route_number(group.route_id),
        estimated_passengers: group.estimated_passengers,
        total_kms: group.total_kms,
        status,
        performance_id,
        error,
    }
}

/// Returns the admin dashboard for the last complete week before `today`.
///
/// # Errors
///
/// Returns an error if the records cannot be loaded.
pub fn get_admin_dashboard(
    persistence: &mut SqlitePersistence,
    today: Date,
) -> Result<AdminDashboardResponse, ApiError> {
    let window: WeekWindow = WeekWindow::previous_week(today).map_err(translate_domain_error)?;
    let records: Vec<WeeklyPerformance> = persistence
        .list_performances_for_week(window.start())
        .map_err(translate_persistence_error)?;
    let names: CatalogNames = CatalogNames::load(persistence)?;

    let dashboard: AdminDashboard = build_admin_dashboard(window, records);

    Ok(AdminDashboardResponse {
        week_start: format_date(dashboard.window.start()),
        week_end: format_date(dashboard.window.end()),
        total_profit: dashboard.totals.total_profit,
        total_revenue: dashboard.totals.total_revenue,
        total_cost: dashboard.totals.total_cost,
        total_passengers: dashboard.totals.total_passengers,
        route_performance: dashboard
            .route_leaderboard
            .iter()
            .map(|summary| RouteLeaderboardEntry {
                route_id: summary.route_id.value(),
                route_number: names.route_number(summary.route_id),
                route_name: names.route_name(summary.route_id),
                total_profit: summary.total_profit,
                total_passengers: summary.total_passengers,
            })
            .collect(),
        bus_performance: dashboard
            .bus_leaderboard
            .iter()
            .map(|summary| BusLeaderboardEntry {
                bus_id: summary.bus_id.value(),
                number_plate: names.plate(summary.bus_id),
                total_profit: summary.total_profit,
                route_count: summary.route_count,
            })
            .collect(),
        records: dashboard.records.iter().map(performance_info).collect(),
    })
}

/// Returns trends and rankings over the `lookback_weeks` weeks before `today`.
///
/// # Errors
///
/// Returns an error if the records cannot be loaded or the lookback
/// reaches past the representable date range.
pub fn get_analytics_dashboard(
    persistence: &mut SqlitePersistence,
    today: Date,
    lookback_weeks: u32,
) -> Result<AnalyticsDashboardResponse, ApiError> {
    let cutoff: Date = lookback_cutoff(today, lookback_weeks).map_err(translate_domain_error)?;
    let records: Vec<WeeklyPerformance> = persistence
        .list_performances_since(cutoff)
        .map_err(translate_persistence_error)?;
    let pre_informs: Vec<PreInform> = persistence
        .list_pre_informs_submitted_since(cutoff)
        .map_err(translate_persistence_error)?;
    let names: CatalogNames = CatalogNames::load(persistence)?;

    let dashboard: AnalyticsDashboard =
        build_analytics_dashboard(today, lookback_weeks, &records, &pre_informs)
            .map_err(translate_core_error)?;

    debug!(
        cutoff = %dashboard.cutoff,
        records = records.len(),
        pre_informs = pre_informs.len(),
        "Built analytics dashboard"
    );

    Ok(AnalyticsDashboardResponse {
        cutoff_date: format_date(dashboard.cutoff),
        lookback_weeks,
        weekly_trend: dashboard
            .weekly_trend
            .iter()
            .map(|point| WeeklyTrendEntry {
                week_start: format_date(point.week_start),
                total_profit: point.total_profit,
                total_revenue: point.total_revenue,
                total_passengers: point.total_passengers,
            })
            .collect(),
        top_routes: dashboard
            .top_routes
            .iter()
            .map(|ranking| RouteRankingEntry {
                route_id: ranking.route_id.value(),
                route_number: names.route_number(ranking.route_id),
                route_name: names.route_name(ranking.route_id),
                total_profit: ranking.total_profit,
                total_kms: ranking.total_kms,
                total_passengers: ranking.total_passengers,
                profit_per_km: ranking.profit_per_km,
            })
            .collect(),
        top_buses: dashboard
            .top_buses
            .iter()
            .map(|ranking| BusRankingEntry {
                bus_id: ranking.bus_id.value(),
                number_plate: names.plate(ranking.bus_id),
                total_profit: ranking.total_profit,
                total_revenue: ranking.total_revenue,
                total_kms: ranking.total_kms,
                total_passengers: ranking.total_passengers,
                revenue_per_km: ranking.revenue_per_km,
            })
            .collect(),
        demand_pattern: dashboard
            .demand_pattern
            .iter()
            .map(|bucket| DemandPatternEntry {
                day_of_week: bucket.day_of_week,
                hour: bucket.hour,
                demand_count: bucket.demand_count,
            })
            .collect(),
    })
}

/// Retrieves one weekly performance.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the record does not exist.
pub fn get_performance(
    persistence: &mut SqlitePersistence,
    performance_id: i64,
) -> Result<PerformanceInfo, ApiError> {
    let record: WeeklyPerformance = persistence
        .get_performance(performance_id)
        .map_err(translate_persistence_error)?;
    Ok(performance_info(&record))
}

/// Lists the records of the week starting `week_start` with their totals.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if `week_start` is not a Monday, or an
/// error if the records cannot be loaded.
pub fn list_performances(
    persistence: &mut SqlitePersistence,
    week_start: Date,
) -> Result<ListPerformancesResponse, ApiError> {
    let window: WeekWindow = WeekWindow::starting(week_start).map_err(translate_domain_error)?;
    let records: Vec<WeeklyPerformance> = persistence
        .list_performances_for_week(window.start())
        .map_err(translate_persistence_error)?;

    Ok(ListPerformancesResponse {
        week_start: format_date(window.start()),
        performances: records.iter().map(performance_info).collect(),
        summary: performance_summary(&records),
    })
}

/// Records the counted passengers of a weekly performance.
///
/// Total passengers, revenue, cost and profit are re-derived from the new
/// count; the estimate and distance are left as they were.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `pricing` - Ticket and fuel prices
/// * `performance_id` - The record to update
/// * `request` - The counted passengers
///
/// # Errors
///
/// Returns an error if the record, its bus or its route does not exist,
/// or if the bus mileage cannot be used for cost derivation.
pub fn update_actual_passengers(
    persistence: &mut SqlitePersistence,
    pricing: &PricingConfig,
    performance_id: i64,
    request: &UpdateActualPassengersRequest,
) -> Result<PerformanceInfo, ApiError> {
    let record: WeeklyPerformance = persistence
        .get_performance(performance_id)
        .map_err(translate_persistence_error)?;
    let bus: Bus = persistence
        .get_bus(record.bus_id())
        .map_err(translate_persistence_error)?;
    let route: Route = persistence
        .get_route(record.route_id())
        .map_err(translate_persistence_error)?;

    let updated: WeeklyPerformance = record
        .with_actual_passengers(request.actual_passengers, &bus, &route, pricing)
        .map_err(translate_domain_error)?;
    let stored_id: i64 = persistence
        .save_performance(&updated)
        .map_err(translate_persistence_error)?;

    info!(
        performance_id = stored_id,
        actual_passengers = request.actual_passengers,
        "Updated actual passengers"
    );

    Ok(performance_info(&updated.with_id(stored_id)))
}
