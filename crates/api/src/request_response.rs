// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates are carried as `YYYY-MM-DD` strings and decimal amounts as
//! decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one (bus, route) group in a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportGroupStatus {
    /// A new record was stored.
    Created,
    /// An existing record was refreshed.
    Updated,
    /// The group could not be computed.
    Failed,
}

/// One (bus, route) group in a generated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGroupInfo {
    /// The bus identifier.
    pub bus_id: i64,
    /// The bus number plate, if the bus exists.
    pub number_plate: Option<String>,
    /// The route identifier.
    pub route_id: i64,
    /// The route number, if the route exists.
    pub route_number: Option<String>,
    /// Passengers estimated from pre-informs.
    pub estimated_passengers: u32,
    /// Kilometers summed from assignments.
    pub total_kms: Decimal,
    /// The group outcome.
    pub status: ReportGroupStatus,
    /// The stored record, for successful groups.
    pub performance_id: Option<i64>,
    /// Why the group failed.
    pub error: Option<String>,
}

/// API response for weekly report generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateWeeklyReportResponse {
    /// Monday of the reported week.
    pub week_start: String,
    /// Sunday of the reported week.
    pub week_end: String,
    /// True when the week had no bus assignments and nothing was written.
    pub no_data: bool,
    /// A summary message.
    pub message: String,
    /// Number of records created.
    pub created_count: usize,
    /// Number of records updated.
    pub updated_count: usize,
    /// Number of groups that failed.
    pub failed_count: usize,
    /// Per-group results.
    pub groups: Vec<ReportGroupInfo>,
}

/// A stored weekly performance with its derived metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceInfo {
    /// The record identifier.
    pub performance_id: i64,
    /// The bus identifier.
    pub bus_id: i64,
    /// The route identifier.
    pub route_id: i64,
    /// Monday of the week.
    pub week_start_date: String,
    /// Passengers estimated from pre-informs.
    pub estimated_passengers: u32,
    /// Passengers counted from ticket sales.
    pub actual_passengers: u32,
    /// Estimated plus actual passengers.
    pub total_passengers: u32,
    /// Kilometers driven.
    pub total_kms: Decimal,
    /// Ticket revenue.
    pub total_revenue: Decimal,
    /// Fuel cost.
    pub total_cost: Decimal,
    /// Revenue minus cost.
    pub total_profit: Decimal,
    /// Profit per kilometer.
    pub profit_per_km: Decimal,
    /// Revenue per passenger.
    pub revenue_per_passenger: Decimal,
    /// `profitable`, `loss` or `break_even`.
    pub profit_status: String,
}

/// Totals over a list of performances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Number of records.
    pub record_count: usize,
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of cost.
    pub total_cost: Decimal,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Mean passengers per record, one decimal place.
    pub average_passengers: Decimal,
}

/// API response for listing one week's performances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPerformancesResponse {
    /// Monday of the week.
    pub week_start: String,
    /// The records, ordered by bus then route.
    pub performances: Vec<PerformanceInfo>,
    /// Totals across the records.
    pub summary: PerformanceSummary,
}

/// API request to record counted passengers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateActualPassengersRequest {
    /// Passengers counted from ticket sales.
    pub actual_passengers: u32,
}

/// One line of the admin route leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeaderboardEntry {
    /// The route identifier.
    pub route_id: i64,
    /// The route number.
    pub route_number: Option<String>,
    /// The route name.
    pub route_name: Option<String>,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
}

/// One line of the admin bus leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusLeaderboardEntry {
    /// The bus identifier.
    pub bus_id: i64,
    /// The bus number plate.
    pub number_plate: Option<String>,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Number of routes served.
    pub route_count: usize,
}

/// API response for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboardResponse {
    /// Monday of the week shown.
    pub week_start: String,
    /// Sunday of the week shown.
    pub week_end: String,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of cost.
    pub total_cost: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
    /// Per-route results, highest profit first.
    pub route_performance: Vec<RouteLeaderboardEntry>,
    /// Per-bus results, highest profit first.
    pub bus_performance: Vec<BusLeaderboardEntry>,
    /// The week's records.
    pub records: Vec<PerformanceInfo>,
}

/// One week of the analytics trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTrendEntry {
    /// Monday of the week.
    pub week_start: String,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
}

/// One route in the analytics ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRankingEntry {
    /// The route identifier.
    pub route_id: i64,
    /// The route number.
    pub route_number: Option<String>,
    /// The route name.
    pub route_name: Option<String>,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of kilometers.
    pub total_kms: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
    /// Profit per kilometer.
    pub profit_per_km: Decimal,
}

/// One bus in the analytics ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRankingEntry {
    /// The bus identifier.
    pub bus_id: i64,
    /// The bus number plate.
    pub number_plate: Option<String>,
    /// Sum of profit.
    pub total_profit: Decimal,
    /// Sum of revenue.
    pub total_revenue: Decimal,
    /// Sum of kilometers.
    pub total_kms: Decimal,
    /// Sum of passengers.
    pub total_passengers: u64,
    /// Revenue per kilometer.
    pub revenue_per_km: Decimal,
}

/// Pre-inform count for one weekday and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandPatternEntry {
    /// Sunday = 1 through Saturday = 7.
    pub day_of_week: u8,
    /// Hour of the desired boarding time.
    pub hour: u8,
    /// Number of pre-informs.
    pub demand_count: u32,
}

/// API response for the analytics dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsDashboardResponse {
    /// Earliest date included.
    pub cutoff_date: String,
    /// Number of weeks covered.
    pub lookback_weeks: u32,
    /// Per-week totals, oldest first.
    pub weekly_trend: Vec<WeeklyTrendEntry>,
    /// Most profitable routes.
    pub top_routes: Vec<RouteRankingEntry>,
    /// Buses earning the most per kilometer.
    pub top_buses: Vec<BusRankingEntry>,
    /// Pre-inform counts by weekday and hour.
    pub demand_pattern: Vec<DemandPatternEntry>,
}

/// Status of one imported CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvImportRowStatus {
    /// The row was stored.
    Imported,
    /// The row was rejected.
    Failed,
}

/// Result of one imported CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvImportRowResult {
    /// The row number (1-based, excluding header).
    pub row_number: usize,
    /// The row status.
    pub status: CsvImportRowStatus,
    /// The stored identifier, for imported rows.
    pub record_id: Option<i64>,
    /// Zero or more errors.
    pub errors: Vec<String>,
}

/// API response for a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCsvResponse {
    /// What was imported.
    pub kind: String,
    /// Number of data rows.
    pub total_rows: usize,
    /// Number of rows stored.
    pub imported_count: usize,
    /// Number of rows rejected.
    pub failed_count: usize,
    /// Per-row results.
    pub rows: Vec<CsvImportRowResult>,
}
