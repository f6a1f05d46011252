// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the bus operations backend.
//!
//! Handlers take a persistence handle and plain values, return response
//! DTOs, and translate every lower-layer error into [`ApiError`]. The HTTP
//! server is a thin wrapper around this crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod csv_import;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_import::{ImportKind, import_csv};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    generate_weekly_report, generate_weekly_report_for_week, get_admin_dashboard,
    get_analytics_dashboard, get_performance, list_performances, update_actual_passengers,
};
pub use request_response::{
    AdminDashboardResponse, AnalyticsDashboardResponse, BusLeaderboardEntry, BusRankingEntry,
    CsvImportRowResult, CsvImportRowStatus, DemandPatternEntry, GenerateWeeklyReportResponse,
    ImportCsvResponse, ListPerformancesResponse, PerformanceInfo, PerformanceSummary,
    ReportGroupInfo, ReportGroupStatus, RouteLeaderboardEntry, RouteRankingEntry,
    UpdateActualPassengersRequest, WeeklyTrendEntry,
};
