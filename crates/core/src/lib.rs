// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod dashboard;
mod error;
mod report;

#[cfg(test)]
mod tests;

pub use dashboard::{
    AdminDashboard, AnalyticsDashboard, DEFAULT_ANALYTICS_WEEKS, build_admin_dashboard,
    build_analytics_dashboard,
};
pub use error::CoreError;
pub use report::{GroupOutcome, GroupReport, ReportInputs, WeeklyReportPlan, plan_weekly_report};
